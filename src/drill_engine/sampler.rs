//! Bounded rejection sampling of operand digit strings.

use log::{debug, trace};
use rand::{seq::SliceRandom, Rng};

use crate::drill_engine::{
    config::OperandConfig,
    models::{DigitSet, GenerationFailure},
};

/// Give up on a configuration after this many candidate sets.
pub const MAX_SAMPLING_ATTEMPTS: usize = 100_000;

/// Draw one candidate set: `num_operands` strings of `length` digits.
fn draw<R: Rng>(rng: &mut R, digits: &[char], num_operands: usize, length: usize) -> Vec<String> {
    (0..num_operands)
        .map(|_| {
            (0..length)
                .filter_map(|_| digits.choose(rng).copied())
                .collect()
        })
        .collect()
}

/// True if the candidate contains every required digit somewhere.
fn covers_required(candidate: &[String], required: &DigitSet) -> bool {
    let seen: DigitSet = candidate.iter().flat_map(|s| s.chars()).collect();
    required.is_subset(&seen)
}

/// True if every unordered pair of operands satisfies the pattern table.
///
/// Stops at the first violating pair.
fn pairs_match(candidate: &[String], config: &OperandConfig) -> bool {
    let Some(table) = config.pattern() else {
        return true;
    };
    for (i, a) in candidate.iter().enumerate() {
        for b in &candidate[i + 1..] {
            if !table.pair_matches(config.operator(), a, b) {
                debug!("Non-matching pattern of digits within: {},{}", a, b);
                return false;
            }
        }
    }
    true
}

/// Sample operand digit strings satisfying the required-digit and pattern
/// constraints of `config`.
///
/// # Errors
///
/// * [`GenerationFailure::Infeasible`] right away when more digits are
///   required than the operands can hold
/// * [`GenerationFailure::Exhausted`] after [`MAX_SAMPLING_ATTEMPTS`] rejected candidates
pub fn sample_operands<R: Rng>(
    rng: &mut R,
    config: &OperandConfig,
) -> Result<Vec<String>, GenerationFailure> {
    let num_operands = config.num_operands();
    let length = config.length();
    let capacity = num_operands * length;
    let required = config.required_digits();

    if required.len() > capacity {
        return Err(GenerationFailure::Infeasible {
            required: required.len(),
            capacity,
        });
    }

    let digits = config.allowed_digits().to_vec();
    for attempt in 1..=MAX_SAMPLING_ATTEMPTS {
        let candidate = draw(rng, &digits, num_operands, length);
        if covers_required(&candidate, required) && pairs_match(&candidate, config) {
            trace!("Accepted {:?} after {} attempts", candidate, attempt);
            return Ok(candidate);
        }
    }

    Err(GenerationFailure::Exhausted {
        attempts: MAX_SAMPLING_ATTEMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::models::{Base, Operator};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_have_the_configured_shape_and_digits() {
        let config = OperandConfig::builder(Base::Hex, Operator::Add(4))
            .length(3)
            .allowed_digits("9ab")
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let operands = sample_operands(&mut rng, &config).unwrap();
            assert_eq!(operands.len(), 4);
            for op in &operands {
                assert_eq!(op.len(), 3);
                assert!(op.chars().all(|c| "9ab".contains(c)), "stray digit in {op}");
            }
        }
    }

    #[test]
    fn required_digits_always_appear() {
        let config = OperandConfig::builder(Base::Decimal, Operator::Multiply)
            .length(2)
            .required_digits("79")
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let operands = sample_operands(&mut rng, &config).unwrap();
            let joined = operands.concat();
            assert!(joined.contains('7') && joined.contains('9'), "{operands:?}");
        }
    }

    #[test]
    fn too_many_required_digits_is_infeasible() {
        let config = OperandConfig::builder(Base::Hex, Operator::Multiply)
            .required_digits("abc")
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            sample_operands(&mut rng, &config),
            Err(GenerationFailure::Infeasible { required: 3, capacity: 2 })
        );
    }

    #[test]
    fn unsatisfiable_pattern_is_exhausted() {
        // 7 is required but may only pair with 2, and 2 is never drawn.
        let config = OperandConfig::builder(Base::Decimal, Operator::Multiply)
            .allowed_digits("3")
            .required_digits("7")
            .pattern(Some("7:2"))
            .build()
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(
            sample_operands(&mut rng, &config),
            Err(GenerationFailure::Exhausted { attempts: MAX_SAMPLING_ATTEMPTS })
        );
    }

    #[test]
    fn accepted_samples_satisfy_the_pattern() {
        let config = OperandConfig::builder(Base::Decimal, Operator::Multiply)
            .length(2)
            .pattern(Some("6:3,3:6"))
            .build()
            .unwrap();
        let table = config.pattern().unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            let ops = sample_operands(&mut rng, &config).unwrap();
            assert!(table.pair_matches(Operator::Multiply, &ops[0], &ops[1]), "{ops:?}");
        }
    }
}
