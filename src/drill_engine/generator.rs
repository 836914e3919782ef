use log::{error, trace};
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::drill_engine::{
    config::OperandConfig,
    digits::{to_digit_string, to_value},
    models::{GenerationFailure, Operand, Operator, Round, RoundRequest},
    policy::{adjust, compute_result},
    sampler::sample_operands,
};

/// Give up after this many samples rejected by the arithmetic policy.
pub const MAX_ROUND_ATTEMPTS: usize = 100_000;

/// Generate a round ID from operator + RNG.
fn make_round_id(op: Operator, rng: &mut impl RngCore) -> String {
    let prefix = match op {
        Operator::Add(_)   => "ADD",
        Operator::Subtract => "SUB",
        Operator::Multiply => "MUL",
        Operator::Divide   => "DIV",
    };
    format!("{}-{:08X}", prefix, rng.next_u32())
}

/// All-zero operands for a round whose constraints could not be met.
fn degenerate_round(id: String, config: &OperandConfig, failure: GenerationFailure) -> Round {
    error!("{} ({:?})", failure, failure);
    let zeros = "0".repeat(config.length());
    let operands = (0..config.num_operands())
        .map(|_| Operand { digits: zeros.clone(), value: 0 })
        .collect();
    Round {
        round_id: id,
        base: config.base(),
        operator: config.operator(),
        length: config.length(),
        operands,
        result: 0,
        result_digits: "0".to_string(),
        failure: Some(failure),
    }
}

/// Generate one round with a caller-owned RNG.
///
/// Samples operands, applies the arithmetic policy and retries the whole
/// round on any rejection. Sampling failures and an exhausted outer loop both
/// yield an all-zero round with [`Round::failure`] set instead of looping on.
pub fn generate_round_with<R: RngCore>(rng: &mut R, config: &OperandConfig) -> Round {
    let round_id = make_round_id(config.operator(), rng);
    let base = config.base();

    for _ in 0..MAX_ROUND_ATTEMPTS {
        let digits = match sample_operands(rng, config) {
            Ok(digits) => digits,
            Err(failure) => return degenerate_round(round_id, config, failure),
        };

        let operands = match adjust(digits, config) {
            Ok(operands) => operands,
            Err(rejection) => {
                trace!("Round rejected: {}", rejection);
                continue;
            }
        };

        let Some(result) = compute_result(config.operator(), &operands) else {
            trace!("Round rejected: result out of range");
            continue;
        };

        debug_assert!(operands
            .iter()
            .all(|op| to_value(&to_digit_string(op.value, base), base) == Some(op.value)));

        return Round {
            round_id,
            base,
            operator: config.operator(),
            length: config.length(),
            operands,
            result,
            result_digits: to_digit_string(result, base),
            failure: None,
        };
    }

    degenerate_round(
        round_id,
        config,
        GenerationFailure::Exhausted { attempts: MAX_ROUND_ATTEMPTS },
    )
}

/// Single entry point: seed an RNG from the request and generate one round.
pub fn generate_round(request: RoundRequest<'_>) -> Round {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };
    generate_round_with(&mut rng, request.config)
}
