//! Digit-set algebra and radix conversion.
//!
//! Everything here is pure: the functions take a base and some digit sets and
//! return a new set or a converted value. Validation of user-supplied digit
//! strings happens here too, so an invalid digit never makes it into an
//! [`OperandConfig`](crate::drill_engine::config::OperandConfig).

use log::{debug, warn};

use crate::drill_engine::{
    errors::ConfigError,
    models::{Base, DigitSet, Operator},
};

/// The full alphabet of `base` as a set.
pub fn alphabet(base: Base) -> DigitSet {
    DigitSet::from(base.alphabet())
}

/// Parse a user-supplied digit string into a set, lower-casing it first.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidDigits`] if any character is not a digit of
/// `base`.
pub fn parse_digit_set(digits: &str, base: Base) -> Result<DigitSet, ConfigError> {
    let set = DigitSet::from(digits.to_lowercase().as_str());
    if set.is_subset(&alphabet(base)) {
        return Ok(set);
    }
    warn!("Rejecting digit string '{}' for base {}", digits, base);
    Err(ConfigError::InvalidDigits {
        base: base.radix(),
        digits: digits.to_string(),
    })
}

/// Whether 0 and 1 are left out of the default allowed set.
///
/// Only bases above 4 are protected, and never for subtraction.
pub fn trivial_protection(base: Base, op: Operator, allow_trivial: bool) -> bool {
    !allow_trivial && base.radix() > 4 && op != Operator::Subtract
}

/// Compute the set of digits operands are actually drawn from.
///
/// An empty `allowed` means "unspecified". Required digits always win over
/// disallowed ones, and the result is clamped to the alphabet of `base`.
pub fn effective_allowed(
    required: &DigitSet,
    allowed: &DigitSet,
    disallowed: &DigitSet,
    base: Base,
    op: Operator,
    allow_trivial: bool,
) -> DigitSet {
    let all = alphabet(base);
    let default = if !allowed.is_empty() {
        allowed.clone()
    } else if trivial_protection(base, op, allow_trivial) {
        all.difference(&DigitSet::from("01"))
    } else {
        all.clone()
    };

    let effective = default
        .union(required)
        .difference(disallowed)
        .union(required)
        .intersection(&all);
    debug!(
        "Effective digits for base {}: '{}' (required '{}', disallowed '{}')",
        base, effective, required, disallowed
    );
    effective
}

/// Integer value of a digit string, ignoring leading zeros.
///
/// An all-zero (or empty) string is zero. Returns `None` if the string holds
/// a character outside `base` or the value does not fit in a `u128`.
pub fn to_value(digits: &str, base: Base) -> Option<u128> {
    let radix = base.radix();
    digits
        .trim_start_matches('0')
        .chars()
        .try_fold(0u128, |acc, c| {
            let d = c.to_digit(radix)?;
            acc.checked_mul(u128::from(radix))?.checked_add(u128::from(d))
        })
}

/// Render `value` in `base`: lowercase digits, no leading zeros, `"0"` for zero.
pub fn to_digit_string(value: u128, base: Base) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let radix = u128::from(base.radix());
    let mut rest = value;
    let mut out = Vec::new();
    while rest > 0 {
        // `rest % radix` is below 16, so the cast and the digit lookup are exact.
        let d = (rest % radix) as u32;
        out.push(char::from_digit(d, base.radix()).unwrap_or('?'));
        rest /= radix;
    }
    out.iter().rev().collect()
}
