//! Per-operator adjustment of sampled operands.
//!
//! Sampled digit strings go through three steps:
//!
//! 1. convert to values,
//! 2. operator-specific repair (widen a too-small minuend, turn the first
//!    division operand into the dividend),
//! 3. trivial-operand filter.
//!
//! Any step may reject the round; the caller then samples a fresh set.

use std::fmt;

use crate::drill_engine::{
    config::OperandConfig,
    digits::{to_digit_string, to_value},
    models::{Base, Operand, OperandSet, Operator},
};

/// Why an otherwise valid sample was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Minuend equals subtrahend, so the difference would be zero.
    ZeroDifference,
    DivisionByZero,
    /// An operand is 0 or 1.
    TrivialOperand,
    /// A value did not fit the integer type.
    Overflow,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::ZeroDifference => write!(f, "zero difference"),
            Rejection::DivisionByZero => write!(f, "division by zero"),
            Rejection::TrivialOperand => write!(f, "trivial operand"),
            Rejection::Overflow       => write!(f, "overflow"),
        }
    }
}

fn operand(digits: String, base: Base) -> Result<Operand, Rejection> {
    let value = to_value(&digits, base).ok_or(Rejection::Overflow)?;
    Ok(Operand { digits, value })
}

/// Prefix the minuend with `1` and a growing run of zeros until it is at
/// least the subtrahend. Each step makes the minuend strictly larger.
fn widen_minuend(minuend: &Operand, subtrahend: u128, base: Base) -> Result<Operand, Rejection> {
    let stripped = minuend.digits.trim_start_matches('0');
    let mut zeros = 0;
    let mut widened = minuend.clone();
    while widened.value < subtrahend {
        let digits = format!("1{}{}", "0".repeat(zeros), stripped);
        widened = operand(digits, base)?;
        zeros += 1;
    }
    Ok(widened)
}

/// Reject 0 and 1 operands unless trivial operands are allowed.
///
/// Single-digit operands may be 0 or 1 when that digit was required, and
/// single-bit operands are always exempt.
fn check_trivial(operands: &[Operand], config: &OperandConfig) -> Result<(), Rejection> {
    if config.allow_trivial() {
        return Ok(());
    }
    let has = |v: u128| operands.iter().any(|op| op.value == v);

    if config.length() > 1 {
        if has(0) || has(1) {
            return Err(Rejection::TrivialOperand);
        }
    } else if config.base().radix() > 2 {
        let required = config.required_digits();
        if (!required.contains('0') && has(0)) || (!required.contains('1') && has(1)) {
            return Err(Rejection::TrivialOperand);
        }
    }
    Ok(())
}

/// Turn sampled digit strings into the operands shown to the user.
///
/// # Errors
///
/// Returns the [`Rejection`] that disqualified the sample.
pub fn adjust(digits: Vec<String>, config: &OperandConfig) -> Result<OperandSet, Rejection> {
    let base = config.base();
    let mut operands = digits
        .into_iter()
        .map(|d| operand(d, base))
        .collect::<Result<OperandSet, _>>()?;

    match config.operator() {
        Operator::Subtract => {
            if let [minuend, subtrahend, ..] = operands.as_mut_slice() {
                *minuend = widen_minuend(minuend, subtrahend.value, base)?;
                if minuend.value == subtrahend.value {
                    return Err(Rejection::ZeroDifference);
                }
            }
        }
        Operator::Divide => {
            let product = operands
                .iter()
                .try_fold(1u128, |acc, op| acc.checked_mul(op.value))
                .ok_or(Rejection::Overflow)?;
            if product == 0 {
                return Err(Rejection::DivisionByZero);
            }
            if let Some(dividend) = operands.first_mut() {
                *dividend = Operand {
                    digits: to_digit_string(product, base),
                    value: product,
                };
            }
        }
        Operator::Add(_) | Operator::Multiply => {}
    }

    check_trivial(&operands, config)?;
    Ok(operands)
}

/// Apply the operator across all operands, left to right.
///
/// Returns `None` on overflow, underflow or division by zero, none of which
/// an adjusted operand set can produce.
pub fn compute_result(op: Operator, operands: &[Operand]) -> Option<u128> {
    let (first, rest) = operands.split_first()?;
    rest.iter().try_fold(first.value, |acc, next| match op {
        Operator::Add(_)   => acc.checked_add(next.value),
        Operator::Subtract => acc.checked_sub(next.value),
        Operator::Multiply => acc.checked_mul(next.value),
        Operator::Divide   => acc.checked_div(next.value),
    })
}
