//! # arith_drill_gen
//!
//! Randomised mental-arithmetic drills in bases 2, 4, 8, 10 and 16.
//!
//! The library generates operands for addition (two or more addends),
//! subtraction, multiplication and division under digit constraints: digits
//! that must appear, digits that may appear, digits that may not, and
//! pairing rules saying which digits of one operand may meet which digits of
//! another. The binary wraps it in an interactive prompt.
//!
//! ## How it works
//!
//! 1. Build an [`OperandConfig`] with [`OperandConfig::builder`]. Building
//!    validates every digit string and pattern and resolves the effective
//!    set of digits to draw from.
//! 2. Call [`generate_round`] (seeded or entropy) or [`generate_round_with`]
//!    (your own RNG). The engine rejection-samples digit strings, repairs or
//!    rejects them per operator (no negative or zero differences, no division
//!    by zero, no trivial 0/1 operands) and computes the result.
//! 3. The returned [`Round`] holds the operands, the result and its digits
//!    in the chosen base, and a [`GenerationFailure`] if the constraints
//!    could not be met (the operands are then all zero).
//!
//! ## Quick start
//!
//! ```rust
//! use arith_drill_gen::{generate_round, Base, OperandConfig, Operator, RoundRequest};
//!
//! let config = OperandConfig::builder(Base::Decimal, Operator::Multiply)
//!     .allowed_digits("234")
//!     .build()
//!     .expect("valid config");
//!
//! let round = generate_round(RoundRequest { config: &config, rng_seed: Some(42) });
//! let product: u128 = round.operands.iter().map(|op| op.value).product();
//! assert_eq!(round.result, product);
//! assert!(round.failure.is_none());
//! println!("{} = {}", round.operator, round.result_digits);
//! ```

pub mod cli;
pub mod drill_engine;
pub mod input;
pub mod menu;
pub mod presentation;
pub mod session;

// Convenience re-exports so callers can use `arith_drill_gen::generate_round`
// directly without reaching into `drill_engine::`.
pub use drill_engine::{
    generate_round, generate_round_with, Base, ConfigError, DigitSet, GenerationFailure,
    Operand, OperandConfig, OperandSet, Operator, PatternTable, Round, RoundRequest,
};
