use thiserror::Error;

/// Errors raised while turning user options into an [`OperandConfig`].
///
/// None of these reach the generator: a config that fails to build is never
/// used for a round.
///
/// [`OperandConfig`]: crate::drill_engine::config::OperandConfig
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported base {0} (expected 2, 4, 8, 10 or 16)")]
    UnsupportedBase(u32),
    #[error("invalid digit string for base {base}: '{digits}'")]
    InvalidDigits { base: u32, digits: String },
    #[error("invalid pattern specification: '{0}'")]
    InvalidPattern(String),
    #[error("invalid operation: '{0}'")]
    InvalidOperator(String),
    #[error("number of + exceeds maximum of {max}: '{op}'")]
    TooManyAddends { op: String, max: usize },
    #[error("addition needs between 2 and {max} addends, got {count}")]
    AddendCount { count: usize, max: usize },
    #[error("invalid base '{0}' (expected 2, 4, 8, 10 or 16)")]
    InvalidBase(String),
    #[error("no digits left to draw from after applying allowed/disallowed digits")]
    NoAllowedDigits,
    #[error("length {length} is too large for {operator} in base {base}")]
    LengthTooLarge {
        length: usize,
        base: u32,
        operator: String,
    },
}
