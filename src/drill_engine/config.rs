//! Validated, immutable operand configuration.
//!
//! [`OperandConfig`] is only obtainable through [`OperandConfigBuilder::build`],
//! which resolves the effective digit set, compiles the pattern spec and
//! checks that every possible result fits the integer type used for
//! arithmetic. Changing options means building a new config.

use log::debug;

use crate::drill_engine::{
    digits::{effective_allowed, parse_digit_set},
    errors::ConfigError,
    models::{Base, DigitSet, Operator, MAX_ADDITION_PLUSES},
    pattern::PatternTable,
};

#[derive(Debug, Clone)]
pub struct OperandConfig {
    base: Base,
    length: usize,
    operator: Operator,
    allowed: DigitSet,
    required: DigitSet,
    disallowed: DigitSet,
    pattern: Option<PatternTable>,
    allow_trivial: bool,
}

impl OperandConfig {
    pub fn builder(base: Base, operator: Operator) -> OperandConfigBuilder {
        OperandConfigBuilder {
            base,
            operator,
            length: 1,
            required: String::new(),
            allowed: String::new(),
            disallowed: String::new(),
            pattern: None,
            allow_trivial: false,
        }
    }

    pub fn base(&self) -> Base {
        self.base
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn num_operands(&self) -> usize {
        self.operator.num_operands()
    }

    /// The effective set operands are drawn from, after all overrides.
    pub fn allowed_digits(&self) -> &DigitSet {
        &self.allowed
    }

    pub fn required_digits(&self) -> &DigitSet {
        &self.required
    }

    pub fn disallowed_digits(&self) -> &DigitSet {
        &self.disallowed
    }

    pub fn pattern(&self) -> Option<&PatternTable> {
        self.pattern.as_ref()
    }

    pub fn allow_trivial(&self) -> bool {
        self.allow_trivial
    }
}

/// Raw, unvalidated options for an [`OperandConfig`].
#[derive(Debug, Clone)]
pub struct OperandConfigBuilder {
    base: Base,
    operator: Operator,
    length: usize,
    required: String,
    allowed: String,
    disallowed: String,
    pattern: Option<String>,
    allow_trivial: bool,
}

impl OperandConfigBuilder {
    /// Operand length in digits; zero is raised to one.
    pub fn length(mut self, length: usize) -> Self {
        self.length = length.max(1);
        self
    }

    pub fn required_digits(mut self, digits: impl Into<String>) -> Self {
        self.required = digits.into();
        self
    }

    /// Allowed digits; an empty string means "unspecified".
    pub fn allowed_digits(mut self, digits: impl Into<String>) -> Self {
        self.allowed = digits.into();
        self
    }

    pub fn disallowed_digits(mut self, digits: impl Into<String>) -> Self {
        self.disallowed = digits.into();
        self
    }

    pub fn pattern(mut self, spec: Option<impl Into<String>>) -> Self {
        self.pattern = spec.map(Into::into);
        self
    }

    pub fn allow_trivial(mut self, allow: bool) -> Self {
        self.allow_trivial = allow;
        self
    }

    /// Validate everything and produce the config.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::AddendCount`] for an addition with fewer than 2 or more than 53 addends
    /// * [`ConfigError::InvalidDigits`] for a digit string with characters outside the base
    /// * [`ConfigError::InvalidPattern`] for a malformed pattern clause
    /// * [`ConfigError::NoAllowedDigits`] if nothing is left to draw from
    /// * [`ConfigError::LengthTooLarge`] if a result could overflow
    pub fn build(self) -> Result<OperandConfig, ConfigError> {
        let base = self.base;
        if let Operator::Add(count) = self.operator {
            let max = MAX_ADDITION_PLUSES + 1;
            if !(2..=max).contains(&count) {
                return Err(ConfigError::AddendCount { count, max });
            }
        }
        let required = parse_digit_set(&self.required, base)?;
        let allowed = parse_digit_set(&self.allowed, base)?;
        let disallowed = parse_digit_set(&self.disallowed, base)?;

        let effective = effective_allowed(
            &required, &allowed, &disallowed, base, self.operator, self.allow_trivial,
        );
        if effective.is_empty() {
            return Err(ConfigError::NoAllowedDigits);
        }

        let pattern = self
            .pattern
            .as_deref()
            .map(|spec| PatternTable::parse(spec, base))
            .transpose()?;

        if !result_fits(base, self.operator, self.length) {
            return Err(ConfigError::LengthTooLarge {
                length: self.length,
                base: base.radix(),
                operator: self.operator.to_string(),
            });
        }

        debug!(
            "Built config: base {}, {}, length {}, digits '{}'",
            base, self.operator, self.length, effective
        );

        Ok(OperandConfig {
            base,
            length: self.length,
            operator: self.operator,
            allowed: effective,
            required,
            disallowed,
            pattern,
            allow_trivial: self.allow_trivial,
        })
    }
}

/// Whether the largest value any round can produce fits in a `u128`.
///
/// Operands stay below `base^length`; a widened minuend stays below
/// `base^(length + 1)`; a product or dividend below `base^(2 * length)`;
/// a sum of `n` addends below `n * base^length`.
fn result_fits(base: Base, op: Operator, length: usize) -> bool {
    let Ok(length) = u32::try_from(length) else {
        return false;
    };
    let radix = u128::from(base.radix());
    match op {
        Operator::Add(n) => radix
            .checked_pow(length)
            .and_then(|max| max.checked_mul(n as u128))
            .is_some(),
        Operator::Subtract => length
            .checked_add(1)
            .and_then(|exp| radix.checked_pow(exp))
            .is_some(),
        Operator::Multiply | Operator::Divide => length
            .checked_mul(2)
            .and_then(|exp| radix.checked_pow(exp))
            .is_some(),
    }
}
