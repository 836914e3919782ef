use std::collections::BTreeSet;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::drill_engine::errors::ConfigError;

// ---------------------------------------------------------------------------
// Number base
// ---------------------------------------------------------------------------

/// Every digit any supported base can use, in value order.
pub const ALL_DIGITS: &str = "0123456789abcdef";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Base {
    Binary,
    Quaternary,
    Octal,
    Decimal,
    Hex,
}

impl Base {
    pub const ALL: [Base; 5] = [Base::Binary, Base::Quaternary, Base::Octal, Base::Decimal, Base::Hex];

    pub fn radix(self) -> u32 {
        match self {
            Base::Binary     => 2,
            Base::Quaternary => 4,
            Base::Octal      => 8,
            Base::Decimal    => 10,
            Base::Hex        => 16,
        }
    }

    /// The digit characters valid in this base, e.g. `"01234567"` for octal.
    pub fn alphabet(self) -> &'static str {
        &ALL_DIGITS[..self.radix() as usize]
    }
}

impl TryFrom<u32> for Base {
    type Error = ConfigError;

    fn try_from(radix: u32) -> Result<Self, Self::Error> {
        match radix {
            2  => Ok(Base::Binary),
            4  => Ok(Base::Quaternary),
            8  => Ok(Base::Octal),
            10 => Ok(Base::Decimal),
            16 => Ok(Base::Hex),
            other => Err(ConfigError::UnsupportedBase(other)),
        }
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.radix())
    }
}

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

/// Most `+` signs accepted in an addition operator string (`+` .. 52 × `+`).
pub const MAX_ADDITION_PLUSES: usize = 52;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Addition with the given number of addends (2 ..= 53).
    Add(usize),
    Subtract,
    #[default]
    Multiply,
    Divide,
}

impl Operator {
    pub fn num_operands(self) -> usize {
        match self {
            Operator::Add(n) => n,
            _ => 2,
        }
    }

    /// Symbol printed in front of every operand but the first.
    pub fn symbol(self) -> char {
        match self {
            Operator::Add(_)   => '+',
            Operator::Subtract => '\u{2212}',
            Operator::Multiply => '×',
            Operator::Divide   => '÷',
        }
    }

    /// Whether the pattern check pairs digits column by column (add, subtract)
    /// rather than every digit against the whole other operand.
    pub fn is_positional(self) -> bool {
        matches!(self, Operator::Add(_) | Operator::Subtract)
    }
}

impl std::str::FromStr for Operator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "*" | "." | "×" | "x" => Ok(Operator::Multiply),
            "-" | "\u{2212}"     => Ok(Operator::Subtract),
            "/" | "÷"            => Ok(Operator::Divide),
            _ if !s.is_empty() && s.chars().all(|c| c == '+') => {
                let pluses = s.chars().count();
                if pluses > MAX_ADDITION_PLUSES {
                    return Err(ConfigError::TooManyAddends {
                        op: s.to_string(),
                        max: MAX_ADDITION_PLUSES,
                    });
                }
                Ok(Operator::Add(pluses + 1))
            }
            _ => Err(ConfigError::InvalidOperator(s.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Add(n)   => write!(f, "addition ({n} addends)"),
            Operator::Subtract => write!(f, "subtraction"),
            Operator::Multiply => write!(f, "multiplication"),
            Operator::Divide   => write!(f, "division"),
        }
    }
}

// ---------------------------------------------------------------------------
// Digit sets
// ---------------------------------------------------------------------------

/// An ordered set of digit characters.
///
/// Ordered so that drawing from it with a seeded RNG is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitSet(BTreeSet<char>);

impl DigitSet {
    pub fn new() -> Self {
        DigitSet(BTreeSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, digit: char) -> bool {
        self.0.contains(&digit)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    pub fn is_subset(&self, other: &DigitSet) -> bool {
        self.0.is_subset(&other.0)
    }

    pub fn union(&self, other: &DigitSet) -> DigitSet {
        DigitSet(self.0.union(&other.0).copied().collect())
    }

    pub fn difference(&self, other: &DigitSet) -> DigitSet {
        DigitSet(self.0.difference(&other.0).copied().collect())
    }

    pub fn intersection(&self, other: &DigitSet) -> DigitSet {
        DigitSet(self.0.intersection(&other.0).copied().collect())
    }

    /// Digits as a `Vec`, in ascending order.
    pub fn to_vec(&self) -> Vec<char> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<char> for DigitSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        DigitSet(iter.into_iter().collect())
    }
}

impl From<&str> for DigitSet {
    fn from(digits: &str) -> Self {
        digits.chars().collect()
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Generation request / result types
// ---------------------------------------------------------------------------

/// One operand of a round: the digits it was built from and its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operand {
    /// Digit string, possibly with leading zeros.
    pub digits: String,
    pub value: u128,
}

pub type OperandSet = Vec<Operand>;

/// Why a round fell back to all-zero operands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationFailure {
    /// More required digits than the operands have room for.
    Infeasible { required: usize, capacity: usize },
    /// No candidate satisfied the constraints within the attempt cap.
    Exhausted { attempts: usize },
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationFailure::Infeasible { .. } => write!(f, "Too many required digits"),
            GenerationFailure::Exhausted { .. } => {
                write!(f, "Infinite loop? Can't find suitable operands")
            }
        }
    }
}

/// Everything a caller needs to show one problem and check the answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub round_id: String,
    pub base: Base,
    pub operator: Operator,
    pub length: usize,
    pub operands: OperandSet,
    pub result: u128,
    /// `result` rendered in `base`, lowercase, no leading zeros.
    pub result_digits: String,
    pub failure: Option<GenerationFailure>,
}

impl Round {
    /// True if `guess` is exactly the rendered result.
    pub fn is_correct(&self, guess: &str) -> bool {
        !guess.is_empty() && guess == self.result_digits
    }
}

/// Request for a single round.
#[derive(Debug, Clone)]
pub struct RoundRequest<'a> {
    pub config: &'a crate::drill_engine::config::OperandConfig,
    pub rng_seed: Option<u64>,
}
