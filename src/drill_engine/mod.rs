//! Core drill engine: constrained operand generation and arithmetic.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: bases, operators, digit sets, operands, rounds |
//! | `errors`    | Configuration errors |
//! | `digits`    | Digit-set algebra and radix conversion |
//! | `pattern`   | Compiled per-digit pairing rules between operands |
//! | `config`    | Validated, immutable `OperandConfig` and its builder |
//! | `sampler`   | Bounded rejection sampling of operand digit strings |
//! | `policy`    | Per-operator adjustment, trivial-operand filter, result |
//! | `generator` | Entry points `generate_round()` / `generate_round_with()` |

pub mod config;
pub mod digits;
pub mod errors;
pub mod generator;
pub mod models;
pub mod pattern;
pub mod policy;
pub mod sampler;

// Re-export the public API surface so callers can use
// `drill_engine::generate_round` without reaching into sub-modules.
pub use config::{OperandConfig, OperandConfigBuilder};
pub use errors::ConfigError;
pub use generator::{generate_round, generate_round_with};
pub use models::{
    Base, DigitSet, GenerationFailure, Operand, OperandSet, Operator, Round, RoundRequest,
};
pub use pattern::PatternTable;
