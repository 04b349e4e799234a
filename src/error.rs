//! Construction-time errors.
//!
//! Every fallible operation in this crate happens while building a
//! recombinator or a strategy. Once constructed, `evolve()` cannot fail.

use thiserror::Error;

/// Invalid configuration detected before any evolution step runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The recombinator needs more parents than were requested.
    #[error("parent count must be at least {min}, got {got}")]
    InvalidParentCount { min: usize, got: usize },

    /// The problem reports zero parameters.
    #[error("problem must have at least one dimension")]
    ZeroDimensions,

    /// The population cannot supply the parents a step needs.
    #[error("population size must be at least {min}, got {got}")]
    PopulationTooSmall { min: usize, got: usize },

    /// Bound vectors do not match the problem dimensionality.
    #[error("bounds must have {expected} entries, got lower={lower} upper={upper}")]
    BoundsLengthMismatch {
        expected: usize,
        lower: usize,
        upper: usize,
    },

    /// A numeric parameter is non-finite or out of range.
    #[error("invalid value for `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    /// The generational strategy must produce at least one offspring per step.
    #[error("num_offspring must be at least 1")]
    ZeroOffspring,
}
