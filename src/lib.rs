//! Derivative-free minimization of real-valued parameter vectors.
//!
//! Provides two population-based evolutionary strategies for black-box,
//! possibly non-differentiable cost functions:
//!
//! - **G3 + PCX**: Generalized generation gap model with parent-centric
//!   crossover. Elitist, replaces up to two members per step.
//! - **Steady-state DE**: Differential evolution over a flat population
//!   table, one replacement attempt per step.
//!
//! Users implement [`Problem`]; strategies implement [`Strategy`] and are
//! driven by repeated [`Strategy::evolve`] calls. There is no built-in
//! termination criterion: the caller decides when to stop.
//!
//! # Architecture
//!
//! - [`types`]: [`Problem`] and [`Strategy`] contracts
//! - [`recombinator`]: [`recombinator::Recombinator`] trait with PCX and DE operators
//! - [`g3`], [`de`]: the two strategies and their configs
//! - [`random`]: generator construction, normal deviates, Fisher–Yates shuffles
//!
//! Everything is single-threaded and synchronous. A strategy owns its
//! problem, recombinator and generator; nothing is shared between instances.

pub mod de;
mod error;
pub mod g3;
pub mod random;
pub mod recombinator;
pub mod types;

pub use error::ConfigError;
pub use types::{Problem, Strategy};
