//! Generalized Generation Gap (G3) strategy.
//!
//! An elitist steady-generation model designed around parent-centric
//! crossover. The best individual is always kept in slot 0 and always
//! takes part in recombination; each step replaces at most two randomly
//! sampled members with better offspring.
//!
//! # Key Types
//!
//! - [`G3Config`]: Population size, offspring per step, seed
//! - [`G3Strategy`]: The strategy itself, driven through [`crate::Strategy`]
//!
//! # References
//!
//! - Deb, Anand & Joshi (2002), "A Computationally Efficient Evolutionary
//!   Algorithm for Real-Parameter Optimization", *Evolutionary Computation*
//!   10(4), 371–395

mod config;
mod strategy;

pub use config::G3Config;
pub use strategy::G3Strategy;
