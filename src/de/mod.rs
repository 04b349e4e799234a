//! Steady-state Differential Evolution (DE).
//!
//! Keeps the population in one flat table and replaces at most one member
//! per step, sweeping the population cyclically. Running best and average
//! statistics are maintained incrementally, with the cost sum resynchronized
//! once per sweep.
//!
//! # Key Types
//!
//! - [`DeConfig`]: Population size and seed
//! - [`DeStrategy`]: The strategy itself, driven through [`crate::Strategy`]
//!
//! # References
//!
//! - Storn & Price (1995), "Differential Evolution - a Simple and Efficient
//!   Adaptive Scheme for Global Optimization over Continuous Spaces",
//!   ICSI TR-95-012
//! - Storn & Price (1997), *J. Global Optimization* 11(4), 341–359

mod config;
mod strategy;

pub use config::DeConfig;
pub use strategy::DeStrategy;
