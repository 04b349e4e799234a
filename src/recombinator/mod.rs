//! Recombination operators for real-valued parameter vectors.
//!
//! A [`Recombinator`] turns a fixed number of parent vectors into one
//! offspring vector. Strategies configure the dimensionality once, ask
//! for the parent arity, then call [`Recombinator::recombine`] as often
//! as they like.
//!
//! # Operators
//!
//! - [`PcxRecombinator`]: parent-centric crossover (PCX), used by G3
//! - [`DeRecombinator`]: differential mutation with cyclic crossover, used by DE
//!
//! # References
//!
//! - Deb, Anand & Joshi (2002), "A Computationally Efficient Evolutionary
//!   Algorithm for Real-Parameter Optimization", KanGAL Report 2002003
//! - Storn & Price (1995), "Differential Evolution - a Simple and Efficient
//!   Adaptive Scheme for Global Optimization over Continuous Spaces",
//!   ICSI TR-95-012

mod de;
mod pcx;
mod types;

pub use de::DeRecombinator;
pub use pcx::{squared_perpendicular_distance, PcxRecombinator};
pub(crate) use types::ParentRefs;
pub use types::Recombinator;
