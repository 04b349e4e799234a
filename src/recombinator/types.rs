//! Recombinator trait.

use crate::ConfigError;
use rand::RngCore;
use smallvec::SmallVec;

/// Parent slices handed to [`Recombinator::recombine`]. Stays on the stack
/// for arities up to 8.
pub(crate) type ParentRefs<'a> = SmallVec<[&'a [f64]; 8]>;

/// Produces one offspring from a fixed number of parents.
///
/// # Call order
///
/// 1. [`set_num_dimensions`](Recombinator::set_num_dimensions) once, before first use
/// 2. [`num_parents`](Recombinator::num_parents) at any time afterwards
/// 3. [`recombine`](Recombinator::recombine) any number of times
///
/// The trait is object-safe, so a strategy can hold a
/// `Box<dyn Recombinator>` chosen at runtime.
pub trait Recombinator {
    /// Sizes internal scratch space for vectors of `num_dimensions` values.
    fn set_num_dimensions(&mut self, num_dimensions: usize) -> Result<(), ConfigError>;

    /// Number of parent vectors [`recombine`](Recombinator::recombine) expects.
    ///
    /// Constant for the lifetime of the instance.
    fn num_parents(&self) -> usize;

    /// Writes one offspring into `dest`.
    ///
    /// `parents` holds exactly [`num_parents`](Recombinator::num_parents)
    /// slices, each of the configured length, as does `dest`.
    fn recombine(&mut self, dest: &mut [f64], parents: &[&[f64]], rng: &mut dyn RngCore);
}

impl<T: Recombinator + ?Sized> Recombinator for Box<T> {
    fn set_num_dimensions(&mut self, num_dimensions: usize) -> Result<(), ConfigError> {
        (**self).set_num_dimensions(num_dimensions)
    }

    fn num_parents(&self) -> usize {
        (**self).num_parents()
    }

    fn recombine(&mut self, dest: &mut [f64], parents: &[&[f64]], rng: &mut dyn RngCore) {
        (**self).recombine(dest, parents, rng)
    }
}
