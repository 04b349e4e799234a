//! Differential evolution recombination.

use super::types::Recombinator;
use crate::ConfigError;
use rand::{Rng, RngCore};

/// DE/rand/1 mutation with cyclic exponential crossover.
///
/// Takes four parents: `parents[0]` is the base (target) vector and
/// `parents[1..4]` are the donors. Starting at a random dimension and
/// wrapping around, a contiguous run of dimensions is set to
/// `p1 + c * (p2 - p3)`; every other dimension copies `p0`.
///
/// The first dimension of the run is always mutated. After each mutated
/// dimension a uniform draw `u` in `[0, 1)` decides whether the run
/// continues (`u <= cr`) or ends (`u > cr`). `cr = 1` therefore mutates
/// every dimension and `cr = 0` exactly one.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeRecombinator {
    cr: f64,
    c: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    num_dimensions: usize,
}

impl Default for DeRecombinator {
    /// `cr = 1.0`, `c = 0.61803398875` (golden ratio conjugate).
    fn default() -> Self {
        Self {
            cr: 1.0,
            c: 0.61803398875,
            num_dimensions: 0,
        }
    }
}

impl DeRecombinator {
    /// Creates a DE operator.
    ///
    /// # Arguments
    /// * `cr` - Crossover continuation probability in `[0, 1]`.
    /// * `c` - Weight of the donor difference vector, `>= 0`.
    pub fn new(cr: f64, c: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&cr) {
            return Err(ConfigError::InvalidParameter {
                name: "cr",
                value: cr,
            });
        }
        if !c.is_finite() || c < 0.0 {
            return Err(ConfigError::InvalidParameter { name: "c", value: c });
        }
        Ok(Self {
            cr,
            c,
            num_dimensions: 0,
        })
    }

    /// Crossover continuation probability.
    pub fn cr(&self) -> f64 {
        self.cr
    }

    /// Difference vector weight.
    pub fn c(&self) -> f64 {
        self.c
    }
}

impl Recombinator for DeRecombinator {
    fn set_num_dimensions(&mut self, num_dimensions: usize) -> Result<(), ConfigError> {
        if num_dimensions == 0 {
            return Err(ConfigError::ZeroDimensions);
        }
        self.num_dimensions = num_dimensions;
        Ok(())
    }

    /// Target plus `p1 + c * (p2 - p3)`.
    fn num_parents(&self) -> usize {
        4
    }

    fn recombine(&mut self, dest: &mut [f64], parents: &[&[f64]], rng: &mut dyn RngCore) {
        debug_assert_eq!(parents.len(), 4);
        let d = self.num_dimensions;
        debug_assert_eq!(dest.len(), d);
        let (base, p1, p2, p3) = (parents[0], parents[1], parents[2], parents[3]);

        let mut pos = rng.random_range(0..d);
        let mut count = 0;
        while count < d {
            dest[pos] = p1[pos] + self.c * (p2[pos] - p3[pos]);
            pos = (pos + 1) % d;
            count += 1;
            if rng.random::<f64>() > self.cr {
                while count < d {
                    dest[pos] = base[pos];
                    pos = (pos + 1) % d;
                    count += 1;
                }
            }
        }
    }
}
