//! G3 configuration.

use crate::ConfigError;

/// Configuration for the G3 strategy.
///
/// # Defaults
///
/// ```
/// use u_realopt::g3::G3Config;
///
/// let config = G3Config::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.num_offspring, 2);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_realopt::g3::G3Config;
///
/// let config = G3Config::default()
///     .with_population_size(30)
///     .with_num_offspring(4)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct G3Config {
    /// Number of individuals in the population.
    ///
    /// Must be at least the recombinator's parent count plus 2.
    pub population_size: usize,

    /// Offspring produced per `evolve()` call.
    pub num_offspring: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for G3Config {
    fn default() -> Self {
        Self {
            population_size: 100,
            num_offspring: 2,
            seed: None,
        }
    }
}

impl G3Config {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of offspring per step.
    pub fn with_num_offspring(mut self, n: usize) -> Self {
        self.num_offspring = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration against a recombinator arity.
    pub fn validate(&self, num_parents: usize) -> Result<(), ConfigError> {
        if num_parents < 1 {
            return Err(ConfigError::InvalidParentCount { min: 1, got: 0 });
        }
        let min = num_parents + 2;
        if self.population_size < min {
            return Err(ConfigError::PopulationTooSmall {
                min,
                got: self.population_size,
            });
        }
        if self.num_offspring == 0 {
            return Err(ConfigError::ZeroOffspring);
        }
        Ok(())
    }
}
