//! DE configuration.

use crate::ConfigError;

/// Configuration for the steady-state DE strategy.
///
/// # Examples
///
/// ```
/// use u_realopt::de::DeConfig;
///
/// let config = DeConfig::default().with_population_size(40).with_seed(42);
/// assert_eq!(config.population_size, 40);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeConfig {
    /// Number of members in the population.
    ///
    /// Must supply the recombinator's donors: at least `num_parents - 1`.
    pub population_size: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for DeConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            seed: None,
        }
    }
}

impl DeConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
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
        let min = (num_parents - 1).max(1);
        if self.population_size < min {
            return Err(ConfigError::PopulationTooSmall {
                min,
                got: self.population_size,
            });
        }
        Ok(())
    }
}
