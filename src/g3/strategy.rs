//! G3 generational elitist strategy.

use super::config::G3Config;
use crate::random::{partial_shuffle, rng_from_seed};
use crate::recombinator::{ParentRefs, PcxRecombinator, Recombinator};
use crate::types::{check_bounds, Problem, Strategy};
use crate::ConfigError;
use rand::rngs::StdRng;
use rand::Rng;

/// A parameter vector with its cached cost.
#[derive(Debug, Clone)]
struct Individual {
    cost: f64,
    vector: Vec<f64>,
}

/// Generalized generation gap (G3) strategy.
///
/// Slot 0 of the population always holds the best individual found so far.
/// Each [`evolve`](Strategy::evolve) call:
///
/// 1. Draws `num_parents - 1` parents plus two replacement candidates from
///    slots `1..` by partial shuffle. Together with slot 0 they fill slots
///    `0..num_parents + 2`.
/// 2. Picks one of the parents uniformly at random as the recombination center.
/// 3. Produces `num_offspring` children. Each child replaces the weaker of
///    the two candidates if it is strictly better.
/// 4. Promotes the stronger candidate to slot 0 if it beats the incumbent.
///
/// # Examples
///
/// ```
/// use u_realopt::g3::{G3Config, G3Strategy};
/// use u_realopt::recombinator::PcxRecombinator;
/// use u_realopt::{Problem, Strategy};
///
/// struct Sphere;
///
/// impl Problem for Sphere {
///     fn num_dimensions(&self) -> usize { 2 }
///     fn lower_bounds(&self) -> &[f64] { &[-1.0, -1.0] }
///     fn upper_bounds(&self) -> &[f64] { &[1.0, 1.0] }
///     fn cost(&self, p: &mut [f64], _compare: f64) -> f64 {
///         p.iter().map(|x| x * x).sum()
///     }
/// }
///
/// let config = G3Config::default().with_population_size(30).with_seed(42);
/// let mut g3 = G3Strategy::new(Sphere, PcxRecombinator::default(), config).unwrap();
/// let start = g3.best_cost();
/// for _ in 0..500 {
///     g3.evolve();
/// }
/// assert!(g3.best_cost() <= start);
/// ```
///
/// # Reference
///
/// Deb, Anand & Joshi (2002), KanGAL Report 2002003
pub struct G3Strategy<P, C = PcxRecombinator> {
    problem: P,
    recombinator: C,
    population: Vec<Individual>,
    offspring: Individual,
    parent_order: Vec<usize>,
    num_offspring: usize,
    rng: StdRng,
}

impl<P: Problem, C: Recombinator> G3Strategy<P, C> {
    /// Builds the strategy and evaluates a random initial population.
    ///
    /// Every vector is drawn uniformly inside the problem's bounds and
    /// evaluated without an early-exit threshold. The lowest-cost
    /// individual is placed in slot 0.
    pub fn new(problem: P, mut recombinator: C, config: G3Config) -> Result<Self, ConfigError> {
        let dim = problem.num_dimensions();
        check_bounds(dim, problem.lower_bounds(), problem.upper_bounds())?;
        recombinator.set_num_dimensions(dim)?;
        let num_parents = recombinator.num_parents();
        config.validate(num_parents)?;

        let mut rng = rng_from_seed(config.seed);
        let lower = problem.lower_bounds();
        let upper = problem.upper_bounds();
        let mut population: Vec<Individual> = (0..config.population_size)
            .map(|_| {
                let mut vector: Vec<f64> = lower
                    .iter()
                    .zip(upper)
                    .map(|(&lo, &hi)| lo + (hi - lo) * rng.random::<f64>())
                    .collect();
                let cost = problem.cost(&mut vector, f64::MAX);
                Individual { cost, vector }
            })
            .collect();

        let best = find_best(&population);
        population.swap(0, best);

        log::debug!(
            "g3: population={} dimensions={} parents={} initial best={:e}",
            population.len(),
            dim,
            num_parents,
            population[0].cost
        );

        Ok(Self {
            problem,
            recombinator,
            population,
            offspring: Individual {
                cost: f64::MAX,
                vector: vec![0.0; dim],
            },
            parent_order: (0..num_parents).collect(),
            num_offspring: config.num_offspring,
            rng,
        })
    }

    /// The problem being minimized.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Number of individuals in the population.
    pub fn population_size(&self) -> usize {
        self.population.len()
    }

    /// Cached costs in slot order. Slot 0 is the best.
    pub fn costs(&self) -> impl Iterator<Item = f64> + '_ {
        self.population.iter().map(|ind| ind.cost)
    }
}

impl<P: Problem, C: Recombinator> Strategy for G3Strategy<P, C> {
    fn evolve(&mut self) -> f64 {
        let num_parents = self.parent_order.len();

        // Slot 0 stays put; slots 1..num_parents + 2 get a random sample.
        partial_shuffle(&mut self.population[1..], num_parents + 1, &mut self.rng);

        for (i, slot) in self.parent_order.iter_mut().enumerate() {
            *slot = i;
        }
        let center = self.rng.random_range(0..num_parents);
        self.parent_order.swap(0, center);

        // Parents live in the head, the two candidates at the front of the tail.
        let (head, tail) = self.population.split_at_mut(num_parents);
        let parents: ParentRefs = self
            .parent_order
            .iter()
            .map(|&i| head[i].vector.as_slice())
            .collect();

        let (mut best, mut next_best) = if tail[1].cost < tail[0].cost {
            (1, 0)
        } else {
            (0, 1)
        };

        for _ in 0..self.num_offspring {
            self.recombinator
                .recombine(&mut self.offspring.vector, &parents, &mut self.rng);

            let threshold = tail[next_best].cost;
            self.offspring.cost = self.problem.cost(&mut self.offspring.vector, threshold);
            if self.offspring.cost < threshold {
                std::mem::swap(&mut tail[next_best], &mut self.offspring);
                if tail[next_best].cost < tail[best].cost {
                    std::mem::swap(&mut best, &mut next_best);
                }
            }
        }
        drop(parents);

        let best = num_parents + best;
        if self.population[best].cost < self.population[0].cost {
            self.population.swap(0, best);
            log::trace!("g3: new best {:e}", self.population[0].cost);
        }

        self.population[0].cost
    }

    /// Valid until the next `evolve()`, which may move slot 0's vector.
    fn best(&self) -> &[f64] {
        &self.population[0].vector
    }

    fn best_cost(&self) -> f64 {
        self.population[0].cost
    }

    /// O(population size).
    fn average_cost(&self) -> f64 {
        let sum: f64 = self.population.iter().map(|ind| ind.cost).sum();
        sum / self.population.len() as f64
    }
}

/// Index of the individual with the lowest cost.
fn find_best(population: &[Individual]) -> usize {
    population
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.cost
                .partial_cmp(&b.cost)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

// ============================================================================
// Tests
// ============================================================================
