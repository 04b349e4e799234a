//! Steady-state differential evolution.

use super::config::DeConfig;
use crate::random::{partial_shuffle, rng_from_seed};
use crate::recombinator::{DeRecombinator, ParentRefs, Recombinator};
use crate::types::{check_bounds, Problem, Strategy};
use crate::ConfigError;
use rand::rngs::StdRng;
use rand::{Rng, RngCore};

/// Steady-state differential evolution strategy.
///
/// The population is one flat table of `population_size * num_dimensions`
/// values with a parallel cost array. A cursor sweeps the population; each
/// [`evolve`](Strategy::evolve) call makes exactly one replacement attempt
/// against the member under the cursor:
///
/// 1. Draws `num_parents - 1` distinct donors by partial shuffle of an index
///    table. The target itself may be among them.
/// 2. Recombines target and donors into a trial vector.
/// 3. Evaluates the trial with the target's cost as early-exit threshold and
///    keeps it if strictly better.
///
/// The population sum of costs is maintained incrementally and replaced by
/// a freshly accumulated sum at the end of every sweep, which bounds
/// floating-point drift.
///
/// # Examples
///
/// ```
/// use u_realopt::de::{DeConfig, DeStrategy};
/// use u_realopt::recombinator::DeRecombinator;
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
/// let recombinator = DeRecombinator::new(0.9, 0.7).unwrap();
/// let config = DeConfig::default().with_population_size(30).with_seed(42);
/// let mut de = DeStrategy::new(Sphere, recombinator, config).unwrap();
/// for _ in 0..3000 {
///     de.evolve();
/// }
/// assert!(de.best_cost() < 1e-2);
/// ```
///
/// # Reference
///
/// Storn & Price (1995), ICSI TR-95-012
pub struct DeStrategy<P, C = DeRecombinator> {
    problem: P,
    recombinator: C,
    num_dimensions: usize,
    num_parents: usize,
    population: Vec<f64>,
    costs: Vec<f64>,
    permuter: Vec<usize>,
    trial: Vec<f64>,
    best: usize,
    best_cost: f64,
    sum_cost: f64,
    gen_cost: f64,
    pos: usize,
    rng: StdRng,
}

impl<P: Problem, C: Recombinator> DeStrategy<P, C> {
    /// Builds the strategy with a random population inside the problem's
    /// bounds and evaluates every member.
    pub fn new(problem: P, mut recombinator: C, config: DeConfig) -> Result<Self, ConfigError> {
        let dim = problem.num_dimensions();
        check_bounds(dim, problem.lower_bounds(), problem.upper_bounds())?;
        recombinator.set_num_dimensions(dim)?;
        let num_parents = recombinator.num_parents();
        config.validate(num_parents)?;

        let np = config.population_size;
        let mut rng = rng_from_seed(config.seed);
        let mut population = vec![0.0; np * dim];
        fill_uniform(
            &mut population,
            problem.lower_bounds(),
            problem.upper_bounds(),
            &mut rng,
        );

        let mut strategy = Self {
            problem,
            recombinator,
            num_dimensions: dim,
            num_parents,
            population,
            costs: vec![0.0; np],
            permuter: (0..np).collect(),
            trial: vec![0.0; dim],
            best: 0,
            best_cost: f64::INFINITY,
            sum_cost: 0.0,
            gen_cost: 0.0,
            pos: 0,
            rng,
        };
        strategy.statistics();

        log::debug!(
            "de: population={} dimensions={} parents={} initial best={:e}",
            np,
            dim,
            num_parents,
            strategy.best_cost
        );
        Ok(strategy)
    }

    /// Re-evaluates every member and rebuilds all cached aggregates.
    ///
    /// O(population size) cost evaluations. Call this after anything that
    /// changes what the cost function returns, e.g. a parameter changed
    /// through [`problem_mut`](Self::problem_mut). `evolve()` never calls it.
    pub fn statistics(&mut self) {
        let d = self.num_dimensions;
        self.best = 0;
        self.best_cost = f64::INFINITY;
        self.sum_cost = 0.0;
        for (i, (member, cost)) in self
            .population
            .chunks_exact_mut(d)
            .zip(self.costs.iter_mut())
            .enumerate()
        {
            *cost = self.problem.cost(member, f64::MAX);
            self.sum_cost += *cost;
            if *cost < self.best_cost {
                self.best_cost = *cost;
                self.best = i;
            }
        }
        // Members before the cursor were already swept this round.
        self.gen_cost = self.costs[..self.pos].iter().sum();
    }

    /// Redraws every member uniformly inside `[lower, upper]`, re-evaluates
    /// the population and restarts the sweep at member 0.
    pub fn random_population(&mut self, lower: &[f64], upper: &[f64]) -> Result<(), ConfigError> {
        check_bounds(self.num_dimensions, lower, upper)?;
        fill_uniform(&mut self.population, lower, upper, &mut self.rng);
        self.pos = 0;
        self.statistics();
        Ok(())
    }

    /// Index of the member the next `evolve()` call will target.
    ///
    /// `0` marks the start of a sweep.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Parameter vector of member `index`.
    ///
    /// # Panics
    /// Panics if `index >= population_size()`.
    pub fn member(&self, index: usize) -> &[f64] {
        let d = self.num_dimensions;
        &self.population[index * d..(index + 1) * d]
    }

    /// Cached cost of every member.
    pub fn costs(&self) -> &[f64] {
        &self.costs
    }

    /// Index of the best member. Stable until that slot is improved upon.
    pub fn best_index(&self) -> usize {
        self.best
    }

    /// Number of members in the population.
    pub fn population_size(&self) -> usize {
        self.costs.len()
    }

    /// The problem being minimized.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Mutable access to the problem.
    ///
    /// Cached costs go stale if the cost function changes; call
    /// [`statistics`](Self::statistics) afterwards.
    pub fn problem_mut(&mut self) -> &mut P {
        &mut self.problem
    }
}

impl<P: Problem, C: Recombinator> Strategy for DeStrategy<P, C> {
    fn evolve(&mut self) -> f64 {
        let d = self.num_dimensions;
        let pos = self.pos;
        let num_donors = self.num_parents - 1;

        partial_shuffle(&mut self.permuter, num_donors, &mut self.rng);
        {
            let population = &self.population;
            let mut parents = ParentRefs::new();
            parents.push(&population[pos * d..(pos + 1) * d]);
            parents.extend(
                self.permuter[..num_donors]
                    .iter()
                    .map(|&i| &population[i * d..(i + 1) * d]),
            );
            self.recombinator
                .recombine(&mut self.trial, &parents, &mut self.rng);
        }

        let current = self.costs[pos];
        let trial_cost = self.problem.cost(&mut self.trial, current);
        if trial_cost < current {
            self.population[pos * d..(pos + 1) * d].copy_from_slice(&self.trial);
            self.sum_cost -= current;
            self.sum_cost += trial_cost;
            self.costs[pos] = trial_cost;
            if trial_cost < self.best_cost {
                self.best_cost = trial_cost;
                self.best = pos;
                log::trace!("de: new best {:e} at member {}", trial_cost, pos);
            }
        }

        self.gen_cost += self.costs[pos];
        self.pos += 1;
        if self.pos >= self.costs.len() {
            log::trace!(
                "de: sweep complete, resync sum drift={:e}",
                self.sum_cost - self.gen_cost
            );
            self.pos = 0;
            self.sum_cost = self.gen_cost;
            self.gen_cost = 0.0;
        }

        self.best_cost
    }

    /// Stable until the best member is itself improved upon.
    fn best(&self) -> &[f64] {
        self.member(self.best)
    }

    fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// O(1) from the maintained cost sum.
    fn average_cost(&self) -> f64 {
        self.sum_cost / self.costs.len() as f64
    }
}

/// Fills a flat member table uniformly inside per-dimension bounds.
fn fill_uniform<R: RngCore + ?Sized>(
    population: &mut [f64],
    lower: &[f64],
    upper: &[f64],
    rng: &mut R,
) {
    for member in population.chunks_exact_mut(lower.len()) {
        for ((x, &lo), &hi) in member.iter_mut().zip(lower).zip(upper) {
            *x = lo + (hi - lo) * rng.random::<f64>();
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recombinator::PcxRecombinator;

    // ---- Scaled sphere: f(x) = scale * sum(x_i^2) ----

    struct Sphere {
        lower: Vec<f64>,
        upper: Vec<f64>,
        scale: f64,
    }

    impl Sphere {
        fn new(dim: usize, bound: f64) -> Self {
            Self {
                lower: vec![-bound; dim],
                upper: vec![bound; dim],
                scale: 1.0,
            }
        }
    }

    impl Problem for Sphere {
        fn num_dimensions(&self) -> usize {
            self.lower.len()
        }
        fn lower_bounds(&self) -> &[f64] {
            &self.lower
        }
        fn upper_bounds(&self) -> &[f64] {
            &self.upper
        }
        fn cost(&self, params: &mut [f64], _compare: f64) -> f64 {
            self.scale * params.iter().map(|x| x * x).sum::<f64>()
        }
    }

    // ---- Sphere that abandons evaluation once it cannot win ----

    struct EarlyExitSphere;

    impl Problem for EarlyExitSphere {
        fn num_dimensions(&self) -> usize {
            4
        }
        fn lower_bounds(&self) -> &[f64] {
            &[-3.0; 4]
        }
        fn upper_bounds(&self) -> &[f64] {
            &[3.0; 4]
        }
        fn cost(&self, params: &mut [f64], compare: f64) -> f64 {
            let mut sum = 0.0;
            for x in params.iter() {
                sum += x * x;
                if sum >= compare {
                    return sum;
                }
            }
            sum
        }
    }

    // ---- Wraps parameters into [0, 1) before scoring ----

    struct Periodic;

    impl Problem for Periodic {
        fn num_dimensions(&self) -> usize {
            2
        }
        fn lower_bounds(&self) -> &[f64] {
            &[-4.0, -4.0]
        }
        fn upper_bounds(&self) -> &[f64] {
            &[4.0, 4.0]
        }
        fn cost(&self, params: &mut [f64], _compare: f64) -> f64 {
            for p in params.iter_mut() {
                *p = p.rem_euclid(1.0);
            }
            params.iter().map(|x| (x - 0.25).powi(2)).sum()
        }
    }

    fn sphere_de(pop: usize, seed: u64) -> DeStrategy<Sphere> {
        let config = DeConfig::default().with_population_size(pop).with_seed(seed);
        DeStrategy::new(
            Sphere::new(2, 1.0),
            DeRecombinator::new(0.9, 0.7).unwrap(),
            config,
        )
        .unwrap()
    }

    fn assert_aggregates<P: Problem, C: Recombinator>(de: &DeStrategy<P, C>) {
        let n = de.population_size() as f64;
        let recomputed = de.costs().iter().sum::<f64>() / n;
        let tol = 1e-9 * recomputed.abs().max(f64::MIN_POSITIVE);
        assert!(
            (de.average_cost() - recomputed).abs() <= tol,
            "average {} drifted from {}",
            de.average_cost(),
            recomputed
        );
        let min = de.costs().iter().cloned().fold(f64::INFINITY, f64::min);
        assert_eq!(de.best_cost(), min);
        assert_eq!(de.costs()[de.best_index()], min);
    }

    #[test]
    fn test_rejects_small_population() {
        let config = DeConfig::default().with_population_size(2);
        let result = DeStrategy::new(Sphere::new(2, 1.0), DeRecombinator::default(), config);
        assert_eq!(
            result.err(),
            Some(ConfigError::PopulationTooSmall { min: 3, got: 2 })
        );
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        let result = DeStrategy::new(
            Sphere::new(0, 1.0),
            DeRecombinator::default(),
            DeConfig::default(),
        );
        assert_eq!(result.err(), Some(ConfigError::ZeroDimensions));
    }

    #[test]
    fn test_minimum_population_evolves() {
        // Three members: the donor triple always contains the target.
        let mut de = sphere_de(3, 42);
        for _ in 0..100 {
            de.evolve();
        }
        assert_aggregates(&de);
    }

    #[test]
    fn test_aggregates_after_construction() {
        let de = sphere_de(30, 42);
        assert_eq!(de.position(), 0);
        assert_aggregates(&de);
        let mut best = de.best().to_vec();
        assert_eq!(de.problem().cost(&mut best, f64::MAX), de.best_cost());
    }

    #[test]
    fn test_aggregates_after_many_steps() {
        let mut de = sphere_de(30, 7);
        // Stop mid-sweep so the incremental sum is the one checked.
        for _ in 0..3_017 {
            de.evolve();
        }
        assert_ne!(de.position(), 0);
        assert_aggregates(&de);
    }

    #[test]
    fn test_position_wraps_after_sweep() {
        let mut de = sphere_de(10, 1);
        for i in 1..=25 {
            de.evolve();
            assert_eq!(de.position(), i % 10);
        }
    }

    #[test]
    fn test_evolve_non_increasing() {
        let mut de = sphere_de(30, 3);
        let mut prev = de.best_cost();
        for _ in 0..5000 {
            let cost = de.evolve();
            assert!(cost <= prev, "best cost increased: {cost} > {prev}");
            prev = cost;
        }
    }

    #[test]
    fn test_sphere_convergence() {
        let mut de = sphere_de(30, 42);
        for _ in 0..5000 {
            de.evolve();
        }
        assert!(
            de.best_cost() < 1e-4,
            "expected cost < 1e-4 for 2D sphere, got {}",
            de.best_cost()
        );
    }

    #[test]
    fn test_cached_costs_match_members() {
        let mut de = sphere_de(20, 5);
        for _ in 0..1000 {
            de.evolve();
        }
        for i in 0..de.population_size() {
            let mut v = de.member(i).to_vec();
            assert_eq!(de.problem().cost(&mut v, f64::MAX), de.costs()[i]);
        }
    }

    #[test]
    fn test_early_exit_keeps_exact_costs() {
        let config = DeConfig::default().with_population_size(20).with_seed(42);
        let mut de = DeStrategy::new(
            EarlyExitSphere,
            DeRecombinator::new(0.9, 0.7).unwrap(),
            config,
        )
        .unwrap();
        let start = de.best_cost();
        for _ in 0..2000 {
            de.evolve();
        }
        assert!(de.best_cost() < start);
        for i in 0..de.population_size() {
            let mut v = de.member(i).to_vec();
            assert_eq!(de.problem().cost(&mut v, f64::MAX), de.costs()[i]);
        }
        assert_aggregates(&de);
    }

    #[test]
    fn test_stores_normalized_vectors() {
        let config = DeConfig::default().with_population_size(15).with_seed(42);
        let mut de = DeStrategy::new(Periodic, DeRecombinator::default(), config).unwrap();
        for _ in 0..600 {
            de.evolve();
        }
        for i in 0..de.population_size() {
            assert!(de.member(i).iter().all(|x| (0.0..=1.0).contains(x)));
        }
    }

    #[test]
    fn test_statistics_after_problem_change_mid_sweep() {
        let mut de = sphere_de(12, 9);
        for _ in 0..17 {
            de.evolve();
        }
        assert_eq!(de.position(), 5);

        de.problem_mut().scale = 10.0;
        de.statistics();
        assert_aggregates(&de);

        // Crossing the sweep boundary must not resurrect pre-change costs.
        for _ in 0..10 {
            de.evolve();
        }
        assert_aggregates(&de);
        for i in 0..de.population_size() {
            let mut v = de.member(i).to_vec();
            assert_eq!(de.problem().cost(&mut v, f64::MAX), de.costs()[i]);
        }
    }

    #[test]
    fn test_random_population_restarts() {
        let mut de = sphere_de(20, 4);
        for _ in 0..35 {
            de.evolve();
        }
        de.random_population(&[5.0, 5.0], &[6.0, 6.0]).unwrap();
        assert_eq!(de.position(), 0);
        for i in 0..de.population_size() {
            assert!(de.member(i).iter().all(|x| (5.0..6.0).contains(x)));
        }
        assert_aggregates(&de);
    }

    #[test]
    fn test_random_population_rejects_bad_bounds() {
        let mut de = sphere_de(20, 4);
        let err = de.random_population(&[0.0], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, ConfigError::BoundsLengthMismatch { .. }));
    }

    #[test]
    fn test_best_tracks_index() {
        let mut de = sphere_de(30, 8);
        for _ in 0..500 {
            de.evolve();
            assert_eq!(de.best(), de.member(de.best_index()));
        }
    }

    #[test]
    fn test_same_seed_reproducible() {
        let mut a = sphere_de(25, 77);
        let mut b = sphere_de(25, 77);
        for _ in 0..500 {
            assert_eq!(a.evolve(), b.evolve());
        }
        assert_eq!(a.costs(), b.costs());
    }

    #[test]
    fn test_boxed_pcx_recombinator() {
        let recombinator: Box<dyn Recombinator> = Box::new(PcxRecombinator::default());
        let config = DeConfig::default().with_population_size(20).with_seed(42);
        let mut de = DeStrategy::new(Sphere::new(3, 1.0), recombinator, config).unwrap();
        let start = de.best_cost();
        for _ in 0..2000 {
            de.evolve();
        }
        assert!(de.best_cost() < start);
        assert_aggregates(&de);
    }
}
