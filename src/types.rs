//! Core trait definitions.
//!
//! [`Problem`] is the contract between the engine and a domain-specific
//! cost function. [`Strategy`] is the contract every search algorithm in
//! this crate fulfils towards its caller.

/// Defines a real-parameter minimization problem.
///
/// # Normalizing cost functions
///
/// [`cost`](Problem::cost) receives the parameter vector mutably and may
/// rewrite it (wraparound, symmetry folding, constraint repair). The
/// strategies always store the possibly rewritten vector, never a copy
/// taken before evaluation.
///
/// # Early exit
///
/// The `compare` argument is the cost the candidate has to beat. Once the
/// evaluation is certain to end at or above `compare`, it may stop early
/// and return any value `>= compare`. Returning the exact cost is always
/// correct.
///
/// # Examples
///
/// ```
/// use u_realopt::Problem;
///
/// struct Sphere {
///     lower: Vec<f64>,
///     upper: Vec<f64>,
/// }
///
/// impl Problem for Sphere {
///     fn num_dimensions(&self) -> usize {
///         self.lower.len()
///     }
///     fn lower_bounds(&self) -> &[f64] {
///         &self.lower
///     }
///     fn upper_bounds(&self) -> &[f64] {
///         &self.upper
///     }
///     fn cost(&self, params: &mut [f64], _compare: f64) -> f64 {
///         params.iter().map(|x| x * x).sum()
///     }
/// }
/// ```
pub trait Problem {
    /// Number of parameters being optimized. Must be positive and constant.
    fn num_dimensions(&self) -> usize;

    /// Lower initialization bound per parameter.
    ///
    /// Bounds are advisory: they shape the initial population only, and
    /// the search may leave the box.
    fn lower_bounds(&self) -> &[f64];

    /// Upper initialization bound per parameter.
    fn upper_bounds(&self) -> &[f64];

    /// Returns the cost of `params`. Lower is better.
    ///
    /// Must be total: the engine has no channel for evaluation failures.
    fn cost(&self, params: &mut [f64], compare: f64) -> f64;

    /// Renders a parameter vector for diagnostics.
    fn format_params(&self, params: &[f64]) -> String {
        params
            .iter()
            .map(|p| format!("{p:.17}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// A population-based search algorithm driven one step at a time.
///
/// There is no built-in termination: the caller decides how many times
/// to call [`evolve`](Strategy::evolve).
pub trait Strategy {
    /// Performs one search step and returns the best cost known afterwards.
    fn evolve(&mut self) -> f64;

    /// Best parameter vector found so far.
    ///
    /// The borrow ends before the next call to [`evolve`](Strategy::evolve),
    /// which may move or overwrite the underlying slot.
    fn best(&self) -> &[f64];

    /// Cost of [`best`](Strategy::best).
    fn best_cost(&self) -> f64;

    /// Mean cost over the whole population.
    fn average_cost(&self) -> f64;
}

/// Checks that the problem's bounds match its dimensionality.
pub(crate) fn check_bounds(
    num_dimensions: usize,
    lower: &[f64],
    upper: &[f64],
) -> Result<(), crate::ConfigError> {
    if num_dimensions == 0 {
        return Err(crate::ConfigError::ZeroDimensions);
    }
    if lower.len() != num_dimensions || upper.len() != num_dimensions {
        return Err(crate::ConfigError::BoundsLengthMismatch {
            expected: num_dimensions,
            lower: lower.len(),
            upper: upper.len(),
        });
    }
    Ok(())
}
