//! Random number helpers shared by every strategy.
//!
//! - [`create_rng`] / [`rng_from_seed`]: reproducible generator construction
//! - [`normal`]: Gaussian deviate with explicit mean and standard deviation
//! - [`shuffle`] / [`partial_shuffle`]: forward Fisher–Yates permutations
//!
//! # References
//!
//! - Fisher & Yates (1938), *Statistical Tables*
//! - Durstenfeld (1964), "Algorithm 235: Random permutation"

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Creates a deterministic generator from a 64-bit seed.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator from an optional seed.
///
/// `None` draws a fresh seed from the thread-local generator.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => create_rng(seed),
        None => create_rng(rand::random()),
    }
}

/// Draws a normal deviate `N(mean, sd²)`.
///
/// Computed as `mean + sd * z` with `z ~ N(0, 1)`, so `sd == 0` returns
/// exactly `mean`. A non-finite `sd` propagates into the result.
pub fn normal<R: Rng + ?Sized>(rng: &mut R, mean: f64, sd: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + sd * z
}

/// Uniformly permutes `items` in place.
///
/// For each position `t` in order, swaps it with a uniformly chosen
/// position in `t..n`.
///
/// # Complexity
/// O(n)
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    let n = items.len();
    partial_shuffle(items, n, rng);
}

/// Shuffles only the first `k` positions of `items`.
///
/// On return `items[..k]` holds `k` elements drawn uniformly without
/// replacement from the whole slice. The tail `items[k..]` holds the
/// remaining elements in an unspecified order. With `k == items.len()`
/// this consumes the generator exactly like [`shuffle`].
///
/// # Complexity
/// O(k)
///
/// # Panics
/// Panics if `k > items.len()`.
pub fn partial_shuffle<T, R: Rng + ?Sized>(items: &mut [T], k: usize, rng: &mut R) {
    let n = items.len();
    assert!(k <= n, "cannot shuffle {k} of {n} items");
    for t in 0..k {
        let u = rng.random_range(t..n);
        items.swap(t, u);
    }
}
