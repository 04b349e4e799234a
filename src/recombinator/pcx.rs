//! Parent-centric crossover (PCX).

use super::types::Recombinator;
use crate::random::normal;
use crate::ConfigError;
use rand::RngCore;

/// Squared shortest distance from `point` to the line
/// `point_on_line + a * direction`.
///
/// When `direction` has zero length the line degenerates to
/// `point_on_line` and the plain squared distance is returned. For a point
/// on or near the line, rounding can leave a small negative result.
pub fn squared_perpendicular_distance(
    point_on_line: &[f64],
    direction: &[f64],
    point: &[f64],
) -> f64 {
    let mut dist_sq = 0.0;
    let mut proj = 0.0;
    let mut dir_sq = 0.0;
    for ((&p, &o), &v) in point.iter().zip(point_on_line).zip(direction) {
        let d = p - o;
        dist_sq += d * d;
        proj += v * d;
        dir_sq += v * v;
    }
    if dir_sq == 0.0 {
        dist_sq
    } else {
        dist_sq - proj * proj / dir_sq
    }
}

/// Parent-centric crossover.
///
/// `parents[0]` is the center. The offspring is drawn around it from a
/// Gaussian that is stretched along the direction to the parents' centroid
/// (`sd1 * |centroid - center|`) and spread perpendicular to it according
/// to how far the other parents lie from that axis (`sd2 * rms_perp`).
///
/// A mean vector of exactly zero length falls back to an isotropic Gaussian
/// around the center. Nothing else is guarded: a very short mean vector, or
/// parents lying on the centroid axis (always the case with two parents),
/// can give a negative squared spread whose square root is NaN, and the NaN
/// reaches the offspring.
///
/// # Examples
///
/// ```
/// use u_realopt::recombinator::{PcxRecombinator, Recombinator};
/// use u_realopt::random::create_rng;
///
/// let mut pcx = PcxRecombinator::default();
/// pcx.set_num_dimensions(2).unwrap();
/// let parents: [&[f64]; 3] = [&[0.0, 0.0], &[1.0, 0.0], &[0.0, 1.0]];
/// let mut child = [0.0; 2];
/// pcx.recombine(&mut child, &parents, &mut create_rng(42));
/// assert!(child.iter().all(|x| x.is_finite()));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcxRecombinator {
    num_parents: usize,
    sd1: f64,
    sd2: f64,
    #[cfg_attr(feature = "serde", serde(skip))]
    num_dimensions: usize,
    #[cfg_attr(feature = "serde", serde(skip))]
    mean_vector: Vec<f64>,
}

impl Default for PcxRecombinator {
    /// Three parents, `sd1 = sd2 = 0.1`.
    fn default() -> Self {
        Self {
            num_parents: 3,
            sd1: 0.1,
            sd2: 0.1,
            num_dimensions: 0,
            mean_vector: Vec::new(),
        }
    }
}

impl PcxRecombinator {
    /// Creates a PCX operator.
    ///
    /// # Arguments
    /// * `num_parents` - At least 2; parent 0 is the center.
    /// * `sd1` - Spread scale along the centroid direction.
    /// * `sd2` - Spread scale perpendicular to it.
    pub fn new(num_parents: usize, sd1: f64, sd2: f64) -> Result<Self, ConfigError> {
        if num_parents < 2 {
            return Err(ConfigError::InvalidParentCount {
                min: 2,
                got: num_parents,
            });
        }
        check_scale("sd1", sd1)?;
        check_scale("sd2", sd2)?;
        Ok(Self {
            num_parents,
            sd1,
            sd2,
            ..Self::default()
        })
    }

    /// Spread scale along the centroid direction.
    pub fn sd1(&self) -> f64 {
        self.sd1
    }

    /// Spread scale perpendicular to the centroid direction.
    pub fn sd2(&self) -> f64 {
        self.sd2
    }
}

fn check_scale(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidParameter { name, value });
    }
    Ok(())
}

impl Recombinator for PcxRecombinator {
    fn set_num_dimensions(&mut self, num_dimensions: usize) -> Result<(), ConfigError> {
        if num_dimensions == 0 {
            return Err(ConfigError::ZeroDimensions);
        }
        self.num_dimensions = num_dimensions;
        self.mean_vector = vec![0.0; num_dimensions];
        Ok(())
    }

    fn num_parents(&self) -> usize {
        self.num_parents
    }

    fn recombine(&mut self, dest: &mut [f64], parents: &[&[f64]], rng: &mut dyn RngCore) {
        debug_assert_eq!(parents.len(), self.num_parents);
        debug_assert_eq!(dest.len(), self.num_dimensions);
        let center = parents[0];

        // 1. Vector from the center to the centroid of all parents.
        //    Summing offsets keeps coincident parents at exactly zero.
        self.mean_vector.fill(0.0);
        for parent in &parents[1..] {
            for ((m, &p), &c) in self.mean_vector.iter_mut().zip(parent.iter()).zip(center) {
                *m += p - c;
            }
        }
        let inv_count = 1.0 / self.num_parents as f64;
        let mut mean_len_sq = 0.0;
        for m in self.mean_vector.iter_mut() {
            *m *= inv_count;
            mean_len_sq += *m * *m;
        }

        // 2. RMS distance of the other parents from the centroid axis.
        let mean_sq_dist = parents[1..]
            .iter()
            .map(|p| squared_perpendicular_distance(center, &self.mean_vector, p))
            .sum::<f64>()
            / (self.num_parents - 1) as f64;
        let rms_perp = mean_sq_dist.sqrt();

        // 3. Sample the offspring.
        if mean_len_sq == 0.0 {
            for (d, &c) in dest.iter_mut().zip(center) {
                *d = normal(rng, c, self.sd2 * rms_perp);
            }
            return;
        }

        let mean_len = mean_len_sq.sqrt();
        let mut dot = 0.0;
        for (d, &m) in dest.iter_mut().zip(&self.mean_vector) {
            *d = normal(rng, 0.0, 1.0);
            dot += *d * m;
        }
        for ((d, &m), &c) in dest.iter_mut().zip(&self.mean_vector).zip(center) {
            let along = m * (dot / mean_len_sq);
            *d = c + along * (mean_len * self.sd1) + (*d - along) * (rms_perp * self.sd2);
        }
    }
}
