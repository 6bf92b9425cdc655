//! Initial (seed) designs.

use parking_lot::Mutex;

use crate::Result;
use crate::rng_util;

/// Produces the seed points evaluated before the main loop starts.
///
/// Implementations only propose points; the loop evaluates them and records
/// the results. Points must lie within the given per-dimension bounds.
pub trait InitialDesign: Send + Sync {
    /// Produce `n_points` points within `[lower, upper]`.
    ///
    /// # Errors
    ///
    /// Implementation-specific; a failed design aborts the run before any
    /// iteration executes.
    fn design(&self, lower: &[f64], upper: &[f64], n_points: usize) -> Result<Vec<Vec<f64>>>;
}

/// Uniform random design (the default).
///
/// Each point is drawn independently and uniformly within the per-dimension
/// bounds.
///
/// # Examples
///
/// ```
/// use bayesopt::initial_design::{InitialDesign, RandomDesign};
///
/// let design = RandomDesign::with_seed(42);
/// let points = design.design(&[0.0, -1.0], &[1.0, 1.0], 3).unwrap();
/// assert_eq!(points.len(), 3);
/// assert!(points.iter().all(|p| p.len() == 2));
/// ```
pub struct RandomDesign {
    rng: Mutex<fastrand::Rng>,
}

impl RandomDesign {
    /// Creates a design with a random seed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::new()),
        }
    }

    /// Creates a design with a fixed seed for reproducibility.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(fastrand::Rng::with_seed(seed)),
        }
    }
}

impl Default for RandomDesign {
    fn default() -> Self {
        Self::new()
    }
}

impl InitialDesign for RandomDesign {
    fn design(&self, lower: &[f64], upper: &[f64], n_points: usize) -> Result<Vec<Vec<f64>>> {
        let mut rng = self.rng.lock();
        Ok((0..n_points)
            .map(|_| rng_util::point_in_bounds(&mut rng, lower, upper))
            .collect())
    }
}
