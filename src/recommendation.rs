//! Incumbent-selection (recommendation) strategies.
//!
//! Each iteration the loop recomputes the incumbent — the current best guess
//! at the optimum — through one of three policies. The policy only affects
//! what is *reported* as the best solution; the point actually evaluated
//! against the true objective is always the acquisition maximizer's output.
//!
//! | Policy | Incumbent |
//! |--------|-----------|
//! | [`BestObserved`](Recommendation::BestObserved) | First argmin over all observed values (the default) |
//! | [`PosteriorOptimize`](Recommendation::PosteriorOptimize) | One multi-start posterior mean/std optimization |
//! | [`LocalSearch`](Recommendation::LocalSearch) | Best of `n_restarts` independent local searches |

use std::sync::Arc;

use crate::history::History;
use crate::model::SurrogateModel;
use crate::rng_util;
use crate::types::Incumbent;
use crate::{Error, Result};

/// Optimizes the surrogate's posterior mean and standard deviation from a
/// set of start points in a single multi-start search.
pub trait PosteriorOptimizer: Send + Sync {
    /// Run one multi-start search over the posterior and return the single
    /// best `(point, value)` found.
    ///
    /// `startpoints` contains all starts for this call; `with_gradients`
    /// tells the optimizer whether gradient information may be used.
    ///
    /// # Errors
    ///
    /// Convergence failures or degenerate output are reported as
    /// [`Recommendation`](crate::Error::Recommendation) and abort the run.
    fn optimize(
        &self,
        model: &dyn SurrogateModel,
        lower: &[f64],
        upper: &[f64],
        startpoints: &[Vec<f64>],
        with_gradients: bool,
    ) -> Result<(Vec<f64>, f64)>;
}

/// A generic local search over the surrogate, run once per start point.
pub trait LocalSearchStrategy: Send + Sync {
    /// Search from a single start point and return the best `(point, value)`
    /// found from that start.
    ///
    /// # Errors
    ///
    /// Convergence failures or degenerate output are reported as
    /// [`Recommendation`](crate::Error::Recommendation) and abort the run.
    fn search(
        &self,
        model: &dyn SurrogateModel,
        lower: &[f64],
        upper: &[f64],
        startpoint: &[f64],
    ) -> Result<(Vec<f64>, f64)>;
}

/// The recommendation policy, selected at configuration time.
///
/// An explicit tagged variant rather than an optional strategy handle, so the
/// default policy is a first-class value and dispatch never depends on
/// reference identity.
#[derive(Clone, Default)]
pub enum Recommendation {
    /// Recommend the best point observed so far (first argmin over `Y`).
    #[default]
    BestObserved,
    /// Recommend the optimum of the posterior mean/std, found by one
    /// multi-start search seeded with `n_restarts` random points plus the
    /// best observed point, with gradients enabled.
    PosteriorOptimize(Arc<dyn PosteriorOptimizer>),
    /// Recommend the best result of `n_restarts` independent local searches
    /// from random start points.
    LocalSearch(Arc<dyn LocalSearchStrategy>),
}

impl core::fmt::Debug for Recommendation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BestObserved => f.write_str("BestObserved"),
            Self::PosteriorOptimize(_) => f.write_str("PosteriorOptimize"),
            Self::LocalSearch(_) => f.write_str("LocalSearch"),
        }
    }
}

impl Recommendation {
    /// Compute the incumbent for the current history.
    ///
    /// `n_restarts` controls how many random start points the search-based
    /// policies draw; [`BestObserved`](Self::BestObserved) ignores it.
    pub(crate) fn recommend(
        &self,
        model: &dyn SurrogateModel,
        history: &History,
        lower: &[f64],
        upper: &[f64],
        n_restarts: usize,
        rng: &mut fastrand::Rng,
    ) -> Result<Incumbent> {
        match self {
            Self::BestObserved => best_observed(history),
            Self::PosteriorOptimize(optimizer) => {
                let mut startpoints = random_startpoints(n_restarts, lower, upper, rng);
                // One search from the best observed point, the rest random.
                let best = history.best_index().ok_or(Error::EmptyHistory)?;
                startpoints.push(history.x()[best].clone());

                let (point, value) =
                    optimizer.optimize(model, lower, upper, &startpoints, true)?;
                Ok(Incumbent::new(point, value))
            }
            Self::LocalSearch(strategy) => {
                let startpoints = random_startpoints(n_restarts, lower, upper, rng);
                let mut best: Option<Incumbent> = None;
                for startpoint in &startpoints {
                    let (point, value) = strategy.search(model, lower, upper, startpoint)?;
                    if best.as_ref().is_none_or(|b| value < b.value) {
                        best = Some(Incumbent::new(point, value));
                    }
                }
                best.ok_or(Error::Internal("local search produced no candidate"))
            }
        }
    }
}

/// Incumbent under the default policy: first argmin over the observed values.
fn best_observed(history: &History) -> Result<Incumbent> {
    let idx = history.best_index().ok_or(Error::EmptyHistory)?;
    Ok(Incumbent::new(history.x()[idx].clone(), history.y()[idx]))
}

fn random_startpoints(
    n: usize,
    lower: &[f64],
    upper: &[f64],
    rng: &mut fastrand::Rng,
) -> Vec<Vec<f64>> {
    (0..n)
        .map(|_| rng_util::point_in_bounds(rng, lower, upper))
        .collect()
}
