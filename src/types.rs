//! Core types for the optimization loop.

use serde::{Deserialize, Serialize};

/// The current best-known solution of a run.
///
/// Recomputed every iteration by the configured
/// [`Recommendation`](crate::recommendation::Recommendation) strategy; only
/// the latest value is retained. Depending on the strategy, the point may
/// never have been evaluated against the true objective.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Incumbent {
    /// The recommended point in the task's domain.
    pub point: Vec<f64>,
    /// The observed or estimated objective value at that point.
    pub value: f64,
}

impl Incumbent {
    /// Creates an incumbent from a point and its value.
    #[must_use]
    pub fn new(point: Vec<f64>, value: f64) -> Self {
        Self { point, value }
    }
}
