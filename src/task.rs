//! The objective task abstraction.

use crate::Result;

/// An expensive-to-evaluate objective over a bounded continuous domain.
///
/// The loop treats the task as a black box: it only reads the per-dimension
/// bounds to draw start points and calls [`evaluate`](Task::evaluate) on the
/// candidates the acquisition maximizer proposes.
///
/// Implementations must be `Send + Sync`; the loop holds the task behind an
/// `Arc<dyn Task>`.
pub trait Task: Send + Sync {
    /// Number of domain dimensions. Must be at least 1.
    fn dimensionality(&self) -> usize;

    /// Per-dimension lower bounds, of length [`dimensionality`](Task::dimensionality).
    fn lower_bound(&self) -> &[f64];

    /// Per-dimension upper bounds, of length [`dimensionality`](Task::dimensionality).
    fn upper_bound(&self) -> &[f64];

    /// Evaluate the objective at a batch of points, one value per point.
    ///
    /// # Errors
    ///
    /// Implementations signal unrecoverable evaluation failures with
    /// [`Evaluation`](crate::Error::Evaluation). The loop propagates the
    /// failure without retrying and without recording a partial observation.
    fn evaluate(&self, points: &[Vec<f64>]) -> Result<Vec<f64>>;
}
