//! The surrogate model abstraction.

use crate::Result;

/// A probabilistic surrogate of the true objective, fit to the observation
/// history and queried (through the acquisition function) to guide search.
///
/// Methods take `&self`; implementations carry their fitted state behind
/// interior mutability so the model can be shared as an `Arc<dyn SurrogateModel>`.
pub trait SurrogateModel: Send + Sync {
    /// Fit the model to the observations seen so far.
    ///
    /// When `do_optimize` is `false` the model must keep its previously
    /// optimized hyperparameters and only refresh its posterior with the new
    /// data. The loop passes `false` on iterations where the training cadence
    /// (`train_interval`) says hyperparameter optimization should be skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Training`](crate::Error::Training) if the model cannot be
    /// fitted (degenerate inputs, numerical failure). Training failures are
    /// fatal to the run.
    fn train(&self, x: &[Vec<f64>], y: &[f64], do_optimize: bool) -> Result<()>;

    /// Current hyperparameters, captured when checkpointing an iteration.
    ///
    /// An untrained model may return an empty vector.
    fn hyperparameters(&self) -> Vec<f64>;
}
