//! The acquisition maximizer abstraction.

use crate::Result;

/// The inner search that returns the domain point maximizing the current
/// acquisition surface.
///
/// The maximizer is assumed to hold its own reference to the acquisition
/// function updated earlier in the same iteration, and to respect the task's
/// bounds. How it searches (random restarts, gradient ascent, DIRECT, ...)
/// is opaque to the loop; only wall-clock time around the call is observed.
pub trait Maximizer: Send + Sync {
    /// Return the next candidate point to evaluate.
    ///
    /// # Errors
    ///
    /// Returns [`Maximization`](crate::Error::Maximization) if no candidate
    /// can be produced. The failure is fatal to the run.
    fn maximize(&self) -> Result<Vec<f64>>;
}
