//! The acquisition function abstraction.

use crate::Result;
use crate::model::SurrogateModel;

/// A scalar scoring function over the domain, derived from the surrogate.
///
/// The loop refreshes the acquisition from the (possibly just-retrained)
/// model once per iteration, before invoking the maximizer. The pointwise
/// [`evaluate`](AcquisitionFunction::evaluate) score is used only to log the
/// acquisition value of the chosen candidate into checkpoints.
pub trait AcquisitionFunction: Send + Sync {
    /// Refresh internal state from the given model.
    ///
    /// # Errors
    ///
    /// Implementation-specific; any error aborts the iteration and the run.
    fn update(&self, model: &dyn SurrogateModel) -> Result<()>;

    /// Score a single point under the current model state.
    fn evaluate(&self, point: &[f64]) -> f64;
}
