#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Sequential model-based (Bayesian) optimization loop for expensive
//! black-box objectives over bounded continuous domains. The crate provides
//! the iteration loop, its incumbent-selection policies, and the
//! bookkeeping/timing/checkpoint contract around it; surrogate model,
//! acquisition function, inner maximizer, task, initial design, and
//! checkpoint persistence plug in through traits.
//!
//! # Getting Started
//!
//! Wire up a task and three collaborators, then run. The stubs below stand
//! in for a real Gaussian process, Expected Improvement, and a multi-start
//! maximizer:
//!
//! ```
//! use bayesopt::prelude::*;
//!
//! struct Parabola;
//!
//! impl Task for Parabola {
//!     fn dimensionality(&self) -> usize {
//!         1
//!     }
//!     fn lower_bound(&self) -> &[f64] {
//!         &[0.0]
//!     }
//!     fn upper_bound(&self) -> &[f64] {
//!         &[1.0]
//!     }
//!     fn evaluate(&self, points: &[Vec<f64>]) -> Result<Vec<f64>> {
//!         Ok(points.iter().map(|p| (p[0] - 0.3).powi(2)).collect())
//!     }
//! }
//!
//! struct StubModel;
//!
//! impl SurrogateModel for StubModel {
//!     fn train(&self, _x: &[Vec<f64>], _y: &[f64], _do_optimize: bool) -> Result<()> {
//!         Ok(())
//!     }
//!     fn hyperparameters(&self) -> Vec<f64> {
//!         Vec::new()
//!     }
//! }
//!
//! struct StubAcquisition;
//!
//! impl AcquisitionFunction for StubAcquisition {
//!     fn update(&self, _model: &dyn SurrogateModel) -> Result<()> {
//!         Ok(())
//!     }
//!     fn evaluate(&self, _point: &[f64]) -> f64 {
//!         0.0
//!     }
//! }
//!
//! struct CenterMaximizer;
//!
//! impl Maximizer for CenterMaximizer {
//!     fn maximize(&self) -> Result<Vec<f64>> {
//!         Ok(vec![0.5])
//!     }
//! }
//!
//! let mut bo = BayesianOptimization::builder()
//!     .task(Parabola)
//!     .model(StubModel)
//!     .acquisition(StubAcquisition)
//!     .maximizer(CenterMaximizer)
//!     .seed(42)
//!     .build()?;
//!
//! let incumbent = bo.run(5)?;
//!
//! assert_eq!(bo.history().len(), 5);
//! let best = bo.history().y().iter().copied().fold(f64::INFINITY, f64::min);
//! assert_eq!(incumbent.value, best);
//! # Ok::<(), bayesopt::Error>(())
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`BayesianOptimization`] | Drive the loop: seed, iterate, track the incumbent, checkpoint. |
//! | [`History`] | Append-only observations plus per-iteration timing series. |
//! | [`Incumbent`] | The current best-known point and value, recomputed every iteration. |
//! | [`Recommendation`] | Policy that computes the incumbent (best-observed, posterior optimization, or local search). |
//! | [`Task`](task::Task) | The bounded black-box objective being optimized. |
//! | [`SurrogateModel`](model::SurrogateModel) | Probabilistic approximation of the objective, retrained each iteration. |
//! | [`Maximizer`](maximizer::Maximizer) | Inner search returning the acquisition optimum as the next candidate. |
//!
//! # Candidate vs. recommendation
//!
//! The point evaluated against the true objective each iteration is always
//! the acquisition maximizer's output. The recommendation policy only
//! decides what is reported (and checkpointed) as the current best guess —
//! it may recommend points that are never evaluated. Swapping policies never
//! changes the sequence of evaluated points.
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) at key loop points | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

pub mod acquisition;
pub mod checkpoint;
mod error;
mod history;
pub mod initial_design;
pub mod maximizer;
pub mod model;
pub mod recommendation;
mod rng_util;
mod solver;
pub mod task;
mod types;

pub use error::{Error, Result};
pub use history::History;
pub use recommendation::Recommendation;
pub use solver::{BayesianOptimization, BayesianOptimizationBuilder};
pub use types::Incumbent;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use bayesopt::prelude::*;
/// ```
pub mod prelude {
    pub use crate::acquisition::AcquisitionFunction;
    pub use crate::checkpoint::{CheckpointRecord, CheckpointSink, JsonlSink};
    pub use crate::error::{Error, Result};
    pub use crate::history::History;
    pub use crate::initial_design::{InitialDesign, RandomDesign};
    pub use crate::maximizer::Maximizer;
    pub use crate::model::SurrogateModel;
    pub use crate::recommendation::{
        LocalSearchStrategy, PosteriorOptimizer, Recommendation,
    };
    pub use crate::solver::{BayesianOptimization, BayesianOptimizationBuilder};
    pub use crate::task::Task;
    pub use crate::types::Incumbent;
}
