//! The sequential model-based optimization loop.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::acquisition::AcquisitionFunction;
use crate::checkpoint::CheckpointSink;
use crate::history::History;
use crate::initial_design::InitialDesign;
use crate::maximizer::Maximizer;
use crate::model::SurrogateModel;
use crate::recommendation::Recommendation;
use crate::task::Task;
use crate::types::Incumbent;
use crate::{Error, Result};

mod builder;

pub use builder::BayesianOptimizationBuilder;

/// Drives one Bayesian-optimization run.
///
/// The loop owns the observation [`History`] exclusively. Each iteration it
/// trains the surrogate (full hyperparameter optimization every
/// `train_interval` iterations, posterior refresh otherwise), updates the
/// acquisition function, asks the maximizer for a candidate, recomputes the
/// incumbent through the configured [`Recommendation`] policy, evaluates the
/// candidate against the true objective, and appends the observation. The
/// candidate — never the incumbent — is what gets evaluated.
///
/// Execution is strictly sequential: one iteration at a time, the five steps
/// in order, no cancellation. Collaborator failures are fatal and leave the
/// history at its pre-iteration length.
///
/// Construct instances through [`builder()`](Self::builder); see the crate
/// docs for a complete example.
pub struct BayesianOptimization {
    task: Arc<dyn Task>,
    model: Arc<dyn SurrogateModel>,
    acquisition: Arc<dyn AcquisitionFunction>,
    maximizer: Arc<dyn Maximizer>,
    recommendation: Recommendation,
    initial_design: Arc<dyn InitialDesign>,
    checkpoint: Option<Arc<dyn CheckpointSink>>,

    n_init_points: usize,
    train_interval: usize,
    num_save: usize,
    n_restarts: usize,

    /// Bounds copied out of the task at build time, after validation.
    lower: Vec<f64>,
    upper: Vec<f64>,
    dims: usize,

    rng: fastrand::Rng,
    history: History,
    incumbent: Option<Incumbent>,
    model_trained: bool,
    run_started: Option<Instant>,
}

impl core::fmt::Debug for BayesianOptimization {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BayesianOptimization")
            .field("recommendation", &self.recommendation)
            .field("n_init_points", &self.n_init_points)
            .field("train_interval", &self.train_interval)
            .field("num_save", &self.num_save)
            .field("n_restarts", &self.n_restarts)
            .field("lower", &self.lower)
            .field("upper", &self.upper)
            .field("dims", &self.dims)
            .field("model_trained", &self.model_trained)
            .finish_non_exhaustive()
    }
}

impl BayesianOptimization {
    /// Return a [`BayesianOptimizationBuilder`] for configuring a run.
    #[must_use]
    pub fn builder() -> BayesianOptimizationBuilder {
        BayesianOptimizationBuilder::new()
    }

    /// Run the optimization loop until `num_iterations` total iterations
    /// (seed iterations included) have completed, then return the incumbent.
    ///
    /// An empty history is seeded first with `n_init_points` evaluated
    /// points from the initial design. If `num_iterations` is not larger
    /// than the current history length, no main-loop iteration executes and
    /// the current incumbent is returned.
    ///
    /// On failure the run aborts; everything recorded up to the last
    /// successful iteration stays available through
    /// [`history()`](Self::history).
    ///
    /// # Errors
    ///
    /// Propagates any collaborator failure: [`Training`](Error::Training),
    /// [`Evaluation`](Error::Evaluation), [`Maximization`](Error::Maximization),
    /// [`Recommendation`](Error::Recommendation), or
    /// [`Checkpoint`](Error::Checkpoint).
    pub fn run(&mut self, num_iterations: usize) -> Result<Incumbent> {
        self.run_started = Some(Instant::now());

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("run", num_iterations).entered();

        if self.history.is_empty() {
            self.initialize()?;
        }

        for it in self.history.len()..num_iterations {
            self.step(it)?;
        }

        let incumbent = self
            .incumbent
            .clone()
            .ok_or(Error::Internal("incumbent unset after run"))?;
        trace_info!(incumbent_value = incumbent.value, "run finished");
        Ok(incumbent)
    }

    /// Continue a run from an explicit seed history.
    ///
    /// The seed is adopted as-is: the first `x.len()` history entries equal
    /// the supplied observations exactly and both timing series start
    /// zero-filled to the seed length. The incumbent is computed immediately
    /// from the seed (best observed value), so it is well-defined even
    /// before the first main-loop iteration.
    ///
    /// # Errors
    ///
    /// Returns [`SeedLengthMismatch`](Error::SeedLengthMismatch) or
    /// [`PointDimensionMismatch`](Error::PointDimensionMismatch) for a
    /// malformed seed, and otherwise fails as [`run()`](Self::run) does.
    pub fn run_with_seed(
        &mut self,
        x: Vec<Vec<f64>>,
        y: Vec<f64>,
        num_iterations: usize,
    ) -> Result<Incumbent> {
        for point in &x {
            self.check_point_dims(point)?;
        }
        self.history = History::from_seed(x, y)?;

        if let Some(idx) = self.history.best_index() {
            self.incumbent = Some(Incumbent::new(
                self.history.x()[idx].clone(),
                self.history.y()[idx],
            ));
        }

        self.run(num_iterations)
    }

    /// Select the next candidate without evaluating or recording it.
    ///
    /// Runs the train → update-acquisition → maximize sequence exactly as
    /// one loop iteration would, with the training cadence derived from the
    /// current history length. Pair with [`observe()`](Self::observe) to
    /// drive the loop externally.
    ///
    /// # Errors
    ///
    /// Propagates [`Training`](Error::Training) and
    /// [`Maximization`](Error::Maximization) failures.
    pub fn suggest(&mut self) -> Result<Vec<f64>> {
        let do_optimize = self.history.len() % self.train_interval == 0;
        self.choose_next(do_optimize)
    }

    /// Record an externally evaluated observation.
    ///
    /// Both timing entries are recorded as zero, since the evaluation
    /// happened outside the loop.
    ///
    /// # Errors
    ///
    /// Returns [`PointDimensionMismatch`](Error::PointDimensionMismatch) if
    /// the point does not match the task dimensionality.
    pub fn observe(&mut self, point: Vec<f64>, value: f64) -> Result<()> {
        self.check_point_dims(&point)?;
        self.history.record(point, value, 0.0, 0.0);
        Ok(())
    }

    /// The observation history recorded so far.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The current incumbent, if any iteration (or seeding) has completed.
    #[must_use]
    pub fn incumbent(&self) -> Option<&Incumbent> {
        self.incumbent.as_ref()
    }

    /// Whether the surrogate has been trained successfully at least once.
    /// Diagnostic only; the loop never branches on it.
    #[must_use]
    pub fn model_trained(&self) -> bool {
        self.model_trained
    }

    /// Wall-clock time since the last [`run()`](Self::run) started.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.run_started.map(|t| t.elapsed())
    }

    /// Draw and evaluate the seed points.
    ///
    /// The design call is timed as optimization overhead, split evenly
    /// across the seed entries; each evaluation is timed individually. The
    /// incumbent is recomputed (best observed so far) after every seed
    /// point, and each seed point is checkpointed when a sink is configured.
    #[allow(clippy::cast_precision_loss)]
    fn initialize(&mut self) -> Result<()> {
        let n = self.n_init_points;

        let t_design = Instant::now();
        let points = self
            .initial_design
            .design(&self.lower, &self.upper, n)?;
        if points.len() != n {
            return Err(Error::DesignCountMismatch {
                expected: n,
                got: points.len(),
            });
        }
        let overhead_each = t_design.elapsed().as_secs_f64() / n as f64;

        for point in points {
            self.check_point_dims(&point)?;

            let t_eval = Instant::now();
            let values = self.task.evaluate(core::slice::from_ref(&point))?;
            let time_eval = t_eval.elapsed().as_secs_f64();
            let value = single_value(values)?;
            trace_info!(value, time_eval, "seed point evaluated");

            self.history.record(point, value, time_eval, overhead_each);

            let idx = self
                .history
                .best_index()
                .ok_or(Error::Internal("history empty after record"))?;
            self.incumbent = Some(Incumbent::new(
                self.history.x()[idx].clone(),
                self.history.y()[idx],
            ));

            // The model is untrained during seeding: no hyperparameters,
            // no acquisition value.
            if let Some(sink) = &self.checkpoint {
                sink.save(self.history.len() - 1, &[], 0.0)?;
            }
        }

        Ok(())
    }

    /// One main-loop iteration: train → select → recommend → evaluate →
    /// record → checkpoint.
    fn step(&mut self, it: usize) -> Result<()> {
        trace_info!(iteration = it, "start iteration");

        let t_overhead = Instant::now();
        let do_optimize = it % self.train_interval == 0;
        let candidate = self.choose_next(do_optimize)?;
        let overhead = t_overhead.elapsed().as_secs_f64();
        trace_info!(iteration = it, overhead, "optimization overhead");

        // Incumbent-selection latency is logged but never added to the
        // overhead series.
        #[cfg(feature = "tracing")]
        let t_rec = Instant::now();
        let incumbent = self.recommendation.recommend(
            self.model.as_ref(),
            &self.history,
            &self.lower,
            &self.upper,
            self.n_restarts,
            &mut self.rng,
        )?;
        trace_info!(
            incumbent_value = incumbent.value,
            latency = ?t_rec.elapsed(),
            "new incumbent"
        );
        self.incumbent = Some(incumbent);

        // Always evaluate the acquisition candidate, never the incumbent.
        let t_eval = Instant::now();
        let values = self.task.evaluate(core::slice::from_ref(&candidate))?;
        let time_eval = t_eval.elapsed().as_secs_f64();
        let value = single_value(values)?;
        trace_info!(value, time_eval, "candidate evaluated");

        self.history.record(candidate.clone(), value, time_eval, overhead);

        if let Some(sink) = &self.checkpoint
            && it % self.num_save == 0
        {
            let acquisition_value = self.acquisition.evaluate(&candidate);
            sink.save(it, &self.model.hyperparameters(), acquisition_value)?;
            trace_debug!(iteration = it, acquisition_value, "checkpoint written");
        }

        Ok(())
    }

    /// Train the surrogate, refresh the acquisition function, and maximize
    /// it to obtain the next candidate.
    fn choose_next(&mut self, do_optimize: bool) -> Result<Vec<f64>> {
        #[cfg(feature = "tracing")]
        let t_train = Instant::now();
        self.model
            .train(self.history.x(), self.history.y(), do_optimize)?;
        self.model_trained = true;
        trace_debug!(do_optimize, train_time = ?t_train.elapsed(), "model trained");

        self.acquisition.update(self.model.as_ref())?;

        #[cfg(feature = "tracing")]
        let t_max = Instant::now();
        let candidate = self.maximizer.maximize()?;
        trace_debug!(maximize_time = ?t_max.elapsed(), "acquisition maximized");

        self.check_point_dims(&candidate)?;
        Ok(candidate)
    }

    fn check_point_dims(&self, point: &[f64]) -> Result<()> {
        if point.len() == self.dims {
            Ok(())
        } else {
            Err(Error::PointDimensionMismatch {
                expected: self.dims,
                got: point.len(),
            })
        }
    }
}

/// Unwrap the single objective value of a one-point batch evaluation.
fn single_value(mut values: Vec<f64>) -> Result<f64> {
    if values.len() != 1 {
        return Err(Error::ObjectiveCountMismatch {
            expected: 1,
            got: values.len(),
        });
    }
    Ok(values.remove(0))
}
