use std::sync::Arc;

use crate::acquisition::AcquisitionFunction;
use crate::checkpoint::CheckpointSink;
use crate::history::History;
use crate::initial_design::{InitialDesign, RandomDesign};
use crate::maximizer::Maximizer;
use crate::model::SurrogateModel;
use crate::recommendation::Recommendation;
use crate::task::Task;
use crate::{Error, Result};

use super::BayesianOptimization;

/// A builder for constructing [`BayesianOptimization`] runs with a fluent API.
///
/// Created via [`BayesianOptimization::builder()`]. Task, surrogate model,
/// acquisition function, and maximizer are required; everything else has a
/// default.
///
/// # Defaults
///
/// - `n_init_points`: 3
/// - `train_interval`: 1 (optimize hyperparameters every iteration)
/// - `num_save`: 1 (checkpoint every iteration, when a sink is configured)
/// - `n_restarts`: 1
/// - Recommendation policy: [`Recommendation::BestObserved`]
/// - Initial design: [`RandomDesign`]
/// - Checkpoint sink: none (checkpointing disabled)
/// - RNG seed: random
pub struct BayesianOptimizationBuilder {
    task: Option<Arc<dyn Task>>,
    model: Option<Arc<dyn SurrogateModel>>,
    acquisition: Option<Arc<dyn AcquisitionFunction>>,
    maximizer: Option<Arc<dyn Maximizer>>,
    recommendation: Recommendation,
    initial_design: Option<Arc<dyn InitialDesign>>,
    checkpoint: Option<Arc<dyn CheckpointSink>>,
    n_init_points: usize,
    train_interval: usize,
    num_save: usize,
    n_restarts: usize,
    seed: Option<u64>,
}

impl BayesianOptimizationBuilder {
    pub(super) fn new() -> Self {
        Self {
            task: None,
            model: None,
            acquisition: None,
            maximizer: None,
            recommendation: Recommendation::default(),
            initial_design: None,
            checkpoint: None,
            n_init_points: 3,
            train_interval: 1,
            num_save: 1,
            n_restarts: 1,
            seed: None,
        }
    }

    /// Set the task to optimize. Required.
    #[must_use]
    pub fn task(mut self, task: impl Task + 'static) -> Self {
        self.task = Some(Arc::new(task));
        self
    }

    /// Set the surrogate model. Required.
    #[must_use]
    pub fn model(mut self, model: impl SurrogateModel + 'static) -> Self {
        self.model = Some(Arc::new(model));
        self
    }

    /// Set the acquisition function. Required.
    #[must_use]
    pub fn acquisition(mut self, acquisition: impl AcquisitionFunction + 'static) -> Self {
        self.acquisition = Some(Arc::new(acquisition));
        self
    }

    /// Set the acquisition maximizer. Required.
    #[must_use]
    pub fn maximizer(mut self, maximizer: impl Maximizer + 'static) -> Self {
        self.maximizer = Some(Arc::new(maximizer));
        self
    }

    /// Set the recommendation policy.
    ///
    /// Defaults to [`Recommendation::BestObserved`].
    #[must_use]
    pub fn recommendation(mut self, recommendation: Recommendation) -> Self {
        self.recommendation = recommendation;
        self
    }

    /// Set the initial design used to seed an empty history.
    ///
    /// Defaults to [`RandomDesign`], seeded from [`seed`](Self::seed) when
    /// one is given.
    #[must_use]
    pub fn initial_design(mut self, design: impl InitialDesign + 'static) -> Self {
        self.initial_design = Some(Arc::new(design));
        self
    }

    /// Set a checkpoint sink. No sink means checkpointing is disabled.
    #[must_use]
    pub fn checkpoint(mut self, sink: impl CheckpointSink + 'static) -> Self {
        self.checkpoint = Some(Arc::new(sink));
        self
    }

    /// Number of seed points drawn before the main loop. Default: 3.
    #[must_use]
    pub fn n_init_points(mut self, n: usize) -> Self {
        self.n_init_points = n;
        self
    }

    /// Optimize the surrogate's hyperparameters every `interval`-th
    /// iteration; other iterations refresh the posterior only. Default: 1.
    #[must_use]
    pub fn train_interval(mut self, interval: usize) -> Self {
        self.train_interval = interval;
        self
    }

    /// Checkpoint every `num_save`-th iteration. Default: 1.
    #[must_use]
    pub fn num_save(mut self, num_save: usize) -> Self {
        self.num_save = num_save;
        self
    }

    /// Number of random start points for the search-based recommendation
    /// policies. Default: 1.
    #[must_use]
    pub fn n_restarts(mut self, n: usize) -> Self {
        self.n_restarts = n;
        self
    }

    /// Fix the RNG seed for reproducibility.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validate the configuration and build the loop.
    ///
    /// # Errors
    ///
    /// Returns [`MissingComponent`](Error::MissingComponent) if a required
    /// collaborator was not set, [`ZeroDimensionalTask`](Error::ZeroDimensionalTask),
    /// [`BoundsDimensionMismatch`](Error::BoundsDimensionMismatch), or
    /// [`InvalidBounds`](Error::InvalidBounds) for a malformed task, and
    /// [`InvalidInitPoints`](Error::InvalidInitPoints),
    /// [`InvalidTrainInterval`](Error::InvalidTrainInterval),
    /// [`InvalidSaveInterval`](Error::InvalidSaveInterval), or
    /// [`InvalidRestarts`](Error::InvalidRestarts) for a zero interval or
    /// count. No iteration runs on a rejected configuration.
    pub fn build(self) -> Result<BayesianOptimization> {
        let task = self.task.ok_or(Error::MissingComponent("task"))?;
        let model = self.model.ok_or(Error::MissingComponent("model"))?;
        let acquisition = self
            .acquisition
            .ok_or(Error::MissingComponent("acquisition function"))?;
        let maximizer = self.maximizer.ok_or(Error::MissingComponent("maximizer"))?;

        let dims = task.dimensionality();
        if dims == 0 {
            return Err(Error::ZeroDimensionalTask);
        }

        let lower = task.lower_bound().to_vec();
        let upper = task.upper_bound().to_vec();
        if lower.len() != dims {
            return Err(Error::BoundsDimensionMismatch {
                which: "lower",
                expected: dims,
                got: lower.len(),
            });
        }
        if upper.len() != dims {
            return Err(Error::BoundsDimensionMismatch {
                which: "upper",
                expected: dims,
                got: upper.len(),
            });
        }
        for (dim, (&low, &high)) in lower.iter().zip(&upper).enumerate() {
            if low > high {
                return Err(Error::InvalidBounds { dim, low, high });
            }
        }

        if self.n_init_points == 0 {
            return Err(Error::InvalidInitPoints);
        }
        if self.train_interval == 0 {
            return Err(Error::InvalidTrainInterval);
        }
        if self.num_save == 0 {
            return Err(Error::InvalidSaveInterval);
        }
        if self.n_restarts == 0 {
            return Err(Error::InvalidRestarts);
        }

        let rng = self
            .seed
            .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        let initial_design = self.initial_design.unwrap_or_else(|| {
            Arc::new(match self.seed {
                Some(seed) => RandomDesign::with_seed(seed),
                None => RandomDesign::new(),
            })
        });

        Ok(BayesianOptimization {
            task,
            model,
            acquisition,
            maximizer,
            recommendation: self.recommendation,
            initial_design,
            checkpoint: self.checkpoint,
            n_init_points: self.n_init_points,
            train_interval: self.train_interval,
            num_save: self.num_save,
            n_restarts: self.n_restarts,
            lower,
            upper,
            dims,
            rng,
            history: History::new(),
            incumbent: None,
            model_trained: false,
            run_started: None,
        })
    }
}
