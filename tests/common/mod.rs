//! Shared stub collaborators for the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;

use bayesopt::prelude::*;

/// 1-D quadratic task: f(x) = (x - 0.3)^2 on [0, 1].
pub struct QuadraticTask;

impl Task for QuadraticTask {
    fn dimensionality(&self) -> usize {
        1
    }

    fn lower_bound(&self) -> &[f64] {
        &[0.0]
    }

    fn upper_bound(&self) -> &[f64] {
        &[1.0]
    }

    fn evaluate(&self, points: &[Vec<f64>]) -> Result<Vec<f64>> {
        Ok(points.iter().map(|p| (p[0] - 0.3).powi(2)).collect())
    }
}

/// Returns scripted objective values in order, recording every evaluated point.
pub struct ScriptedTask {
    pub dims: usize,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
    values: Mutex<VecDeque<f64>>,
    pub evaluated: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl ScriptedTask {
    pub fn new_1d(values: Vec<f64>) -> (Self, Arc<Mutex<Vec<Vec<f64>>>>) {
        let evaluated = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                dims: 1,
                lower: vec![0.0],
                upper: vec![1.0],
                values: Mutex::new(values.into()),
                evaluated: Arc::clone(&evaluated),
            },
            evaluated,
        )
    }
}

impl Task for ScriptedTask {
    fn dimensionality(&self) -> usize {
        self.dims
    }

    fn lower_bound(&self) -> &[f64] {
        &self.lower
    }

    fn upper_bound(&self) -> &[f64] {
        &self.upper
    }

    fn evaluate(&self, points: &[Vec<f64>]) -> Result<Vec<f64>> {
        let mut evaluated = self.evaluated.lock();
        let mut values = self.values.lock();
        points
            .iter()
            .map(|p| {
                evaluated.push(p.clone());
                values
                    .pop_front()
                    .ok_or_else(|| Error::Evaluation("script exhausted".into()))
            })
            .collect()
    }
}

/// Fails every evaluation after the first `fail_after` calls.
pub struct FailingTask {
    pub fail_after: usize,
    calls: AtomicUsize,
}

impl FailingTask {
    pub fn new(fail_after: usize) -> Self {
        Self {
            fail_after,
            calls: AtomicUsize::new(0),
        }
    }
}

impl Task for FailingTask {
    fn dimensionality(&self) -> usize {
        1
    }

    fn lower_bound(&self) -> &[f64] {
        &[0.0]
    }

    fn upper_bound(&self) -> &[f64] {
        &[1.0]
    }

    fn evaluate(&self, points: &[Vec<f64>]) -> Result<Vec<f64>> {
        if self.calls.fetch_add(1, Ordering::SeqCst) >= self.fail_after {
            return Err(Error::Evaluation("simulated objective crash".into()));
        }
        Ok(points.iter().map(|p| p[0]).collect())
    }
}

/// Records the `do_optimize` flag of every training call.
pub struct RecordingModel {
    pub flags: Arc<Mutex<Vec<bool>>>,
    pub hypers: Vec<f64>,
}

impl RecordingModel {
    pub fn new() -> (Self, Arc<Mutex<Vec<bool>>>) {
        Self::with_hypers(Vec::new())
    }

    pub fn with_hypers(hypers: Vec<f64>) -> (Self, Arc<Mutex<Vec<bool>>>) {
        let flags = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                flags: Arc::clone(&flags),
                hypers,
            },
            flags,
        )
    }
}

impl SurrogateModel for RecordingModel {
    fn train(&self, x: &[Vec<f64>], y: &[f64], do_optimize: bool) -> Result<()> {
        assert_eq!(x.len(), y.len(), "loop must pass aligned observations");
        self.flags.lock().push(do_optimize);
        Ok(())
    }

    fn hyperparameters(&self) -> Vec<f64> {
        self.hypers.clone()
    }
}

/// Always fails to train.
pub struct FailingModel;

impl SurrogateModel for FailingModel {
    fn train(&self, _x: &[Vec<f64>], _y: &[f64], _do_optimize: bool) -> Result<()> {
        Err(Error::Training("singular kernel matrix".into()))
    }

    fn hyperparameters(&self) -> Vec<f64> {
        Vec::new()
    }
}

/// Counts update calls and scores every point with a constant.
pub struct CountingAcquisition {
    pub updates: Arc<AtomicUsize>,
    pub score: f64,
}

impl CountingAcquisition {
    pub fn new(score: f64) -> (Self, Arc<AtomicUsize>) {
        let updates = Arc::new(AtomicUsize::new(0));
        (
            Self {
                updates: Arc::clone(&updates),
                score,
            },
            updates,
        )
    }
}

impl AcquisitionFunction for CountingAcquisition {
    fn update(&self, _model: &dyn SurrogateModel) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn evaluate(&self, _point: &[f64]) -> f64 {
        self.score
    }
}

/// Always proposes the same candidate.
pub struct FixedMaximizer {
    pub point: Vec<f64>,
}

impl Maximizer for FixedMaximizer {
    fn maximize(&self) -> Result<Vec<f64>> {
        Ok(self.point.clone())
    }
}

/// Records every posterior-optimization call: start points and gradient flag.
pub struct CountingPosterior {
    pub calls: Arc<Mutex<Vec<(Vec<Vec<f64>>, bool)>>>,
    pub result: (Vec<f64>, f64),
}

impl CountingPosterior {
    pub fn new(result: (Vec<f64>, f64)) -> (Self, Arc<Mutex<Vec<(Vec<Vec<f64>>, bool)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: Arc::clone(&calls),
                result,
            },
            calls,
        )
    }
}

impl PosteriorOptimizer for CountingPosterior {
    fn optimize(
        &self,
        _model: &dyn SurrogateModel,
        _lower: &[f64],
        _upper: &[f64],
        startpoints: &[Vec<f64>],
        with_gradients: bool,
    ) -> Result<(Vec<f64>, f64)> {
        self.calls
            .lock()
            .push((startpoints.to_vec(), with_gradients));
        Ok(self.result.clone())
    }
}

/// Local search that returns each start point unchanged, with its first
/// coordinate as the value. Records every start point it was given.
pub struct IdentitySearch {
    pub calls: Arc<Mutex<Vec<Vec<f64>>>>,
}

impl IdentitySearch {
    pub fn new() -> (Self, Arc<Mutex<Vec<Vec<f64>>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }
}

impl LocalSearchStrategy for IdentitySearch {
    fn search(
        &self,
        _model: &dyn SurrogateModel,
        _lower: &[f64],
        _upper: &[f64],
        startpoint: &[f64],
    ) -> Result<(Vec<f64>, f64)> {
        self.calls.lock().push(startpoint.to_vec());
        Ok((startpoint.to_vec(), startpoint[0]))
    }
}

/// In-memory checkpoint sink.
pub struct VecSink {
    pub records: Arc<Mutex<Vec<CheckpointRecord>>>,
}

impl VecSink {
    pub fn new() -> (Self, Arc<Mutex<Vec<CheckpointRecord>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                records: Arc::clone(&records),
            },
            records,
        )
    }
}

impl CheckpointSink for VecSink {
    fn save(
        &self,
        iteration: usize,
        hyperparameters: &[f64],
        acquisition_value: f64,
    ) -> Result<()> {
        self.records.lock().push(CheckpointRecord {
            iteration,
            hyperparameters: hyperparameters.to_vec(),
            acquisition_value,
        });
        Ok(())
    }
}

/// A ready-to-run 1-D solver over `QuadraticTask` with a fixed maximizer.
pub fn quadratic_solver(candidate: f64, seed: u64) -> BayesianOptimization {
    let (model, _) = RecordingModel::new();
    let (acquisition, _) = CountingAcquisition::new(0.0);
    BayesianOptimization::builder()
        .task(QuadraticTask)
        .model(model)
        .acquisition(acquisition)
        .maximizer(FixedMaximizer {
            point: vec![candidate],
        })
        .seed(seed)
        .build()
        .expect("valid configuration")
}
