//! Integration tests for checkpoint cadence and the JSONL sink.

mod common;

use bayesopt::prelude::*;
use common::{CountingAcquisition, FixedMaximizer, QuadraticTask, RecordingModel, VecSink};

#[test]
fn checkpoint_cadence_follows_num_save() {
    let (model, _) = RecordingModel::with_hypers(vec![1.5, 0.2]);
    let (acquisition, _) = CountingAcquisition::new(7.5);
    let (sink, records) = VecSink::new();

    let mut bo = BayesianOptimization::builder()
        .task(QuadraticTask)
        .model(model)
        .acquisition(acquisition)
        .maximizer(FixedMaximizer { point: vec![0.5] })
        .checkpoint(sink)
        .num_save(2)
        .seed(31)
        .build()
        .unwrap();

    bo.run(7).unwrap();

    let records = records.lock();
    let iterations: Vec<usize> = records.iter().map(|r| r.iteration).collect();
    // Every seed point is checkpointed; main iterations 3..7 only where
    // the index is divisible by num_save.
    assert_eq!(iterations, vec![0, 1, 2, 4, 6]);

    // Seed records carry no model state and a zero acquisition value.
    for record in &records[..3] {
        assert!(record.hyperparameters.is_empty());
        assert_eq!(record.acquisition_value, 0.0);
    }
    // Main-loop records capture the model's hyperparameters and the
    // acquisition score of the evaluated candidate.
    for record in &records[3..] {
        assert_eq!(record.hyperparameters, vec![1.5, 0.2]);
        assert_eq!(record.acquisition_value, 7.5);
    }
}

#[test]
fn no_sink_disables_checkpointing_without_error() {
    let (model, _) = RecordingModel::new();
    let (acquisition, _) = CountingAcquisition::new(0.0);
    let mut bo = BayesianOptimization::builder()
        .task(QuadraticTask)
        .model(model)
        .acquisition(acquisition)
        .maximizer(FixedMaximizer { point: vec![0.5] })
        .seed(31)
        .build()
        .unwrap();

    bo.run(5).unwrap();
    assert_eq!(bo.history().len(), 5);
}

#[test]
fn jsonl_sink_persists_a_full_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("run.jsonl");

    let (model, _) = RecordingModel::with_hypers(vec![0.9]);
    let (acquisition, _) = CountingAcquisition::new(1.25);
    let mut bo = BayesianOptimization::builder()
        .task(QuadraticTask)
        .model(model)
        .acquisition(acquisition)
        .maximizer(FixedMaximizer { point: vec![0.5] })
        .checkpoint(JsonlSink::new(&path))
        .seed(17)
        .build()
        .unwrap();

    bo.run(5).unwrap();

    let records = JsonlSink::load(&path).unwrap();
    // 3 seed checkpoints + 2 main-loop checkpoints with num_save = 1.
    assert_eq!(records.len(), 5);
    assert_eq!(records[0].iteration, 0);
    assert_eq!(records[4].iteration, 4);
    assert_eq!(records[4].hyperparameters, vec![0.9]);
    assert_eq!(records[4].acquisition_value, 1.25);
}

#[test]
fn failing_sink_aborts_the_run() {
    struct BrokenSink;

    impl CheckpointSink for BrokenSink {
        fn save(&self, _iteration: usize, _hypers: &[f64], _acq: f64) -> Result<()> {
            Err(Error::Checkpoint("disk full".into()))
        }
    }

    let (model, _) = RecordingModel::new();
    let (acquisition, _) = CountingAcquisition::new(0.0);
    let mut bo = BayesianOptimization::builder()
        .task(QuadraticTask)
        .model(model)
        .acquisition(acquisition)
        .maximizer(FixedMaximizer { point: vec![0.5] })
        .checkpoint(BrokenSink)
        .seed(8)
        .build()
        .unwrap();

    let err = bo.run(5).unwrap_err();
    assert!(matches!(err, Error::Checkpoint(_)));
    // The first seed point was evaluated and recorded before the sink failed.
    assert_eq!(bo.history().len(), 1);
}
