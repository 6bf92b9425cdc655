//! Checkpoint sinks.
//!
//! When a sink is configured, the loop persists one record per checkpointed
//! iteration: the iteration index, the surrogate's current hyperparameters,
//! and the acquisition value at the evaluated candidate. No sink configured
//! means checkpointing is silently disabled.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// One persisted checkpoint entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckpointRecord {
    /// Global iteration index (seed iterations included).
    pub iteration: usize,
    /// The surrogate model's hyperparameters at checkpoint time.
    /// Empty while the model is untrained (seed iterations).
    pub hyperparameters: Vec<f64>,
    /// Acquisition score of the candidate evaluated this iteration.
    /// Zero for seed iterations, where no acquisition exists yet.
    pub acquisition_value: f64,
}

/// Receives per-iteration checkpoint records.
pub trait CheckpointSink: Send + Sync {
    /// Persist one iteration.
    ///
    /// # Errors
    ///
    /// Returns [`Checkpoint`](crate::Error::Checkpoint) if the record cannot
    /// be persisted. The failure is fatal to the run.
    fn save(&self, iteration: usize, hyperparameters: &[f64], acquisition_value: f64)
    -> Result<()>;
}

/// A sink that appends checkpoint records as JSON lines to a file.
///
/// The file does not need to exist yet; it is created on the first write.
/// Records are flushed per write so a crashed run leaves every completed
/// checkpoint on disk.
///
/// # Examples
///
/// ```no_run
/// use bayesopt::checkpoint::JsonlSink;
///
/// let sink = JsonlSink::new("run.jsonl");
/// ```
pub struct JsonlSink {
    path: PathBuf,
    /// Serialise in-process writes so records never interleave.
    write_lock: Mutex<()>,
}

impl JsonlSink {
    /// Creates a sink that writes to the given path.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Read all records back from a checkpoint file.
    ///
    /// Returns an empty vector if the file does not exist. Useful for
    /// inspecting a finished run or for building a seed history from the
    /// observations of an earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`Checkpoint`](crate::Error::Checkpoint) if the file exists
    /// but cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<CheckpointRecord>> {
        let file = match File::open(path.as_ref()) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::Checkpoint(e.to_string())),
        };

        let reader = BufReader::new(file);
        let mut records = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|e| Error::Checkpoint(e.to_string()))?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let record: CheckpointRecord =
                serde_json::from_str(line).map_err(|e| Error::Checkpoint(e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }
}

impl CheckpointSink for JsonlSink {
    fn save(
        &self,
        iteration: usize,
        hyperparameters: &[f64],
        acquisition_value: f64,
    ) -> Result<()> {
        let record = CheckpointRecord {
            iteration,
            hyperparameters: hyperparameters.to_vec(),
            acquisition_value,
        };

        let _guard = self.write_lock.lock();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| Error::Checkpoint(e.to_string()))?;

        let line = serde_json::to_string(&record).map_err(|e| Error::Checkpoint(e.to_string()))?;
        writeln!(file, "{line}").map_err(|e| Error::Checkpoint(e.to_string()))?;
        file.flush().map_err(|e| Error::Checkpoint(e.to_string()))?;

        Ok(())
    }
}
