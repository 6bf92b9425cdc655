//! Append-only observation history with per-iteration timing bookkeeping.

use serde::{Deserialize, Serialize};

/// The observation history of one optimization run.
///
/// Four ordered series grow in lockstep, one entry per completed iteration
/// (seed iterations included): the evaluated points `X`, their objective
/// values `Y`, the objective-evaluation latency, and the optimization
/// overhead (surrogate training plus acquisition maximization). Entries are
/// never removed or reordered once recorded.
///
/// The loop owns the history exclusively; collaborators only ever see the
/// point and value slices through read-only accessors.
///
/// # Examples
///
/// ```
/// use bayesopt::History;
///
/// let mut history = History::new();
/// history.record(vec![0.2], 4.0, 0.01, 0.002);
/// history.record(vec![0.7], 1.0, 0.01, 0.002);
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.best_index(), Some(1));
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct History {
    x: Vec<Vec<f64>>,
    y: Vec<f64>,
    time_func_eval: Vec<f64>,
    time_overhead: Vec<f64>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history pre-populated with already-evaluated observations.
    ///
    /// Both timing series are zero-filled to the seed length, since the cost
    /// of producing the seed is unknown to this run.
    ///
    /// # Errors
    ///
    /// Returns [`SeedLengthMismatch`](crate::Error::SeedLengthMismatch) if
    /// `x` and `y` differ in length.
    pub fn from_seed(x: Vec<Vec<f64>>, y: Vec<f64>) -> crate::Result<Self> {
        if x.len() != y.len() {
            return Err(crate::Error::SeedLengthMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        let n = x.len();
        Ok(Self {
            x,
            y,
            time_func_eval: vec![0.0; n],
            time_overhead: vec![0.0; n],
        })
    }

    /// Appends one completed iteration.
    ///
    /// Called exactly once per iteration, after a successful objective
    /// evaluation. A failed evaluation leaves the history untouched.
    pub fn record(&mut self, point: Vec<f64>, value: f64, func_eval: f64, overhead: f64) {
        self.x.push(point);
        self.y.push(value);
        self.time_func_eval.push(func_eval);
        self.time_overhead.push(overhead);
    }

    /// Number of completed iterations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Returns `true` if no iteration has completed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// The evaluated points, in evaluation order.
    #[must_use]
    pub fn x(&self) -> &[Vec<f64>] {
        &self.x
    }

    /// The observed objective values, aligned with [`x`](Self::x).
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Per-iteration objective-evaluation latency in seconds.
    #[must_use]
    pub fn time_func_eval(&self) -> &[f64] {
        &self.time_func_eval
    }

    /// Per-iteration optimization-overhead latency in seconds.
    #[must_use]
    pub fn time_overhead(&self) -> &[f64] {
        &self.time_overhead
    }

    /// Index of the first observation achieving the minimum value.
    ///
    /// Ties are broken by evaluation order, so the returned index is stable
    /// under later appends. Returns `None` on an empty history.
    #[must_use]
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, &v) in self.y.iter().enumerate() {
            match best {
                Some((_, bv)) if v >= bv => {}
                _ => best = Some((i, v)),
            }
        }
        best.map(|(i, _)| i)
    }
}
