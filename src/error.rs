#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when a required collaborator was not supplied to the builder.
    #[error("missing component: {0} must be configured before building")]
    MissingComponent(&'static str),

    /// Returned when the task reports zero dimensions.
    #[error("task must have at least one dimension")]
    ZeroDimensionalTask,

    /// Returned when a bound vector's length does not match the task dimensionality.
    #[error("bounds dimension mismatch: task has {expected} dimensions but {which} bound has {got}")]
    BoundsDimensionMismatch {
        /// Which bound vector is malformed (`"lower"` or `"upper"`).
        which: &'static str,
        /// The task dimensionality.
        expected: usize,
        /// The actual length of the bound vector.
        got: usize,
    },

    /// Returned when a lower bound exceeds the upper bound in some dimension.
    #[error("invalid bounds in dimension {dim}: low ({low}) must be less than or equal to high ({high})")]
    InvalidBounds {
        /// The offending dimension index.
        dim: usize,
        /// The lower bound value.
        low: f64,
        /// The upper bound value.
        high: f64,
    },

    /// Returned when `n_init_points` is zero.
    #[error("invalid initial design size: n_init_points must be positive")]
    InvalidInitPoints,

    /// Returned when `train_interval` is zero.
    #[error("invalid train interval: train_interval must be positive")]
    InvalidTrainInterval,

    /// Returned when `num_save` is zero.
    #[error("invalid checkpoint interval: num_save must be positive")]
    InvalidSaveInterval,

    /// Returned when `n_restarts` is zero.
    #[error("invalid restart count: n_restarts must be positive")]
    InvalidRestarts,

    /// Returned when a seed history's point and value sequences differ in length.
    #[error("seed length mismatch: {x_len} points but {y_len} values")]
    SeedLengthMismatch {
        /// Number of seed points.
        x_len: usize,
        /// Number of seed values.
        y_len: usize,
    },

    /// Returned when a point's dimensionality does not match the task's.
    #[error("point dimension mismatch: expected {expected} dimensions, got {got}")]
    PointDimensionMismatch {
        /// The task dimensionality.
        expected: usize,
        /// The actual point length.
        got: usize,
    },

    /// Returned when the task returns the wrong number of objective values.
    #[error("objective count mismatch: expected {expected} values, got {got}")]
    ObjectiveCountMismatch {
        /// The number of points that were evaluated.
        expected: usize,
        /// The number of values the task returned.
        got: usize,
    },

    /// Returned when the initial design produces the wrong number of points.
    #[error("initial design count mismatch: requested {expected} points, got {got}")]
    DesignCountMismatch {
        /// The number of points requested.
        expected: usize,
        /// The number of points the design produced.
        got: usize,
    },

    /// Returned when an incumbent is requested before any observation exists.
    #[error("no observations recorded yet")]
    EmptyHistory,

    /// Returned when the surrogate model cannot be fitted to the current history.
    #[error("model training failed: {0}")]
    Training(String),

    /// Returned when the task's objective evaluation fails.
    #[error("objective evaluation failed: {0}")]
    Evaluation(String),

    /// Returned when a recommendation strategy fails or returns degenerate output.
    #[error("recommendation failed: {0}")]
    Recommendation(String),

    /// Returned when the acquisition maximizer fails to produce a candidate.
    #[error("acquisition maximization failed: {0}")]
    Maximization(String),

    /// Returned when a checkpoint sink fails to persist an iteration.
    #[error("checkpoint failed: {0}")]
    Checkpoint(String),

    /// Returned when an internal invariant is violated.
    #[error("internal error: {0}")]
    Internal(&'static str),
}

pub type Result<T> = core::result::Result<T, Error>;
