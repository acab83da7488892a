//! Error types for curve fitting and graph persistence
//!
//! This module defines the failures encountered when fitting a regression,
//! rebuilding a graph from storage, or reading and writing the graph
//! collection, along with a convenient `Result` alias.

/// Errors that can occur while fitting curves or persisting graphs.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An argument was outside the domain the operation accepts.
    ///
    /// Raised when there are fewer samples than parameters, when a
    /// logarithmic or power model is given a non-positive x value, or when a
    /// range, step or order is malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The nonlinear solver could not settle within its budget.
    ///
    /// Usually the data is degenerate or collinear for the chosen model, or
    /// the model overflows at the initial guess.
    #[error("Solver failed to converge after {evaluations} evaluations [cost: {cost}]")]
    Convergence {
        /// Number of residual evaluations performed before giving up
        evaluations: usize,
        /// Sum of squared residuals at the last accepted parameters
        cost: f64,
    },

    /// A persisted model name has no matching regression kind.
    #[error("Unknown regression model `{0}`")]
    UnknownModelKind(String),

    /// No free graph id could be found.
    #[error("Could not allocate a unique graph id after {attempts} attempts")]
    IdCollision {
        /// Number of candidate ids tried
        attempts: usize,
    },

    /// `fit` was called before an x-range was set.
    #[error("No x-range set; call `set_range` before fitting")]
    MissingRange,

    /// Failed to solve the algebraic system during fitting.
    ///
    /// Contains a static string describing the solver error.
    #[error("Failed to solve: {0}")]
    Algebra(&'static str),

    /// Reading or writing the graph store failed.
    #[error("Graph store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The graph store contents could not be encoded or decoded.
    #[error("Graph store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for an [`Error::InvalidArgument`] with a formatted message.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result type for curve fitting and graph persistence
pub type Result<T> = std::result::Result<T, Error>;
