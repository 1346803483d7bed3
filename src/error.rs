//! Error types for the Parley library.
//!
//! All errors are represented by the [`ParleyError`] enum. Each variant maps
//! to a stable identifier (see [`ParleyError::code`]) so that callers reading
//! the structured output of the CLI can match on error kinds without parsing
//! messages.
//!
//! # Examples
//!
//! ```
//! use parley::error::{ParleyError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(ParleyError::invalid_argument("Invalid input"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {} ({})", e, e.code()),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Parley operations.
#[derive(Error, Debug)]
pub enum ParleyError {
    /// I/O errors (file operations, stdin/stdout, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The intent catalog is missing or malformed
    #[error("Catalog load error: {0}")]
    CatalogLoad(String),

    /// The model bundle is missing or corrupt
    #[error("Model load error: {0}")]
    ModelLoad(String),

    /// The catalog contains no patterns to train on
    #[error("Empty catalog: no training patterns found")]
    EmptyCatalog,

    /// An input vector does not match the dimension the model was trained with
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Prediction was requested from a classifier that holds no trained state
    #[error("Model not trained")]
    UntrainedModel,

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Invalid configuration values
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid argument passed to an operation
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with ParleyError.
pub type Result<T> = std::result::Result<T, ParleyError>;

impl ParleyError {
    /// Create a new catalog load error.
    pub fn catalog_load<S: Into<String>>(msg: S) -> Self {
        ParleyError::CatalogLoad(msg.into())
    }

    /// Create a new model load error.
    pub fn model_load<S: Into<String>>(msg: S) -> Self {
        ParleyError::ModelLoad(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        ParleyError::Analysis(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        ParleyError::InvalidConfig(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        ParleyError::InvalidArgument(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        ParleyError::Other(msg.into())
    }

    /// Stable identifier of the error kind, used in structured error payloads.
    pub fn code(&self) -> &'static str {
        match self {
            ParleyError::Io(_) => "io_error",
            ParleyError::Json(_) => "json_error",
            ParleyError::Serialization(_) => "serialization_error",
            ParleyError::CatalogLoad(_) => "catalog_load_error",
            ParleyError::ModelLoad(_) => "model_load_error",
            ParleyError::EmptyCatalog => "empty_catalog_error",
            ParleyError::DimensionMismatch { .. } => "dimension_mismatch_error",
            ParleyError::UntrainedModel => "untrained_model_error",
            ParleyError::Analysis(_) => "analysis_error",
            ParleyError::InvalidConfig(_) => "invalid_config_error",
            ParleyError::InvalidArgument(_) => "invalid_argument_error",
            ParleyError::Other(_) => "internal_error",
        }
    }
}

impl From<bincode::Error> for ParleyError {
    fn from(err: bincode::Error) -> Self {
        ParleyError::Serialization(err.to_string())
    }
}
