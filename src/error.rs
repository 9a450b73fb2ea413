//! Error types for wrfjson.
//!
//! Every fallible operation in the crate returns [`Result`], and every error is
//! fatal to the export run that raised it.

use thiserror::Error;

/// The main error type for wrfjson operations.
#[derive(Error, Debug)]
pub enum WrfJsonError {
    /// NetCDF file operation errors
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    NetCdf(#[from] netcdf::Error),

    /// IO errors (directory creation, binary/JSON writes, cleanup)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed date strings (`SDATE`, export date)
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// A required global attribute is absent from the dataset
    #[error("Missing attribute: {name}")]
    MissingAttribute { name: String },

    /// A global attribute is present but has an unusable value
    #[error("Invalid attribute: {name} - {message}")]
    InvalidAttribute { name: String, message: String },

    /// Two arrays that must agree in shape do not
    #[error("Shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// A variable's time dimension disagrees with the derived time axis
    #[error("Time axis mismatch for {variable}: expected {expected} timesteps, found {actual}")]
    TimeAxisMismatch {
        variable: String,
        expected: usize,
        actual: usize,
    },

    /// Data not found errors
    #[error("Data not found: {message}")]
    DataNotFound { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// ndarray reshaping errors
    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with WrfJsonError
pub type Result<T> = std::result::Result<T, WrfJsonError>;
