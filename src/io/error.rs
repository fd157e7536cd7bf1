//! Error types shared by the numerical tools and the command-line front end

use std::fmt;
use std::path::PathBuf;

/// Main error type for all analysis operations
#[derive(Debug)]
pub enum AnalysisError {
    /// An operation that needs data was handed an empty input
    EmptyInput {
        /// Name of the operation that required data
        operation: &'static str,
    },

    /// Image has no pixels or otherwise cannot be processed
    InvalidImage {
        /// Image width in pixels
        width: u32,
        /// Image height in pixels
        height: u32,
        /// Explanation of why the image was rejected
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save an image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyInput { operation } => {
                write!(f, "Empty input: {operation} requires at least one sample")
            }
            Self::InvalidImage {
                width,
                height,
                reason,
            } => {
                write!(f, "Invalid image ({width}x{height}): {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> AnalysisError {
    AnalysisError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Reject non-finite or non-positive values for scale-like parameters
///
/// # Errors
///
/// Returns `InvalidParameter` when `value` is NaN, infinite, or not strictly positive
pub fn require_positive(parameter: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(invalid_parameter(parameter, &value, &"must be finite"));
    }
    if value <= 0.0 {
        return Err(invalid_parameter(parameter, &value, &"must be positive"));
    }
    Ok(value)
}

/// Reject NaN and infinite values
///
/// # Errors
///
/// Returns `InvalidParameter` when `value` is NaN or infinite
pub fn require_finite(parameter: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid_parameter(parameter, &value, &"must be finite"))
    }
}
