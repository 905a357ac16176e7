//! Error types for note detection.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DetectError>;

/// Errors returned by [`crate::detect_and_annotate`] and its helpers.
///
/// Finding no notes is not an error: the call succeeds with an empty
/// candidate list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectError {
    /// The input image cannot be processed (empty, or not a colour image).
    #[error("invalid image: {reason}")]
    InvalidImage { reason: String },

    /// A tuning parameter is out of its accepted range.
    #[error("invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// An image-processing step could not complete on the given data.
    #[error("processing failed during {operation}")]
    ProcessingFailure { operation: String },
}

impl DetectError {
    pub(crate) fn invalid_image(reason: impl Into<String>) -> Self {
        Self::InvalidImage {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_parameter(parameter: &str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
        }
    }

    pub(crate) fn processing(operation: impl Into<String>) -> Self {
        Self::ProcessingFailure {
            operation: operation.into(),
        }
    }
}
