//! Error types for the conversion engine.

use thiserror::Error;

use crate::document::ElementId;

/// Errors that can occur while converting a document.
///
/// None of these abort a pass: the scheduler logs the error, reports it to
/// the configured handler and moves on to the next element.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The element id does not belong to the document.
    #[error("unknown element: {0}")]
    UnknownElement(ElementId),

    /// The document refused an operation on an element.
    #[error("document error on {element}: {message}")]
    Document { element: ElementId, message: String },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_yaml::Error),
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
