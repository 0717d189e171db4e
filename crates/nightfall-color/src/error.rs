//! Error types for color parsing.

use thiserror::Error;

/// Errors returned when a CSS color string cannot be understood.
///
/// Parsing failures are never fatal for a conversion pass: callers keep the
/// original text and move on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// A `#...` color with the wrong length or non-hex digits.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),

    /// A color function (`rgb()`, `hsl()`, ...) with the wrong shape.
    #[error("invalid color function: {0}")]
    InvalidFunction(String),

    /// A single component inside a color function that is not a number.
    #[error("invalid color component '{component}' in {color}")]
    InvalidComponent { component: String, color: String },

    /// An identifier that is not a CSS named color.
    #[error("unknown color name: {0}")]
    UnknownName(String),
}

/// Result type for color parsing.
pub type Result<T> = std::result::Result<T, ColorParseError>;
