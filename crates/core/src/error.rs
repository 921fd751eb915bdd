//! Error types for slide deck import.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Document-level errors. Any of these aborts the whole import.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to read the input bytes.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// The input could not be parsed as the declared document variant.
    #[error("Unreadable input: {0}")]
    UnreadableInput(String),

    /// The external document parser rejected the input.
    #[error("Document parser error: {0}")]
    ParserError(String),
}

/// Reasons a single shape is dropped from the output.
///
/// These never abort an import; the flattener records them as diagnostics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// No table entry for the shape type and no raw path to fall back on.
    #[error("no geometry for shape type '{0}'")]
    NoGeometry(String),

    /// The raw path could not be parsed as SVG path data.
    #[error("unparsable path data: {0}")]
    InvalidPath(String),

    /// The computed viewBox has a zero, negative or non-finite dimension.
    #[error("degenerate viewBox [{0}, {1}]")]
    DegenerateViewBox(f64, f64),
}

/// Reasons an element is left out of a converted slide.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// The raw entry did not decode as any known element kind.
    #[error("malformed element: {0}")]
    Malformed(String),

    #[error(transparent)]
    Shape(#[from] ShapeError),
}
