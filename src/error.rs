//! Error types for docsift.

use std::any::Any;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting outlines or ranking sections.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading inputs or writing outputs.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// A text backend failed for a whole document.
    #[error("{backend} backend failed: {message}")]
    Extraction {
        /// Backend name
        backend: String,
        /// Failure description
        message: String,
    },

    /// The collection input file is malformed.
    #[error("Invalid collection config: {0}")]
    Config(String),

    /// A produced record does not have the expected shape.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Error serializing an output record.
    #[error("Rendering error: {0}")]
    Render(String),

    /// No input items were found in the input directory.
    #[error("No input files found in {}", .0.display())]
    NoInputs(PathBuf),

    /// Processing one item panicked.
    #[error("Panicked: {0}")]
    Panicked(String),
}

/// Message carried by a caught panic payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<pdf_extract::OutputError> for Error {
    fn from(err: pdf_extract::OutputError) -> Self {
        Error::TextExtract(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Extraction {
            backend: "lopdf".to_string(),
            message: "bad xref".to_string(),
        };
        assert_eq!(err.to_string(), "lopdf backend failed: bad xref");

        let err = Error::NoInputs(PathBuf::from("input"));
        assert_eq!(err.to_string(), "No input files found in input");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_is_config() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_panic_message() {
        let payload = std::panic::catch_unwind(|| panic!("index out of bounds")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "index out of bounds");

        let payload = std::panic::catch_unwind(|| panic!("page {}", 3)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "page 3");
    }
}
