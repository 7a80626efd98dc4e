//! Error types for the font and CMap parsing layers.
//!
//! Uses [`thiserror`] for ergonomic error derivation. Provides [`BackendError`]
//! that wraps backend-specific errors and converts them to [`PdfError`].

use charmap_core::{ExtractWarning, PdfError};
use thiserror::Error;

/// Error type for character-map construction.
///
/// Wraps backend-specific errors and provides conversion to [`PdfError`]
/// for unified error handling across the library.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error from PDF parsing (structure, syntax).
    #[error("PDF parse error: {0}")]
    Parse(String),

    /// An indirect reference was dangling or pointed at the wrong type.
    #[error("reference resolution error: {0}")]
    Resolution(String),

    /// A recoverable issue escalated because strict mode is enabled.
    #[error("strict mode: {0}")]
    Strict(ExtractWarning),

    /// A core library error.
    #[error(transparent)]
    Core(#[from] PdfError),
}

impl From<BackendError> for PdfError {
    fn from(err: BackendError) -> Self {
        match err {
            BackendError::Parse(msg) => PdfError::ParseError(msg),
            BackendError::Resolution(msg) => PdfError::ReferenceError(msg),
            BackendError::Strict(warning) => warning.to_error(),
            BackendError::Core(e) => e,
        }
    }
}
