//! Collection of recoverable issues during a character-map build.
//!
//! Parsers report malformations as [`ExtractWarning`] values through a
//! [`Diagnostics`] collector instead of failing. The collector logs each
//! warning (with the `tracing` feature), keeps it when warnings are
//! collected, and in strict mode turns the first one into an error.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use charmap_core::{ExtractOptions, ExtractWarning, ExtractWarningCode};

use crate::error::BackendError;

/// Names of unsupported encodings already reported.
///
/// Clones share one set, so a [`CharMapCache`](crate::CharMapCache) can hand
/// the same set to every build of a document.
#[derive(Debug, Clone, Default)]
pub struct ReportedEncodings(Arc<Mutex<HashSet<String>>>);

impl ReportedEncodings {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name`; returns true if it was not reported before.
    pub fn first_report(&self, name: &str) -> bool {
        let mut names = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        names.insert(name.to_string())
    }
}

/// Warning sink for one character-map build.
#[derive(Debug, Default)]
pub struct Diagnostics {
    strict: bool,
    collect: bool,
    font_name: Option<String>,
    warnings: Vec<ExtractWarning>,
    reported_encodings: ReportedEncodings,
}

impl Diagnostics {
    /// Create a collector configured from `options`.
    pub fn new(options: &ExtractOptions) -> Self {
        Self {
            strict: options.strict_mode,
            collect: options.collect_warnings,
            ..Self::default()
        }
    }

    /// Attach the font name added to every warning that lacks one.
    pub fn with_font_name(mut self, font_name: Option<&str>) -> Self {
        self.font_name = font_name.map(str::to_string);
        self
    }

    /// Share the set of reported encoding names with other collectors.
    pub fn with_reported_encodings(mut self, reported: ReportedEncodings) -> Self {
        self.reported_encodings = reported;
        self
    }

    /// Record a warning.
    ///
    /// Returns `Err(BackendError::Strict)` in strict mode so the caller can
    /// propagate with `?`.
    pub fn push(&mut self, mut warning: ExtractWarning) -> Result<(), BackendError> {
        if warning.font_name.is_none() {
            warning.font_name = self.font_name.clone();
        }

        #[cfg(feature = "tracing")]
        tracing::warn!(
            code = warning.code.as_str(),
            font = warning.font_name.as_deref().unwrap_or(""),
            "{}",
            warning.description
        );

        if self.strict {
            return Err(BackendError::Strict(warning));
        }
        if self.collect {
            self.warnings.push(warning);
        }
        Ok(())
    }

    /// Shorthand for [`push`](Self::push) with a code and description.
    pub fn warn(
        &mut self,
        code: ExtractWarningCode,
        description: impl Into<String>,
    ) -> Result<(), BackendError> {
        self.push(ExtractWarning::with_code(code, description))
    }

    /// Record that a named encoding is not implemented.
    ///
    /// Reported once per name across every collector sharing the same
    /// [`ReportedEncodings`]. Strict mode always reports.
    pub fn unsupported_encoding(&mut self, name: &str, fallback: &str) -> Result<(), BackendError> {
        if !self.reported_encodings.first_report(name) && !self.strict {
            return Ok(());
        }
        self.push(
            ExtractWarning::with_code(
                ExtractWarningCode::UnsupportedEncoding,
                format!("encoding /{name} is not supported, using {fallback}"),
            )
            .in_element(name),
        )
    }

    /// Warnings recorded so far.
    pub fn warnings(&self) -> &[ExtractWarning] {
        &self.warnings
    }

    /// Consume the collector, returning its warnings.
    pub fn into_warnings(self) -> Vec<ExtractWarning> {
        self.warnings
    }
}
