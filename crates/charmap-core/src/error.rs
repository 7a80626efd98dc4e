//! Error and warning types for charmap.
//!
//! Provides [`PdfError`] for fatal errors that stop a character-map build,
//! [`ExtractWarning`] for recoverable malformations that allow best-effort
//! continuation, [`ExtractResult`] for pairing a value with collected
//! warnings, and [`ExtractOptions`] for strict mode and resource limits.

use std::fmt;

use crate::unicode_norm::UnicodeNorm;

/// Fatal error types for character-map construction.
///
/// In the default (non-strict) mode nearly every malformation is recovered
/// locally and reported as an [`ExtractWarning`] instead.
#[derive(Debug, Clone, PartialEq)]
pub enum PdfError {
    /// Error parsing PDF structure or CMap syntax.
    ParseError(String),
    /// An indirect reference could not be resolved.
    ReferenceError(String),
    /// A recoverable issue escalated because strict mode is enabled.
    StrictModeViolation(String),
    /// Any other error not covered by specific variants.
    Other(String),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfError::ParseError(msg) => write!(f, "parse error: {msg}"),
            PdfError::ReferenceError(msg) => write!(f, "reference error: {msg}"),
            PdfError::StrictModeViolation(msg) => write!(f, "strict mode violation: {msg}"),
            PdfError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PdfError {}

/// Machine-readable warning code for categorizing recoverable issues.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "detail")
)]
pub enum ExtractWarningCode {
    /// An indirect reference was dangling or pointed at the wrong object type.
    ReferenceResolution,
    /// A CMap operator block was malformed and discarded.
    CMapSyntax,
    /// A named encoding or CMap is not implemented.
    UnsupportedEncoding,
    /// A PDF object is malformed or has unexpected structure.
    MalformedObject,
    /// A configured resource limit was reached while parsing.
    ResourceLimitReached,
    /// Any other warning not covered by specific variants.
    Other(String),
}

impl ExtractWarningCode {
    /// Returns the string tag for this warning code.
    pub fn as_str(&self) -> &str {
        match self {
            ExtractWarningCode::ReferenceResolution => "REFERENCE_RESOLUTION",
            ExtractWarningCode::CMapSyntax => "CMAP_SYNTAX",
            ExtractWarningCode::UnsupportedEncoding => "UNSUPPORTED_ENCODING",
            ExtractWarningCode::MalformedObject => "MALFORMED_OBJECT",
            ExtractWarningCode::ResourceLimitReached => "RESOURCE_LIMIT_REACHED",
            ExtractWarningCode::Other(_) => "OTHER",
        }
    }
}

impl fmt::Display for ExtractWarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recoverable issue encountered while building a character map.
///
/// Carries a structured [`code`](ExtractWarning::code), a human-readable
/// description, and optional context: the font the issue belongs to, the
/// element involved (e.g. `"bfrange entry <0041> <0030>"`), and the byte
/// offset inside the CMap program.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractWarning {
    /// Machine-readable warning code.
    pub code: ExtractWarningCode,
    /// Human-readable description of the warning.
    pub description: String,
    /// Font name associated with the warning, if known.
    pub font_name: Option<String>,
    /// Element context (e.g., "bfchar entry 3").
    pub element: Option<String>,
    /// Byte offset inside the CMap program, if applicable.
    pub offset: Option<usize>,
}

impl ExtractWarning {
    /// Create a warning with just a description.
    ///
    /// Uses [`ExtractWarningCode::Other`] as the default code.
    pub fn new(description: impl Into<String>) -> Self {
        let desc = description.into();
        Self {
            code: ExtractWarningCode::Other(desc.clone()),
            description: desc,
            font_name: None,
            element: None,
            offset: None,
        }
    }

    /// Create a warning with a specific code and description.
    pub fn with_code(code: ExtractWarningCode, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
            font_name: None,
            element: None,
            offset: None,
        }
    }

    /// Attach the font name (builder pattern).
    pub fn for_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = Some(font_name.into());
        self
    }

    /// Attach element context (builder pattern).
    pub fn in_element(mut self, element: impl Into<String>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Attach a byte offset inside the CMap program (builder pattern).
    pub fn at_offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Convert this warning into a [`PdfError`].
    ///
    /// Used by strict mode to escalate warnings to errors.
    pub fn to_error(&self) -> PdfError {
        PdfError::StrictModeViolation(self.to_string())
    }
}

impl fmt::Display for ExtractWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.description)?;
        if let Some(ref font_name) = self.font_name {
            write!(f, " [font {font_name}]")?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (at byte {offset})")?;
        }
        if let Some(ref element) = self.element {
            write!(f, " [{element}]")?;
        }
        Ok(())
    }
}

/// Result wrapper that pairs a value with collected warnings.
#[derive(Debug, Clone)]
pub struct ExtractResult<T> {
    /// The extracted value.
    pub value: T,
    /// Warnings collected while building the value.
    pub warnings: Vec<ExtractWarning>,
}

impl<T> ExtractResult<T> {
    /// Create a result with no warnings.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Create a result with warnings.
    pub fn with_warnings(value: T, warnings: Vec<ExtractWarning>) -> Self {
        Self { value, warnings }
    }

    /// Returns true if there are no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value while preserving warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ExtractResult<U> {
        ExtractResult {
            value: f(self.value),
            warnings: self.warnings,
        }
    }
}

/// Options controlling character-map construction.
///
/// Resource limits keep corrupted CMap programs from expanding into
/// millions of entries or looping through `usecmap` chains.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// When true, any recoverable issue is escalated to an error (default: false).
    pub strict_mode: bool,
    /// Whether to collect warnings (default: true).
    pub collect_warnings: bool,
    /// Unicode normalization applied to decoded fragments (default: None).
    pub unicode_norm: UnicodeNorm,
    /// Glyph-space to text-space scale applied to widths (default: 1.0).
    pub unit_scale: f64,
    /// Maximum number of codes a single bfrange/cidrange entry may span (default: 65,536).
    pub max_cmap_range: u32,
    /// Maximum depth of `usecmap` chains (default: 8).
    pub max_usecmap_depth: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            strict_mode: false,
            collect_warnings: true,
            unicode_norm: UnicodeNorm::None,
            unit_scale: 1.0,
            max_cmap_range: 0x1_0000,
            max_usecmap_depth: 8,
        }
    }
}

impl ExtractOptions {
    /// Options that escalate every recoverable issue to a hard failure.
    pub fn strict() -> Self {
        Self {
            strict_mode: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- PdfError tests ---

    #[test]
    fn pdf_error_parse_error_creation() {
        let err = PdfError::ParseError("unterminated hex string".to_string());
        assert_eq!(err.to_string(), "parse error: unterminated hex string");
    }

    #[test]
    fn pdf_error_reference_error_creation() {
        let err = PdfError::ReferenceError("object 99 0 R not found".to_string());
        assert_eq!(err.to_string(), "reference error: object 99 0 R not found");
    }

    #[test]
    fn pdf_error_strict_violation() {
        let err = PdfError::StrictModeViolation("bad block".to_string());
        assert_eq!(err.to_string(), "strict mode violation: bad block");
    }

    #[test]
    fn pdf_error_implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(PdfError::ParseError("test".to_string()));
        assert_eq!(err.to_string(), "parse error: test");
    }

    // --- ExtractWarning tests ---

    #[test]
    fn warning_new_with_description_only() {
        let w = ExtractWarning::new("odd token");
        assert_eq!(w.description, "odd token");
        assert!(matches!(w.code, ExtractWarningCode::Other(_)));
        assert_eq!(w.font_name, None);
        assert_eq!(w.to_string(), "[OTHER] odd token");
    }

    #[test]
    fn warning_with_full_context() {
        let w = ExtractWarning::with_code(ExtractWarningCode::CMapSyntax, "bad triple")
            .for_font("F1")
            .at_offset(42)
            .in_element("bfrange entry 2");
        assert_eq!(
            w.to_string(),
            "[CMAP_SYNTAX] bad triple [font F1] (at byte 42) [bfrange entry 2]"
        );
    }

    #[test]
    fn warning_to_error_is_strict_violation() {
        let w = ExtractWarning::with_code(
            ExtractWarningCode::UnsupportedEncoding,
            "encoding /WinAnsEncoding is not supported",
        );
        let err = w.to_error();
        assert!(matches!(err, PdfError::StrictModeViolation(_)));
        assert!(err.to_string().contains("/WinAnsEncoding"));
    }

    #[test]
    fn warning_code_tags() {
        assert_eq!(
            ExtractWarningCode::ReferenceResolution.as_str(),
            "REFERENCE_RESOLUTION"
        );
        assert_eq!(ExtractWarningCode::CMapSyntax.as_str(), "CMAP_SYNTAX");
        assert_eq!(
            ExtractWarningCode::UnsupportedEncoding.as_str(),
            "UNSUPPORTED_ENCODING"
        );
        assert_eq!(ExtractWarningCode::Other("x".into()).as_str(), "OTHER");
    }

    // --- ExtractResult tests ---

    #[test]
    fn extract_result_ok_is_clean() {
        let r = ExtractResult::ok(5);
        assert!(r.is_clean());
        assert_eq!(r.map(|v| v * 2).value, 10);
    }

    #[test]
    fn extract_result_map_keeps_warnings() {
        let r = ExtractResult::with_warnings(1, vec![ExtractWarning::new("w")]);
        let mapped = r.map(|v| v + 1);
        assert_eq!(mapped.value, 2);
        assert_eq!(mapped.warnings.len(), 1);
    }

    // --- ExtractOptions tests ---

    #[test]
    fn options_defaults() {
        let opts = ExtractOptions::default();
        assert!(!opts.strict_mode);
        assert!(opts.collect_warnings);
        assert_eq!(opts.unicode_norm, UnicodeNorm::None);
        assert_eq!(opts.unit_scale, 1.0);
        assert_eq!(opts.max_cmap_range, 65_536);
        assert_eq!(opts.max_usecmap_depth, 8);
    }

    #[test]
    fn options_strict() {
        assert!(ExtractOptions::strict().strict_mode);
    }
}
