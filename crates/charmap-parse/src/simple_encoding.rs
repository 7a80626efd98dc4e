//! Encoding resolution for simple (single-byte) fonts.
//!
//! The `/Encoding` entry of a Type1, TrueType or Type3 font is a base
//! encoding name, a dictionary with `/BaseEncoding` and `/Differences`, or
//! absent. Absent encodings fall back to the font program's built-in
//! encoding (Type1) or to the default implied by `/BaseFont`.

use charmap_core::{BaseEncoding, ExtractWarningCode, FontEncoding};
use lopdf::Object;

use crate::diagnostics::Diagnostics;
use crate::error::BackendError;
use crate::font::{EncodingSpec, FontDescriptor};
use crate::resolver::{ObjectResolver, type_name};
use crate::type1;

/// Parse a `/Differences` array into `(code, glyph name)` pairs.
///
/// Format: `[code1 /name1 /name2 ... codeN /nameN ...]`. Each integer starts
/// a run; subsequent names are assigned consecutive codes. Names whose code
/// falls outside `0..=255` are dropped.
pub fn parse_differences<R: ObjectResolver + ?Sized>(
    resolver: &R,
    array: &[Object],
    diag: &mut Diagnostics,
) -> Result<Vec<(u8, String)>, BackendError> {
    let mut result = Vec::new();
    let mut current_code: Option<i64> = None;

    for obj in array {
        let obj = match resolver.resolve(obj) {
            Ok(obj) => obj,
            Err(e) => {
                diag.warn(
                    ExtractWarningCode::ReferenceResolution,
                    format!("/Differences: {e}"),
                )?;
                continue;
            }
        };
        match obj {
            Object::Integer(i) => current_code = Some(*i),
            Object::Name(name) => {
                let Some(code) = current_code else {
                    diag.warn(
                        ExtractWarningCode::MalformedObject,
                        "/Differences name before any code",
                    )?;
                    continue;
                };
                match u8::try_from(code) {
                    Ok(byte) => result.push((byte, String::from_utf8_lossy(name).into_owned())),
                    Err(_) => diag.warn(
                        ExtractWarningCode::MalformedObject,
                        format!("/Differences code {code} out of range"),
                    )?,
                }
                current_code = Some(code.saturating_add(1));
            }
            other => diag.warn(
                ExtractWarningCode::MalformedObject,
                format!("unexpected {} in /Differences", type_name(other)),
            )?,
        }
    }

    Ok(result)
}

/// Resolve the encoding of a simple font.
pub fn resolve_encoding<R: ObjectResolver + ?Sized>(
    resolver: &R,
    font: &FontDescriptor<'_>,
    diag: &mut Diagnostics,
) -> Result<FontEncoding, BackendError> {
    let mut encoding = match &font.encoding {
        EncodingSpec::Name(name) => named_base(name, diag)?,
        EncodingSpec::Dictionary(_) => match &font.base_encoding {
            Some(name) => named_base(name, diag)?,
            None => default_encoding(resolver, font, diag)?,
        },
        EncodingSpec::Stream(_) => {
            diag.warn(
                ExtractWarningCode::MalformedObject,
                "simple font /Encoding is a stream; using the default encoding",
            )?;
            default_encoding(resolver, font, diag)?
        }
        EncodingSpec::Absent | EncodingSpec::Invalid => default_encoding(resolver, font, diag)?,
    };
    encoding.apply_differences(&font.differences);
    Ok(encoding)
}

/// Human-readable name of the encoding in effect.
pub fn encoding_name(encoding: &FontEncoding) -> String {
    match encoding.base() {
        Some(base) => base.name().to_string(),
        None => "FontSpecific".to_string(),
    }
}

fn named_base(name: &str, diag: &mut Diagnostics) -> Result<FontEncoding, BackendError> {
    match BaseEncoding::from_name(name) {
        Some(base) => Ok(FontEncoding::new(base)),
        None => {
            diag.unsupported_encoding(name, BaseEncoding::Standard.name())?;
            Ok(FontEncoding::new(BaseEncoding::Standard))
        }
    }
}

/// Built-in Type1 encoding when one can be read, else the BaseFont default.
fn default_encoding<R: ObjectResolver + ?Sized>(
    resolver: &R,
    font: &FontDescriptor<'_>,
    diag: &mut Diagnostics,
) -> Result<FontEncoding, BackendError> {
    if let Some(stream) = font.font_file {
        match resolver.stream_data(stream) {
            Ok(program) => {
                if let Some(builtin) = type1::builtin_encoding(&program) {
                    return Ok(builtin);
                }
            }
            Err(e) => {
                diag.warn(
                    ExtractWarningCode::MalformedObject,
                    format!("/FontFile: {e}"),
                )?;
            }
        }
    }
    let base = font
        .base_font
        .as_deref()
        .map(BaseEncoding::for_base_font)
        .unwrap_or(BaseEncoding::Standard);
    Ok(FontEncoding::new(base))
}

#[cfg(test)]
mod tests {
    use super::*;
    use charmap_core::ExtractOptions;
    use lopdf::Document;

    fn name(s: &str) -> Object {
        Object::Name(s.as_bytes().to_vec())
    }

    fn diag() -> Diagnostics {
        Diagnostics::new(&ExtractOptions::default())
    }

    // --- /Differences ---

    #[test]
    fn differences_runs() {
        let doc = Document::with_version("1.5");
        let array = vec![
            Object::Integer(65),
            name("Alpha"),
            name("Beta"),
            Object::Integer(200),
            name("space"),
        ];
        let mut diag = diag();
        let diffs = parse_differences(&doc, &array, &mut diag).unwrap();
        assert_eq!(
            diffs,
            vec![
                (65, "Alpha".to_string()),
                (66, "Beta".to_string()),
                (200, "space".to_string()),
            ]
        );
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn differences_out_of_range_codes_dropped() {
        let doc = Document::with_version("1.5");
        let array = vec![
            Object::Integer(255),
            name("a"),
            name("b"),
            Object::Integer(-1),
            name("c"),
        ];
        let mut diag = diag();
        let diffs = parse_differences(&doc, &array, &mut diag).unwrap();
        assert_eq!(diffs, vec![(255, "a".to_string())]);
        assert_eq!(diag.warnings().len(), 2);
    }

    #[test]
    fn differences_malformed_entries_warn() {
        let doc = Document::with_version("1.5");
        let array = vec![
            name("orphan"),
            Object::Integer(1),
            Object::Boolean(true),
            name("A"),
        ];
        let mut diag = diag();
        let diffs = parse_differences(&doc, &array, &mut diag).unwrap();
        assert_eq!(diffs, vec![(1, "A".to_string())]);
        let warnings = diag.into_warnings();
        assert_eq!(warnings.len(), 2);
        for warning in &warnings {
            assert_eq!(warning.code, ExtractWarningCode::MalformedObject);
        }
    }

    #[test]
    fn differences_follow_references() {
        let mut doc = Document::with_version("1.5");
        let id = doc.add_object(name("Omega"));
        let array = vec![
            Object::Integer(10),
            Object::Reference(id),
            Object::Reference((999, 0)),
        ];
        let mut diag = diag();
        let diffs = parse_differences(&doc, &array, &mut diag).unwrap();
        assert_eq!(diffs, vec![(10, "Omega".to_string())]);
        let warning = &diag.warnings()[0];
        assert_eq!(warning.code, ExtractWarningCode::ReferenceResolution);
    }

    // --- base encodings ---

    #[test]
    fn misspelled_name_falls_back_to_standard() {
        let mut diag = diag();
        let encoding = named_base("WinAnsEncoding", &mut diag).unwrap();
        assert_eq!(encoding.base(), Some(BaseEncoding::Standard));
        let warnings = diag.into_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, ExtractWarningCode::UnsupportedEncoding);
        assert!(warnings[0].description.contains("WinAnsEncoding"));
    }

    #[test]
    fn mac_expert_is_a_known_base() {
        let mut diag = diag();
        let encoding = named_base("MacExpertEncoding", &mut diag).unwrap();
        assert_eq!(encoding.base(), Some(BaseEncoding::MacExpert));
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn known_names_do_not_warn() {
        let mut diag = diag();
        let encoding = named_base("WinAnsiEncoding", &mut diag).unwrap();
        assert_eq!(encoding.base(), Some(BaseEncoding::WinAnsi));
        assert!(diag.warnings().is_empty());
    }

    #[test]
    fn encoding_names() {
        let mac_roman = FontEncoding::new(BaseEncoding::MacRoman);
        assert_eq!(encoding_name(&mac_roman), "MacRomanEncoding");
        assert_eq!(encoding_name(&FontEncoding::builtin()), "FontSpecific");
    }
}
