//! Inter-word space threshold.
//!
//! The text walker inserts a literal space between two glyphs when the gap
//! between them exceeds the font's space width. The width comes from the
//! space glyph itself when the font declares it, and from progressively
//! coarser estimates otherwise.

use std::collections::HashMap;

use charmap_core::{CharacterMap, FontEncoding, FontKind, UnicodeFallback, strip_subset_prefix};
use lopdf::Object;

use crate::resolver::{ObjectResolver, object_to_f64, object_to_u32};

/// Space width used when nothing better is known, in glyph units.
pub const DEFAULT_SPACE_WIDTH: f64 = 250.0;

/// Declared glyph widths of a font.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphMetrics {
    /// Width by code (simple fonts, `/Widths`) or CID (composite fonts, `/W`).
    pub widths: HashMap<u32, f64>,
    /// `/FirstChar` of a simple font.
    pub first_char: Option<u32>,
    /// `/LastChar` of a simple font.
    pub last_char: Option<u32>,
    /// `/FontDescriptor/MissingWidth`.
    pub missing_width: Option<f64>,
    /// `/DW` of a CIDFont, when declared.
    pub declared_dw: Option<f64>,
}

impl GlyphMetrics {
    /// Whether `code` lies inside `FirstChar..=LastChar`.
    pub fn in_declared_range(&self, code: u32) -> bool {
        match (self.first_char, self.last_char) {
            (Some(first), Some(last)) => (first..=last).contains(&code),
            (Some(first), None) => code >= first,
            _ => false,
        }
    }

    /// Width used for glyphs without an entry.
    pub fn default_width(&self, kind: FontKind) -> f64 {
        match kind {
            FontKind::Simple => self.missing_width.unwrap_or(0.0),
            FontKind::Type0 => self.declared_dw.unwrap_or(1000.0),
        }
    }
}

/// Parse a simple font's `/Widths` array, indexed from `first_char`.
pub fn parse_widths<R: ObjectResolver + ?Sized>(
    resolver: &R,
    objects: &[Object],
    first_char: u32,
) -> HashMap<u32, f64> {
    objects
        .iter()
        .enumerate()
        .filter_map(|(i, obj)| {
            let w = resolver.resolve(obj).ok().and_then(object_to_f64)?;
            let code = first_char.checked_add(u32::try_from(i).ok()?)?;
            Some((code, w))
        })
        .collect()
}

/// Parse a CIDFont `/W` array.
///
/// Two formats are accepted:
/// - `c [w1 w2 ...]`: consecutive CIDs starting at `c`
/// - `c_first c_last w`: every CID in the range has width `w`
///
/// Ranges wider than `max_range` are skipped.
pub fn parse_w_array<R: ObjectResolver + ?Sized>(
    resolver: &R,
    objects: &[Object],
    max_range: u32,
) -> HashMap<u32, f64> {
    let mut widths = HashMap::new();
    let mut i = 0;

    while i < objects.len() {
        let Some(cid_start) = resolved(resolver, &objects[i]).and_then(object_to_u32) else {
            i += 1;
            continue;
        };
        i += 1;

        let Some(next) = objects.get(i).and_then(|obj| resolved(resolver, obj)) else {
            break;
        };
        if let Ok(arr) = next.as_array() {
            for (j, obj) in arr.iter().enumerate() {
                let Some(cid) = u32::try_from(j).ok().and_then(|j| cid_start.checked_add(j)) else {
                    break;
                };
                if let Some(w) = resolved(resolver, obj).and_then(object_to_f64) {
                    widths.insert(cid, w);
                }
            }
            i += 1;
        } else if let Some(cid_end) = object_to_u32(next) {
            i += 1;
            let w = objects
                .get(i)
                .and_then(|obj| resolved(resolver, obj))
                .and_then(object_to_f64);
            if let Some(w) = w {
                let span = cid_end.saturating_sub(cid_start);
                if cid_end >= cid_start && span < max_range {
                    for cid in cid_start..=cid_end {
                        widths.insert(cid, w);
                    }
                }
            }
            i += 1;
        } else {
            i += 1;
        }
    }

    widths
}

fn resolved<'a, R: ObjectResolver + ?Sized>(
    resolver: &'a R,
    obj: &'a Object,
) -> Option<&'a Object> {
    resolver.resolve(obj).ok()
}

/// Space glyph width of a standard-14 font, in glyph units.
pub fn standard_space_width(base_font: &str) -> Option<f64> {
    let name = strip_subset_prefix(base_font);
    let width = match name {
        "Courier" | "Courier-Bold" | "Courier-Oblique" | "Courier-BoldOblique" => 600.0,
        "Helvetica" | "Helvetica-Oblique" | "Helvetica-Bold" | "Helvetica-BoldOblique" => 278.0,
        "Times-Roman" | "Times-Bold" | "Times-Italic" | "Times-BoldItalic" => 250.0,
        "Symbol" => 250.0,
        "ZapfDingbats" => 278.0,
        _ => return None,
    };
    Some(width)
}

/// Code of the space glyph.
///
/// Simple fonts use the code their encoding assigns to the glyph `space`
/// (`/Differences` first, then the base table), else 32. Composite fonts
/// use the smallest code whose Unicode text is `" "`, else 0x20 when codes
/// are Unicode-like.
pub fn space_code(map: &CharacterMap, encoding: Option<&FontEncoding>) -> Option<u32> {
    match map.info.kind {
        FontKind::Simple => {
            let code = encoding.and_then(|enc| enc.code_for_glyph("space"));
            Some(code.map_or(32, u32::from))
        }
        FontKind::Type0 => map.code_for_unicode(" ").or(match map.fallback {
            UnicodeFallback::Empty => None,
            _ => Some(0x20),
        }),
    }
}

/// Compute the space threshold in text-space units.
///
/// In order of preference:
/// 1. the declared width `W` of the space glyph, as `W * unit_scale`
/// 2. `MissingWidth`, when the space code is outside `FirstChar..=LastChar`
/// 3. the built-in space width of a standard-14 font without `/Widths`
/// 4. half the average of the positive declared widths
/// 5. half of `/DW` (composite fonts)
/// 6. `hint` when positive, else [`DEFAULT_SPACE_WIDTH`]
///
/// The caller clamps the result with [`CharacterMap::set_space_width`].
pub fn compute_space_width(
    map: &CharacterMap,
    metrics: &GlyphMetrics,
    space_code: Option<u32>,
    hint: f64,
) -> f64 {
    let scale = map.unit_scale;

    if let Some(code) = space_code {
        let key = match map.info.kind {
            FontKind::Simple => code,
            FontKind::Type0 => map.cid(code),
        };
        if let Some(&w) = metrics.widths.get(&key) {
            if w > 0.0 {
                return w * scale;
            }
        }
        if map.info.kind == FontKind::Simple && !metrics.in_declared_range(code) {
            if let Some(mw) = metrics.missing_width.filter(|&mw| mw > 0.0) {
                return mw * scale;
            }
        }
    }

    if metrics.widths.is_empty() && map.info.kind == FontKind::Simple {
        if let Some(w) = map.info.base_font.as_deref().and_then(standard_space_width) {
            return w * scale;
        }
    }

    let positive: Vec<f64> = metrics
        .widths
        .values()
        .copied()
        .filter(|&w| w > 0.0)
        .collect();
    if !positive.is_empty() {
        let average = positive.iter().sum::<f64>() / positive.len() as f64;
        return average * 0.5 * scale;
    }

    if map.info.kind == FontKind::Type0 {
        if let Some(dw) = metrics.declared_dw.filter(|&dw| dw > 0.0) {
            return dw * 0.5 * scale;
        }
    }

    if hint > 0.0 {
        hint
    } else {
        DEFAULT_SPACE_WIDTH * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use charmap_core::{BaseEncoding, FontInfo};
    use lopdf::Document;

    fn simple(base_font: &str) -> CharacterMap {
        let mut map = CharacterMap::new(FontInfo {
            base_font: Some(base_font.to_string()),
            ..FontInfo::default()
        });
        map.unit_scale = 0.001;
        map
    }

    fn composite() -> CharacterMap {
        let mut map = CharacterMap::new(FontInfo {
            kind: FontKind::Type0,
            ..FontInfo::default()
        });
        map.unit_scale = 0.001;
        map.fallback = UnicodeFallback::RawCode;
        map
    }

    // --- /W and /Widths ---

    #[test]
    fn parse_w_array_both_formats() {
        let doc = Document::with_version("1.5");
        let objects = vec![
            Object::Integer(1),
            Object::Array(vec![Object::Integer(500), Object::Real(600.5)]),
            Object::Integer(10),
            Object::Integer(12),
            Object::Integer(1000),
        ];
        let widths = parse_w_array(&doc, &objects, 0x1_0000);
        assert_eq!(widths.get(&1), Some(&500.0));
        assert_eq!(widths.get(&2), Some(&600.5));
        assert_eq!(widths.get(&10), Some(&1000.0));
        assert_eq!(widths.get(&12), Some(&1000.0));
        assert_eq!(widths.len(), 5);
    }

    #[test]
    fn parse_w_array_range_limit() {
        let doc = Document::with_version("1.5");
        let objects = vec![
            Object::Integer(0),
            Object::Integer(70_000),
            Object::Integer(500),
        ];
        assert!(parse_w_array(&doc, &objects, 0x1_0000).is_empty());
    }

    #[test]
    fn parse_w_array_truncated() {
        let doc = Document::with_version("1.5");
        let objects = vec![Object::Integer(5)];
        assert!(parse_w_array(&doc, &objects, 0x1_0000).is_empty());
    }

    #[test]
    fn parse_widths_from_first_char() {
        let doc = Document::with_version("1.5");
        let objects = vec![Object::Integer(250), Object::Integer(333), Object::Null];
        let widths = parse_widths(&doc, &objects, 32);
        assert_eq!(widths.get(&32), Some(&250.0));
        assert_eq!(widths.get(&33), Some(&333.0));
        assert_eq!(widths.get(&34), None);
    }

    // --- space code ---

    #[test]
    fn simple_space_code_defaults_to_32() {
        assert_eq!(space_code(&simple("Helvetica"), None), Some(32));
    }

    #[test]
    fn simple_space_code_from_differences() {
        let mut encoding = FontEncoding::new(BaseEncoding::Standard);
        encoding.set_glyph(3, "space");
        assert_eq!(space_code(&simple("F"), Some(&encoding)), Some(3));
    }

    #[test]
    fn simple_space_code_from_builtin_table() {
        // Built-in encoding with no base: the glyph sits at a custom code
        let mut encoding = FontEncoding::builtin();
        encoding.set_glyph(0x0A, "space");
        assert_eq!(space_code(&simple("F"), Some(&encoding)), Some(0x0A));
        // No space glyph anywhere
        let encoding = FontEncoding::builtin();
        assert_eq!(space_code(&simple("F"), Some(&encoding)), Some(32));
    }

    #[test]
    fn composite_space_code_from_unicode_map() {
        let mut map = composite();
        map.code_to_unicode.insert(0x0003, " ".to_string());
        assert_eq!(space_code(&map, None), Some(3));
        map.code_to_unicode.clear();
        assert_eq!(space_code(&map, None), Some(0x20));
        map.fallback = UnicodeFallback::Empty;
        assert_eq!(space_code(&map, None), None);
    }

    // --- threshold chain ---

    #[test]
    fn declared_space_width_scaled_exactly() {
        let map = simple("F");
        let metrics = GlyphMetrics {
            widths: HashMap::from([(32, 278.0), (65, 722.0)]),
            first_char: Some(32),
            last_char: Some(65),
            ..GlyphMetrics::default()
        };
        let w = compute_space_width(&map, &metrics, Some(32), 0.0);
        assert_eq!(w, 278.0 * 0.001);
    }

    #[test]
    fn missing_width_outside_declared_range() {
        let map = simple("F");
        let metrics = GlyphMetrics {
            widths: HashMap::from([(65, 600.0)]),
            first_char: Some(65),
            last_char: Some(65),
            missing_width: Some(300.0),
            ..GlyphMetrics::default()
        };
        let w = compute_space_width(&map, &metrics, Some(32), 0.0);
        assert_eq!(w, 300.0 * 0.001);
    }

    #[test]
    fn standard_14_without_widths() {
        let map = simple("ABCDEF+Courier");
        let w = compute_space_width(&map, &GlyphMetrics::default(), Some(32), 0.0);
        assert_eq!(w, 600.0 * 0.001);
    }

    #[test]
    fn half_average_of_positive_widths() {
        let map = simple("F");
        let metrics = GlyphMetrics {
            widths: HashMap::from([(65, 600.0), (66, 400.0), (67, 0.0)]),
            first_char: Some(65),
            last_char: Some(67),
            ..GlyphMetrics::default()
        };
        let w = compute_space_width(&map, &metrics, Some(32), 0.0);
        assert!((w - 0.25).abs() < 1e-12);
    }

    #[test]
    fn composite_uses_cid_then_dw() {
        let mut map = composite();
        map.code_to_unicode.insert(0x0001, " ".to_string());
        map.code_to_cid.insert(0x0001, 3);
        let metrics = GlyphMetrics {
            widths: HashMap::from([(3, 320.0)]),
            declared_dw: Some(1000.0),
            ..GlyphMetrics::default()
        };
        let w = compute_space_width(&map, &metrics, Some(1), 0.0);
        assert_eq!(w, 320.0 * 0.001);

        let metrics = GlyphMetrics {
            declared_dw: Some(1000.0),
            ..GlyphMetrics::default()
        };
        assert_eq!(compute_space_width(&map, &metrics, Some(1), 0.0), 0.5);
    }

    #[test]
    fn hint_then_default() {
        let map = composite();
        let metrics = GlyphMetrics::default();
        assert_eq!(compute_space_width(&map, &metrics, None, 0.2), 0.2);
        assert_eq!(compute_space_width(&map, &metrics, None, -1.0), 0.25);
    }

    #[test]
    fn default_widths_by_kind() {
        let metrics = GlyphMetrics::default();
        assert_eq!(metrics.default_width(FontKind::Simple), 0.0);
        assert_eq!(metrics.default_width(FontKind::Type0), 1000.0);
    }
}
