//! The unified character map produced for every font.
//!
//! [`CharacterMap`] joins the code → Unicode table, the code → CID table,
//! the codespace used to segment content-stream strings, glyph widths and
//! the inter-word space threshold. Lookups never fail: a code missing from
//! the tables renders according to [`UnicodeFallback`].

use std::collections::HashMap;

use crate::codespace::{CodespaceTable, Segments, code_value};
use crate::legacy::LegacyCharset;

/// Smallest space threshold ever reported.
pub const MIN_SPACE_WIDTH: f64 = 1e-6;

/// Font classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FontKind {
    /// Type1, TrueType, Type3 and MMType1: single-byte codes.
    #[default]
    Simple,
    /// Composite font with a CMap-driven, possibly multi-byte encoding.
    Type0,
}

/// Writing mode declared by the CMap (`/WMode`) or implied by its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WritingMode {
    /// Horizontal (`-H`, `/WMode 0`).
    #[default]
    Horizontal,
    /// Vertical (`-V`, `/WMode 1`).
    Vertical,
}

/// What an unmapped code renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodeFallback {
    /// The empty string.
    #[default]
    Empty,
    /// The code value cast to a character. Best effort only; correct when a
    /// composite font happens to use Unicode values as CIDs.
    RawCode,
    /// The code bytes read as UTF-16BE (`Uni*-UCS2-*`, `Uni*-UTF16-*`).
    Utf16Be,
    /// The code bytes decoded in a legacy CJK charset.
    Legacy(LegacyCharset),
}

/// Font metadata carried alongside the tables.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontInfo {
    /// Simple or composite.
    pub kind: FontKind,
    /// `/Subtype` of the font dictionary.
    pub subtype: Option<String>,
    /// `/BaseFont`, with any subset prefix kept.
    pub base_font: Option<String>,
    /// Name of the encoding or CMap in effect (e.g. `WinAnsiEncoding`, `Identity-H`).
    pub encoding_name: Option<String>,
    /// Writing mode.
    pub writing_mode: WritingMode,
    /// Whether a `ToUnicode` stream was resolved and parsed.
    pub has_to_unicode: bool,
}

/// A character map: everything needed to turn content-stream bytes into text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterMap {
    /// Code value → Unicode text (may hold several characters).
    pub code_to_unicode: HashMap<u32, String>,
    /// Code value → CID, for glyph identity and width lookup.
    pub code_to_cid: HashMap<u32, u32>,
    /// Ranges used to segment byte strings into codes.
    pub codespaces: CodespaceTable,
    /// Inter-word space threshold in text-space units.
    pub space_width: f64,
    /// Rendering of codes absent from `code_to_unicode`.
    pub fallback: UnicodeFallback,
    /// Glyph widths keyed by code (simple fonts) or CID (composite fonts).
    pub widths: HashMap<u32, f64>,
    /// Width used when a glyph has no entry in `widths`.
    pub default_width: f64,
    /// Glyph-space to text-space scale.
    pub unit_scale: f64,
    /// Font metadata.
    pub info: FontInfo,
}

impl Default for CharacterMap {
    fn default() -> Self {
        Self {
            code_to_unicode: HashMap::new(),
            code_to_cid: HashMap::new(),
            codespaces: CodespaceTable::new(),
            space_width: MIN_SPACE_WIDTH,
            fallback: UnicodeFallback::Empty,
            widths: HashMap::new(),
            default_width: 0.0,
            unit_scale: 1.0,
            info: FontInfo::default(),
        }
    }
}

impl CharacterMap {
    /// An empty map for a font of the given kind.
    pub fn new(info: FontInfo) -> Self {
        Self {
            info,
            ..Self::default()
        }
    }

    /// Set the space threshold, clamped to [`MIN_SPACE_WIDTH`].
    pub fn set_space_width(&mut self, width: f64) {
        self.space_width = if width.is_finite() {
            width.max(MIN_SPACE_WIDTH)
        } else {
            MIN_SPACE_WIDTH
        };
    }

    /// Unicode text for one code.
    pub fn unicode(&self, code_bytes: &[u8]) -> String {
        let code = code_value(code_bytes);
        if let Some(text) = self.code_to_unicode.get(&code) {
            return text.clone();
        }
        match self.fallback {
            UnicodeFallback::Empty => String::new(),
            UnicodeFallback::RawCode => char::from_u32(code).map(String::from).unwrap_or_default(),
            UnicodeFallback::Utf16Be => decode_utf16be(code_bytes),
            UnicodeFallback::Legacy(charset) => charset.decode(code_bytes),
        }
    }

    /// CID for a code; codes without an entry map to themselves.
    pub fn cid(&self, code: u32) -> u32 {
        self.code_to_cid.get(&code).copied().unwrap_or(code)
    }

    /// Glyph width of a code in glyph units.
    pub fn glyph_width(&self, code: u32) -> f64 {
        let key = match self.info.kind {
            FontKind::Simple => code,
            FontKind::Type0 => self.cid(code),
        };
        self.widths.get(&key).copied().unwrap_or(self.default_width)
    }

    /// Horizontal displacement of a code in text-space units.
    pub fn displacement(&self, code: u32) -> f64 {
        self.glyph_width(code) * self.unit_scale
    }

    /// Smallest code whose Unicode text equals `text`.
    pub fn code_for_unicode(&self, text: &str) -> Option<u32> {
        self.code_to_unicode
            .iter()
            .filter(|(_, t)| t.as_str() == text)
            .map(|(&code, _)| code)
            .min()
    }

    /// Whether codes may be longer than one byte.
    pub fn is_multibyte(&self) -> bool {
        self.codespaces.max_code_length() > 1
    }

    /// Decode a content-stream string glyph by glyph.
    ///
    /// The iterator is finite, deterministic, and can be recreated at any
    /// time from the same input.
    pub fn decode<'a>(&'a self, bytes: &'a [u8]) -> Decode<'a> {
        Decode {
            map: self,
            segments: self.codespaces.segment(bytes),
        }
    }

    /// Decode a content-stream string to text.
    pub fn decode_text(&self, bytes: &[u8]) -> String {
        self.decode(bytes).map(|glyph| glyph.text).collect()
    }
}

/// One decoded code.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedGlyph<'a> {
    /// Integer code value.
    pub code: u32,
    /// Bytes the code was read from.
    pub bytes: &'a [u8],
    /// Unicode text (possibly empty or several characters).
    pub text: String,
    /// Horizontal advance in text-space units.
    pub displacement: f64,
}

/// Iterator returned by [`CharacterMap::decode`].
#[derive(Debug, Clone)]
pub struct Decode<'a> {
    map: &'a CharacterMap,
    segments: Segments<'a>,
}

impl<'a> Iterator for Decode<'a> {
    type Item = DecodedGlyph<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.segments.next()?;
        let code = code_value(bytes);
        Some(DecodedGlyph {
            code,
            bytes,
            text: self.map.unicode(bytes),
            displacement: self.map.displacement(code),
        })
    }
}

/// Decode big-endian UTF-16 bytes, replacing unpaired surrogates.
///
/// A trailing odd byte is ignored.
pub fn decode_utf16be(bytes: &[u8]) -> String {
    let units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect();
    String::from_utf16_lossy(&units)
}
