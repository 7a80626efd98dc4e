//! charmap-core: Backend-independent character-map types and tables.
//!
//! This crate provides the data model for turning PDF content-stream bytes
//! into Unicode text: codespace segmentation ([`CodespaceTable`]), the
//! built-in single-byte encodings ([`BaseEncoding`], [`FontEncoding`]), the
//! Adobe Glyph List, legacy CJK charsets, and the unified [`CharacterMap`]
//! with its glyph-by-glyph [`Decode`] iterator. It knows nothing about PDF
//! object graphs; `charmap-parse` builds character maps from font
//! dictionaries.

pub mod charmap;
pub mod codespace;
pub mod encoding;
pub mod error;
pub mod glyph_list;
pub mod legacy;
pub mod unicode_norm;

pub use charmap::{
    CharacterMap, Decode, DecodedGlyph, FontInfo, FontKind, MIN_SPACE_WIDTH, UnicodeFallback,
    WritingMode, decode_utf16be,
};
pub use codespace::{CodespaceRange, CodespaceTable, MAX_CODE_LENGTH, Segments, code_value};
pub use encoding::{BaseEncoding, FontEncoding, strip_subset_prefix};
pub use error::{ExtractOptions, ExtractResult, ExtractWarning, ExtractWarningCode, PdfError};
pub use glyph_list::{glyph_name_to_char, glyph_name_to_unicode};
pub use legacy::LegacyCharset;
pub use unicode_norm::{UnicodeNorm, normalize_map_values};
