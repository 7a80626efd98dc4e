//! charmap-parse: Character-map construction from PDF font dictionaries.
//!
//! This crate turns a font dictionary into a [`CharacterMap`]: it parses
//! embedded CMap programs, resolves predefined CMaps and simple-font
//! encodings, overlays `ToUnicode` streams and computes the inter-word
//! space threshold. The PDF object graph is reached through the
//! [`ObjectResolver`] capability, implemented for [`lopdf::Document`].
//! It depends on charmap-core for shared data types.

pub mod cache;
pub mod cmap;
pub mod cmap_lexer;
pub mod diagnostics;
pub mod error;
pub mod font;
pub mod predefined;
pub mod resolver;
pub mod simple_encoding;
pub mod space_width;
pub mod type1;

pub use cache::{CharMapCache, FontKey};
pub use charmap_core;
pub use charmap_core::{CharacterMap, DecodedGlyph, ExtractOptions, ExtractResult};
pub use cmap::{CMap, load_cmap_stream};
pub use diagnostics::{Diagnostics, ReportedEncodings};
pub use error::BackendError;
pub use font::{CidSystemInfo, EncodingSpec, FontDescriptor, analyze_font, build_character_map};
pub use predefined::{PredefinedCMap, PredefinedKind};
pub use resolver::ObjectResolver;
pub use space_width::{GlyphMetrics, compute_space_width};
