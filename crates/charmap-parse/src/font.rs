//! Font dictionary analysis and character-map construction.
//!
//! [`analyze_font`] classifies a font dictionary and gathers everything the
//! encoding resolvers need into a [`FontDescriptor`]. [`build_character_map`]
//! then routes simple fonts to the base-encoding resolver and composite
//! fonts to the CMap parser or the predefined CMap registry, overlays the
//! `ToUnicode` stream and computes the space threshold.

use charmap_core::{
    CharacterMap, CodespaceTable, ExtractOptions, ExtractResult, ExtractWarningCode, FontEncoding,
    FontInfo, FontKind, UnicodeFallback, normalize_map_values,
};
use lopdf::{Dictionary, Object, Stream};

use crate::cmap::{CMap, load_cmap_stream};
use crate::diagnostics::{Diagnostics, ReportedEncodings};
use crate::error::BackendError;
use crate::predefined::PredefinedCMap;
use crate::resolver::{ObjectResolver, name_of, object_to_f64, object_to_u32, type_name};
use crate::simple_encoding::{encoding_name, parse_differences, resolve_encoding};
use crate::space_width::{
    GlyphMetrics, compute_space_width, parse_w_array, parse_widths, space_code,
};

/// The `/Encoding` entry of a font dictionary.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodingSpec<'a> {
    /// No `/Encoding` key.
    Absent,
    /// A named encoding or predefined CMap.
    Name(String),
    /// An embedded CMap stream (composite fonts).
    Stream(&'a Stream),
    /// An encoding dictionary (simple fonts).
    Dictionary(&'a Dictionary),
    /// Present but unusable (dangling reference or wrong type); already reported.
    Invalid,
}

/// `/CIDSystemInfo` of a descendant CIDFont.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CidSystemInfo {
    /// e.g. `Adobe`.
    pub registry: String,
    /// e.g. `Japan1`, `Identity`.
    pub ordering: String,
    /// Supplement number.
    pub supplement: i64,
}

/// Everything the character-map builder reads from a font dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor<'a> {
    /// Simple or composite.
    pub kind: FontKind,
    /// `/Subtype`.
    pub subtype: Option<String>,
    /// `/BaseFont`.
    pub base_font: Option<String>,
    /// `/Encoding`.
    pub encoding: EncodingSpec<'a>,
    /// `/BaseEncoding` of an encoding dictionary.
    pub base_encoding: Option<String>,
    /// `/Differences` of an encoding dictionary.
    pub differences: Vec<(u8, String)>,
    /// `/ToUnicode`, unresolved.
    pub to_unicode: Option<&'a Object>,
    /// `/CIDSystemInfo` of the descendant font.
    pub cid_system_info: Option<CidSystemInfo>,
    /// `/FontDescriptor/FontFile` (Type1 program).
    pub font_file: Option<&'a Stream>,
    /// Declared widths.
    pub metrics: GlyphMetrics,
}

/// Look up `key`, reporting a dangling reference as a warning.
fn lookup_or_warn<'a, R: ObjectResolver + ?Sized>(
    resolver: &'a R,
    dict: &'a Dictionary,
    key: &[u8],
    diag: &mut Diagnostics,
) -> Result<Option<&'a Object>, BackendError> {
    match resolver.lookup(dict, key) {
        Ok(obj) => Ok(obj),
        Err(e) => {
            diag.warn(
                ExtractWarningCode::ReferenceResolution,
                format!("/{}: {e}", String::from_utf8_lossy(key)),
            )?;
            Ok(None)
        }
    }
}

/// Look up `key` and require a dictionary (a stream's dictionary counts).
fn lookup_dict<'a, R: ObjectResolver + ?Sized>(
    resolver: &'a R,
    dict: &'a Dictionary,
    key: &[u8],
    diag: &mut Diagnostics,
) -> Result<Option<&'a Dictionary>, BackendError> {
    match lookup_or_warn(resolver, dict, key, diag)? {
        None => Ok(None),
        Some(Object::Dictionary(d)) => Ok(Some(d)),
        Some(Object::Stream(s)) => Ok(Some(&s.dict)),
        Some(other) => {
            diag.warn(
                ExtractWarningCode::MalformedObject,
                format!(
                    "/{} is a {}, expected a dictionary",
                    String::from_utf8_lossy(key),
                    type_name(other)
                ),
            )?;
            Ok(None)
        }
    }
}

/// Classify a font dictionary and collect its encoding and width data.
pub fn analyze_font<'a, R: ObjectResolver + ?Sized>(
    resolver: &'a R,
    font: &'a Dictionary,
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) -> Result<FontDescriptor<'a>, BackendError> {
    let subtype = lookup_or_warn(resolver, font, b"Subtype", diag)?.and_then(name_of);
    let kind = match subtype.as_deref() {
        Some("Type0") => FontKind::Type0,
        _ => FontKind::Simple,
    };
    let base_font = lookup_or_warn(resolver, font, b"BaseFont", diag)?.and_then(name_of);

    let encoding = match lookup_or_warn(resolver, font, b"Encoding", diag) {
        Ok(None) if font.has(b"Encoding") => EncodingSpec::Invalid,
        Ok(None) => EncodingSpec::Absent,
        Ok(Some(Object::Name(name))) => {
            EncodingSpec::Name(String::from_utf8_lossy(name).into_owned())
        }
        Ok(Some(Object::Stream(stream))) => EncodingSpec::Stream(stream),
        Ok(Some(Object::Dictionary(dict))) => EncodingSpec::Dictionary(dict),
        Ok(Some(other)) => {
            diag.warn(
                ExtractWarningCode::MalformedObject,
                format!("/Encoding is a {}", type_name(other)),
            )?;
            EncodingSpec::Invalid
        }
        Err(e) => return Err(e),
    };

    let mut base_encoding = None;
    let mut differences = Vec::new();
    if let EncodingSpec::Dictionary(dict) = encoding {
        base_encoding = lookup_or_warn(resolver, dict, b"BaseEncoding", diag)?.and_then(name_of);
        match lookup_or_warn(resolver, dict, b"Differences", diag)? {
            Some(Object::Array(array)) => {
                differences = parse_differences(resolver, array, diag)?;
            }
            Some(other) => diag.warn(
                ExtractWarningCode::MalformedObject,
                format!("/Differences is a {}", type_name(other)),
            )?,
            None => {}
        }
    }

    let mut descriptor = FontDescriptor {
        kind,
        subtype,
        base_font,
        encoding,
        base_encoding,
        differences,
        to_unicode: font.get(b"ToUnicode").ok(),
        cid_system_info: None,
        font_file: None,
        metrics: GlyphMetrics::default(),
    };

    match kind {
        FontKind::Simple => read_simple_metrics(resolver, font, &mut descriptor, diag)?,
        FontKind::Type0 => read_descendant(resolver, font, &mut descriptor, options, diag)?,
    }
    Ok(descriptor)
}

fn read_simple_metrics<'a, R: ObjectResolver + ?Sized>(
    resolver: &'a R,
    font: &'a Dictionary,
    descriptor: &mut FontDescriptor<'a>,
    diag: &mut Diagnostics,
) -> Result<(), BackendError> {
    let metrics = &mut descriptor.metrics;
    metrics.first_char =
        lookup_or_warn(resolver, font, b"FirstChar", diag)?.and_then(object_to_u32);
    metrics.last_char = lookup_or_warn(resolver, font, b"LastChar", diag)?.and_then(object_to_u32);
    if let Some(Object::Array(widths)) = lookup_or_warn(resolver, font, b"Widths", diag)? {
        metrics.widths = parse_widths(resolver, widths, metrics.first_char.unwrap_or(0));
    }

    if let Some(fd) = lookup_dict(resolver, font, b"FontDescriptor", diag)? {
        metrics.missing_width =
            lookup_or_warn(resolver, fd, b"MissingWidth", diag)?.and_then(object_to_f64);
        if matches!(descriptor.subtype.as_deref(), Some("Type1" | "MMType1")) {
            descriptor.font_file = match lookup_or_warn(resolver, fd, b"FontFile", diag)? {
                Some(Object::Stream(stream)) => Some(stream),
                _ => None,
            };
        }
    }
    Ok(())
}

fn read_descendant<'a, R: ObjectResolver + ?Sized>(
    resolver: &'a R,
    font: &'a Dictionary,
    descriptor: &mut FontDescriptor<'a>,
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) -> Result<(), BackendError> {
    let first = match lookup_or_warn(resolver, font, b"DescendantFonts", diag)? {
        Some(Object::Array(array)) => array.first(),
        Some(obj @ Object::Dictionary(_)) => Some(obj),
        _ => None,
    };
    let Some(first) = first else {
        return diag.warn(
            ExtractWarningCode::MalformedObject,
            "Type0 font without /DescendantFonts",
        );
    };
    let cid_font = match resolver.resolve_dict(first) {
        Ok(dict) => dict,
        Err(e) => {
            return diag.warn(
                ExtractWarningCode::ReferenceResolution,
                format!("/DescendantFonts: {e}"),
            );
        }
    };

    if let Some(info) = lookup_dict(resolver, cid_font, b"CIDSystemInfo", diag)? {
        let text = |key: &[u8]| match resolver.lookup(info, key) {
            Ok(Some(Object::String(bytes, _))) => String::from_utf8_lossy(bytes).into_owned(),
            _ => String::new(),
        };
        descriptor.cid_system_info = Some(CidSystemInfo {
            registry: text(b"Registry"),
            ordering: text(b"Ordering"),
            supplement: match resolver.lookup(info, b"Supplement") {
                Ok(Some(Object::Integer(n))) => *n,
                _ => 0,
            },
        });
    }

    let metrics = &mut descriptor.metrics;
    metrics.declared_dw = lookup_or_warn(resolver, cid_font, b"DW", diag)?.and_then(object_to_f64);
    if let Some(Object::Array(w)) = lookup_or_warn(resolver, cid_font, b"W", diag)? {
        metrics.widths = parse_w_array(resolver, w, options.max_cmap_range);
    }
    Ok(())
}

/// Identity pass-through used when a composite font's encoding is unusable.
fn identity_cmap() -> CMap {
    CMap {
        codespaces: CodespaceTable::fixed(2),
        fallback: UnicodeFallback::RawCode,
        ..CMap::default()
    }
}

/// Code → CID mapping and codespace of a composite font.
fn composite_encoding<R: ObjectResolver + ?Sized>(
    resolver: &R,
    font: &FontDescriptor<'_>,
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) -> Result<CMap, BackendError> {
    match &font.encoding {
        EncodingSpec::Name(name) => match PredefinedCMap::lookup(name) {
            Some(predefined) => Ok(predefined.to_cmap()),
            None => {
                diag.unsupported_encoding(name, "Identity-H")?;
                Ok(identity_cmap())
            }
        },
        EncodingSpec::Stream(stream) => {
            let cmap = load_cmap_stream(resolver, stream, 0, options, diag)?;
            Ok(cmap.unwrap_or_else(identity_cmap))
        }
        EncodingSpec::Dictionary(_) => {
            diag.warn(
                ExtractWarningCode::MalformedObject,
                "Type0 /Encoding is a dictionary; using Identity-H",
            )?;
            Ok(identity_cmap())
        }
        EncodingSpec::Absent => {
            diag.warn(
                ExtractWarningCode::MalformedObject,
                "Type0 font without /Encoding; using Identity-H",
            )?;
            Ok(identity_cmap())
        }
        EncodingSpec::Invalid => Ok(identity_cmap()),
    }
}

/// Resolve and parse a `/ToUnicode` entry.
///
/// Unresolvable entries are reported and yield `None`. A name such as
/// `/Identity-H` in place of a stream is ignored.
fn load_to_unicode<R: ObjectResolver + ?Sized>(
    resolver: &R,
    obj: &Object,
    options: &ExtractOptions,
    diag: &mut Diagnostics,
) -> Result<Option<CMap>, BackendError> {
    match resolver.resolve(obj) {
        Ok(Object::Stream(stream)) => load_cmap_stream(resolver, stream, 0, options, diag),
        Ok(Object::Name(name)) if name.starts_with(b"Identity") => Ok(None),
        Ok(other) => {
            diag.warn(
                ExtractWarningCode::ReferenceResolution,
                format!("/ToUnicode is a {}, expected a stream", type_name(other)),
            )?;
            Ok(None)
        }
        Err(e) => {
            diag.warn(
                ExtractWarningCode::ReferenceResolution,
                format!("/ToUnicode: {e}"),
            )?;
            Ok(None)
        }
    }
}

/// Build the character map of a font dictionary.
///
/// `space_width_hint` is used as the space threshold (in text-space units)
/// when the font declares no usable widths. In non-strict mode malformed
/// input never fails the build: issues are returned as warnings alongside
/// a best-effort map. In strict mode the first issue is returned as
/// [`BackendError::Strict`].
pub fn build_character_map<R: ObjectResolver + ?Sized>(
    resolver: &R,
    font: &Dictionary,
    space_width_hint: f64,
    options: &ExtractOptions,
) -> Result<ExtractResult<CharacterMap>, BackendError> {
    build_with_reports(
        resolver,
        font,
        space_width_hint,
        options,
        ReportedEncodings::new(),
    )
}

/// [`build_character_map`] sharing unsupported-encoding reports with
/// other builds.
pub(crate) fn build_with_reports<R: ObjectResolver + ?Sized>(
    resolver: &R,
    font: &Dictionary,
    space_width_hint: f64,
    options: &ExtractOptions,
    reported: ReportedEncodings,
) -> Result<ExtractResult<CharacterMap>, BackendError> {
    let base_font = resolver
        .lookup(font, b"BaseFont")
        .ok()
        .flatten()
        .and_then(name_of);
    let mut diag = Diagnostics::new(options)
        .with_font_name(base_font.as_deref())
        .with_reported_encodings(reported);

    let descriptor = analyze_font(resolver, font, options, &mut diag)?;
    let mut map = CharacterMap::new(FontInfo {
        kind: descriptor.kind,
        subtype: descriptor.subtype.clone(),
        base_font: descriptor.base_font.clone(),
        ..FontInfo::default()
    });
    map.unit_scale = options.unit_scale;

    let mut simple_encoding: Option<FontEncoding> = None;
    match descriptor.kind {
        FontKind::Simple => {
            let encoding = resolve_encoding(resolver, &descriptor, &mut diag)?;
            map.code_to_unicode = encoding.to_unicode_map();
            map.codespaces = CodespaceTable::fixed(1);
            map.info.encoding_name = Some(encoding_name(&encoding));
            simple_encoding = Some(encoding);
        }
        FontKind::Type0 => {
            let cmap = composite_encoding(resolver, &descriptor, options, &mut diag)?;
            map.info.encoding_name = cmap.name.clone().or(match &descriptor.encoding {
                EncodingSpec::Name(name) => Some(name.clone()),
                _ => None,
            });
            map.info.writing_mode = cmap.writing_mode.unwrap_or_default();
            map.code_to_unicode = cmap.unicode;
            map.code_to_cid = cmap.cids;
            map.codespaces = cmap.codespaces;
            map.fallback = cmap.fallback;
        }
    }

    if let Some(obj) = descriptor.to_unicode {
        if let Some(to_unicode) = load_to_unicode(resolver, obj, options, &mut diag)? {
            map.info.has_to_unicode = true;
            map.code_to_unicode.extend(to_unicode.unicode);
            if map.codespaces.is_empty() {
                map.codespaces = to_unicode.codespaces;
            }
        }
    }
    if map.codespaces.is_empty() {
        map.codespaces = CodespaceTable::fixed(2);
    }

    map.widths = descriptor.metrics.widths.clone();
    map.default_width = descriptor.metrics.default_width(descriptor.kind);
    normalize_map_values(&mut map.code_to_unicode, options.unicode_norm);

    let code = space_code(&map, simple_encoding.as_ref());
    let width = compute_space_width(&map, &descriptor.metrics, code, space_width_hint);
    map.set_space_width(width);

    Ok(ExtractResult::with_warnings(map, diag.into_warnings()))
}
