//! Registry of predefined (named) CMaps.
//!
//! Composite fonts name their encoding instead of embedding it. The names
//! recognized here are the identity CMaps, the Unicode-keyed `Uni*-UCS2-*`
//! and `Uni*-UTF16-*` families, and the legacy CJK charsets that
//! `encoding_rs` can decode.

use charmap_core::{CodespaceRange, CodespaceTable, LegacyCharset, UnicodeFallback, WritingMode};

use crate::cmap::CMap;

/// How codes of a predefined CMap become text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedKind {
    /// `Identity-H` / `Identity-V`: 2-byte code = CID.
    Identity,
    /// `Uni*-UCS2-*`: 2-byte UCS-2 codes.
    Ucs2,
    /// `Uni*-UTF16-*`: 2- or 4-byte UTF-16BE codes.
    Utf16,
    /// A legacy multi-byte charset.
    Legacy(LegacyCharset),
}

/// A recognized predefined CMap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredefinedCMap {
    /// The name as given (without a leading `/`).
    pub name: String,
    /// Decoding family.
    pub kind: PredefinedKind,
    /// `-V` names are vertical.
    pub writing_mode: WritingMode,
}

impl PredefinedCMap {
    /// Recognize a CMap name. Returns `None` for names not implemented.
    pub fn lookup(name: &str) -> Option<Self> {
        let name = name.strip_prefix('/').unwrap_or(name);
        let (stem, writing_mode) = if let Some(stem) = name.strip_suffix("-V") {
            (stem, WritingMode::Vertical)
        } else if let Some(stem) = name.strip_suffix("-H") {
            (stem, WritingMode::Horizontal)
        } else {
            // A few legacy names omit the -H suffix (e.g. "ETen-B5").
            (name, WritingMode::Horizontal)
        };

        let kind = if stem == "Identity" {
            PredefinedKind::Identity
        } else if unicode_family(stem, "UCS2") {
            PredefinedKind::Ucs2
        } else if unicode_family(stem, "UTF16") {
            PredefinedKind::Utf16
        } else {
            PredefinedKind::Legacy(legacy_charset(stem)?)
        };

        Some(Self {
            name: name.to_string(),
            kind,
            writing_mode,
        })
    }

    /// Codespace ranges implied by the name.
    pub fn codespaces(&self) -> CodespaceTable {
        match self.kind {
            PredefinedKind::Identity | PredefinedKind::Ucs2 => CodespaceTable::fixed(2),
            PredefinedKind::Utf16 => {
                let mut table = CodespaceTable::new();
                let ranges = [
                    CodespaceRange::new(&[0x00, 0x00], &[0xD7, 0xFF]),
                    CodespaceRange::new(&[0xE0, 0x00], &[0xFF, 0xFF]),
                    CodespaceRange::new(&[0xD8, 0x00, 0xDC, 0x00], &[0xDB, 0xFF, 0xDF, 0xFF]),
                ];
                for range in ranges.into_iter().flatten() {
                    table.insert(range);
                }
                table
            }
            PredefinedKind::Legacy(charset) => charset.codespace(),
        }
    }

    /// Rendering of codes that no ToUnicode entry covers.
    pub fn fallback(&self) -> UnicodeFallback {
        match self.kind {
            PredefinedKind::Identity => UnicodeFallback::RawCode,
            PredefinedKind::Ucs2 | PredefinedKind::Utf16 => UnicodeFallback::Utf16Be,
            PredefinedKind::Legacy(charset) => UnicodeFallback::Legacy(charset),
        }
    }

    /// The CMap as a base for overlays. Code → CID stays implicit (identity).
    pub fn to_cmap(&self) -> CMap {
        CMap {
            name: Some(self.name.clone()),
            writing_mode: Some(self.writing_mode),
            codespaces: self.codespaces(),
            fallback: self.fallback(),
            ..CMap::default()
        }
    }
}

/// `Uni<Registry>-<form>[-<variant>]`, e.g. `UniJIS-UCS2-HW`.
fn unicode_family(stem: &str, form: &str) -> bool {
    stem.starts_with("Uni") && stem.split('-').skip(1).any(|segment| segment == form)
}

fn legacy_charset(stem: &str) -> Option<LegacyCharset> {
    let charset = match stem {
        "GBK-EUC" | "GB-EUC" | "GBpc-EUC" | "GBKp-EUC" | "GBK2K" => LegacyCharset::Gbk,
        "B5pc" | "ETen-B5" | "ETenms-B5" | "HKscs-B5" | "B5" => LegacyCharset::Big5,
        "EUC" | "78-EUC" => LegacyCharset::EucJp,
        "KSC-EUC" | "KSCms-UHC" | "KSCpc-EUC" | "KSCms-UHC-HW" => LegacyCharset::EucKr,
        _ if stem.ends_with("RKSJ") => LegacyCharset::ShiftJis,
        _ => return None,
    };
    Some(charset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_names() {
        let h = PredefinedCMap::lookup("Identity-H").unwrap();
        assert_eq!(h.kind, PredefinedKind::Identity);
        assert_eq!(h.writing_mode, WritingMode::Horizontal);
        assert_eq!(h.codespaces(), CodespaceTable::fixed(2));
        assert_eq!(h.fallback(), UnicodeFallback::RawCode);

        let v = PredefinedCMap::lookup("/Identity-V").unwrap();
        assert_eq!(v.writing_mode, WritingMode::Vertical);
        assert_eq!(v.name, "Identity-V");
    }

    #[test]
    fn unicode_families() {
        let ucs2 = PredefinedCMap::lookup("UniJIS-UCS2-H").unwrap();
        assert_eq!(ucs2.kind, PredefinedKind::Ucs2);
        assert_eq!(ucs2.fallback(), UnicodeFallback::Utf16Be);

        let utf16 = PredefinedCMap::lookup("UniGB-UTF16-V").unwrap();
        assert_eq!(utf16.kind, PredefinedKind::Utf16);
        assert_eq!(utf16.writing_mode, WritingMode::Vertical);
    }

    #[test]
    fn unicode_half_width_variants() {
        let h = PredefinedCMap::lookup("UniJIS-UCS2-HW-H").unwrap();
        assert_eq!(h.kind, PredefinedKind::Ucs2);
        assert_eq!(h.writing_mode, WritingMode::Horizontal);

        let v = PredefinedCMap::lookup("UniJIS-UCS2-HW-V").unwrap();
        assert_eq!(v.kind, PredefinedKind::Ucs2);
        assert_eq!(v.writing_mode, WritingMode::Vertical);

        let jis2004 = PredefinedCMap::lookup("UniJIS2004-UTF16-H").unwrap();
        assert_eq!(jis2004.kind, PredefinedKind::Utf16);

        // The form must be a whole segment
        assert!(PredefinedCMap::lookup("UniJIS-UCS2X-H").is_none());
        assert!(PredefinedCMap::lookup("UniJIS-UTF8-H").is_none());
    }

    #[test]
    fn utf16_codespace_segments_surrogate_pairs() {
        let cmap = PredefinedCMap::lookup("UniCNS-UTF16-H").unwrap();
        let table = cmap.codespaces();
        assert_eq!(table.code_length(&[0xD8, 0x3D, 0xDE, 0x00]), 4);
        assert_eq!(table.code_length(&[0x4E, 0x2D, 0xD8, 0x3D]), 2);
        assert_eq!(table.max_code_length(), 4);
    }

    #[test]
    fn legacy_cjk_names() {
        let cases = [
            ("GBK-EUC-H", LegacyCharset::Gbk),
            ("GBpc-EUC-V", LegacyCharset::Gbk),
            ("ETen-B5-H", LegacyCharset::Big5),
            ("HKscs-B5-V", LegacyCharset::Big5),
            ("90ms-RKSJ-H", LegacyCharset::ShiftJis),
            ("83pv-RKSJ-H", LegacyCharset::ShiftJis),
            ("EUC-H", LegacyCharset::EucJp),
            ("KSCms-UHC-H", LegacyCharset::EucKr),
        ];
        for (name, charset) in cases {
            let cmap = PredefinedCMap::lookup(name).unwrap_or_else(|| panic!("{name}"));
            assert_eq!(cmap.kind, PredefinedKind::Legacy(charset), "{name}");
            assert_eq!(cmap.fallback(), UnicodeFallback::Legacy(charset));
        }
    }

    #[test]
    fn unknown_names() {
        assert!(PredefinedCMap::lookup("WinAnsEncoding").is_none());
        assert!(PredefinedCMap::lookup("Adobe-Japan1-6").is_none());
        assert!(PredefinedCMap::lookup("").is_none());
    }

    #[test]
    fn to_cmap_carries_metadata() {
        let cmap = PredefinedCMap::lookup("UniKS-UCS2-V").unwrap().to_cmap();
        assert_eq!(cmap.name.as_deref(), Some("UniKS-UCS2-V"));
        assert_eq!(cmap.writing_mode, Some(WritingMode::Vertical));
        assert_eq!(cmap.fallback, UnicodeFallback::Utf16Be);
        assert!(cmap.is_empty());
    }
}
