//! Legacy CJK multi-byte charsets used by predefined CMaps.
//!
//! Fonts that name a CMap like `GBK-EUC-H` or `90ms-RKSJ-H` emit codes in a
//! national charset rather than CIDs we can map without the Adobe CMap
//! resources. Those codes are decoded to Unicode with `encoding_rs`.

use encoding_rs::Encoding;

use crate::codespace::{CodespaceRange, CodespaceTable};

/// A legacy CJK charset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegacyCharset {
    /// Simplified Chinese GBK (superset of GB 2312 EUC).
    Gbk,
    /// Traditional Chinese Big5 (incl. HKSCS extensions).
    Big5,
    /// Japanese Shift-JIS.
    ShiftJis,
    /// Japanese EUC-JP.
    EucJp,
    /// Korean EUC-KR / Unified Hangul Code.
    EucKr,
}

impl LegacyCharset {
    /// The `encoding_rs` decoder for this charset.
    pub fn encoding(&self) -> &'static Encoding {
        match self {
            LegacyCharset::Gbk => encoding_rs::GBK,
            LegacyCharset::Big5 => encoding_rs::BIG5,
            LegacyCharset::ShiftJis => encoding_rs::SHIFT_JIS,
            LegacyCharset::EucJp => encoding_rs::EUC_JP,
            LegacyCharset::EucKr => encoding_rs::EUC_KR,
        }
    }

    /// 1-/2-byte codespace derived from the charset's lead-byte ranges.
    pub fn codespace(&self) -> CodespaceTable {
        let (single, double): (&[(u8, u8)], &[([u8; 2], [u8; 2])]) = match self {
            LegacyCharset::Gbk | LegacyCharset::Big5 => {
                (&[(0x00, 0x80)], &[([0x81, 0x40], [0xFE, 0xFE])])
            }
            LegacyCharset::ShiftJis => (
                &[(0x00, 0x80), (0xA0, 0xDF)],
                &[([0x81, 0x40], [0x9F, 0xFC]), ([0xE0, 0x40], [0xFC, 0xFC])],
            ),
            LegacyCharset::EucJp => (
                &[(0x00, 0x80)],
                &[([0x8E, 0xA1], [0x8E, 0xDF]), ([0xA1, 0xA1], [0xFE, 0xFE])],
            ),
            LegacyCharset::EucKr => (&[(0x00, 0x80)], &[([0x81, 0x41], [0xFE, 0xFE])]),
        };
        let mut table = CodespaceTable::new();
        let singles = single
            .iter()
            .filter_map(|&(low, high)| CodespaceRange::new(&[low], &[high]));
        let doubles = double
            .iter()
            .filter_map(|(low, high)| CodespaceRange::new(low, high));
        for range in singles.chain(doubles) {
            table.insert(range);
        }
        table
    }

    /// Decode one code's bytes to Unicode. Malformed sequences yield U+FFFD.
    pub fn decode(&self, bytes: &[u8]) -> String {
        let (decoded, _) = self.encoding().decode_without_bom_handling(bytes);
        decoded.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gbk_decodes_two_byte_code() {
        // 中 = 0xD6D0 in GBK
        assert_eq!(LegacyCharset::Gbk.decode(&[0xD6, 0xD0]), "\u{4E2D}");
        assert_eq!(LegacyCharset::Gbk.decode(b"A"), "A");
    }

    #[test]
    fn gbk_invalid_code_yields_replacement() {
        // 0xFF is never a GBK lead byte
        assert_eq!(LegacyCharset::Gbk.decode(&[0xFF, 0xFF]), "\u{FFFD}\u{FFFD}");
        // Lead byte without its trail byte
        assert_eq!(LegacyCharset::Gbk.decode(&[0x81]), "\u{FFFD}");
    }

    #[test]
    fn big5_decodes_two_byte_code() {
        // 中 = 0xA4A4 in Big5
        assert_eq!(LegacyCharset::Big5.decode(&[0xA4, 0xA4]), "\u{4E2D}");
    }

    #[test]
    fn shift_jis_decodes_hiragana() {
        // あ = 0x82A0 in Shift-JIS
        assert_eq!(LegacyCharset::ShiftJis.decode(&[0x82, 0xA0]), "\u{3042}");
    }

    #[test]
    fn euc_jp_decodes_hiragana() {
        // あ = 0xA4A2 in EUC-JP
        assert_eq!(LegacyCharset::EucJp.decode(&[0xA4, 0xA2]), "\u{3042}");
    }

    #[test]
    fn euc_kr_decodes_hangul() {
        // 가 = 0xB0A1 in EUC-KR
        assert_eq!(LegacyCharset::EucKr.decode(&[0xB0, 0xA1]), "\u{AC00}");
    }

    #[test]
    fn shift_jis_codespace_segments_mixed_input() {
        let table = LegacyCharset::ShiftJis.codespace();
        let input = [0x41, 0x82, 0xA0, 0xB1];
        let codes: Vec<&[u8]> = table.segment(&input).collect();
        assert_eq!(codes, vec![&[0x41u8][..], &[0x82, 0xA0][..], &[0xB1][..]]);
    }

    #[test]
    fn gbk_codespace_lengths() {
        let table = LegacyCharset::Gbk.codespace();
        assert_eq!(table.code_length(&[0x41, 0xD6]), 1);
        assert_eq!(table.code_length(&[0xD6, 0xD0]), 2);
        assert_eq!(table.max_code_length(), 2);
    }
}
