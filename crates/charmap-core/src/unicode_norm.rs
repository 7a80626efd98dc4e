//! Unicode normalization for decoded text.
//!
//! Provides [`UnicodeNorm`] for selecting a normalization form and
//! [`normalize_map_values`] for applying it to every target string of a
//! code-to-Unicode table.

use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

/// Unicode normalization form to apply to decoded text.
///
/// ToUnicode programs written by different producers disagree on composed
/// vs. decomposed forms (e.g. `Ü` vs. `U` + U+0308). Normalizing makes the
/// output consistent regardless of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnicodeNorm {
    /// No normalization (default).
    #[default]
    None,
    /// Canonical Decomposition, followed by Canonical Composition (NFC).
    Nfc,
    /// Canonical Decomposition (NFD).
    Nfd,
    /// Compatibility Decomposition, followed by Canonical Composition (NFKC).
    Nfkc,
    /// Compatibility Decomposition (NFKD).
    Nfkd,
}

impl UnicodeNorm {
    /// Apply this normalization form to the given string.
    ///
    /// Returns the input unchanged if normalization is `None`.
    pub fn normalize(&self, text: &str) -> String {
        match self {
            UnicodeNorm::None => text.to_string(),
            UnicodeNorm::Nfc => text.nfc().collect(),
            UnicodeNorm::Nfd => text.nfd().collect(),
            UnicodeNorm::Nfkc => text.nfkc().collect(),
            UnicodeNorm::Nfkd => text.nfkd().collect(),
        }
    }
}

/// Normalize every value of a code-to-Unicode table in place.
///
/// A no-op when `norm` is [`UnicodeNorm::None`].
pub fn normalize_map_values(map: &mut HashMap<u32, String>, norm: UnicodeNorm) {
    if norm == UnicodeNorm::None {
        return;
    }
    for value in map.values_mut() {
        *value = norm.normalize(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_none() {
        assert_eq!(UnicodeNorm::default(), UnicodeNorm::None);
    }

    #[test]
    fn none_returns_unchanged() {
        let input = "U\u{0308}";
        assert_eq!(UnicodeNorm::None.normalize(input), input);
    }

    #[test]
    fn nfc_composes_diaeresis() {
        assert_eq!(UnicodeNorm::Nfc.normalize("U\u{0308}"), "\u{00DC}");
    }

    #[test]
    fn nfd_decomposes() {
        assert_eq!(UnicodeNorm::Nfd.normalize("\u{00DC}"), "U\u{0308}");
    }

    #[test]
    fn nfkc_folds_ligature() {
        assert_eq!(UnicodeNorm::Nfkc.normalize("\u{FB01}"), "fi");
    }

    #[test]
    fn nfkd_folds_and_decomposes() {
        let decomposed = UnicodeNorm::Nfkd.normalize("\u{FB01}\u{00E9}");
        assert_eq!(decomposed, "fie\u{0301}");
    }

    #[test]
    fn normalize_map_values_rewrites_each_entry() {
        let mut map = HashMap::new();
        map.insert(1, "e\u{0301}".to_string());
        map.insert(2, "plain".to_string());
        normalize_map_values(&mut map, UnicodeNorm::Nfc);
        assert_eq!(map[&1], "\u{00E9}");
        assert_eq!(map[&2], "plain");
    }

    #[test]
    fn normalize_map_values_none_is_noop() {
        let mut map = HashMap::new();
        map.insert(1, "e\u{0301}".to_string());
        normalize_map_values(&mut map, UnicodeNorm::None);
        assert_eq!(map[&1], "e\u{0301}");
    }
}
