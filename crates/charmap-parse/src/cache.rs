//! Per-document cache of built character maps.
//!
//! Maps are keyed by the identity of the font dictionary and built at most
//! once per key, even under concurrent access. Published maps are immutable
//! and shared through [`Arc`]. An unsupported encoding name is reported by
//! the first build that meets it, not by every font using it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use charmap_core::{CharacterMap, ExtractOptions, ExtractResult};
use lopdf::{Dictionary, ObjectId};
use once_cell::sync::OnceCell;

use crate::diagnostics::ReportedEncodings;
use crate::error::BackendError;
use crate::font::build_with_reports;
use crate::resolver::ObjectResolver;

/// Identity of a font dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FontKey {
    /// An indirect font dictionary.
    Object(ObjectId),
    /// A direct dictionary inside a resource dictionary, keyed by the owning
    /// object and the resource name (e.g. `F1`).
    Inline {
        /// Object holding the resource dictionary (usually the page).
        owner: ObjectId,
        /// Resource name.
        name: String,
    },
}

type Slot = Arc<OnceCell<Arc<CharacterMap>>>;

/// Compute-once cache of [`CharacterMap`]s.
///
/// The lock guards only the key → slot map; builds run outside it, so
/// different fonts build in parallel while callers of the same key wait for
/// the first build. Failed builds are not cached.
#[derive(Debug, Default)]
pub struct CharMapCache {
    entries: RwLock<HashMap<FontKey, Slot>>,
    reported_encodings: ReportedEncodings,
}

impl CharMapCache {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, key: &FontKey) -> Slot {
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = entries.get(key) {
                return Arc::clone(slot);
            }
        }
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(key.clone()).or_default())
    }

    /// The published map for `key`, if one has been built.
    pub fn get(&self, key: &FontKey) -> Option<Arc<CharacterMap>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(key).and_then(|slot| slot.get().cloned())
    }

    /// Return the map for `key`, running `build` if none is published yet.
    ///
    /// Warnings are returned only to the caller whose `build` ran; later
    /// callers receive the published map with no warnings.
    pub fn get_or_build<F>(
        &self,
        key: &FontKey,
        build: F,
    ) -> Result<ExtractResult<Arc<CharacterMap>>, BackendError>
    where
        F: FnOnce() -> Result<ExtractResult<CharacterMap>, BackendError>,
    {
        let slot = self.slot(key);
        if let Some(map) = slot.get() {
            #[cfg(feature = "tracing")]
            tracing::debug!(?key, "character map cache hit");
            return Ok(ExtractResult::ok(Arc::clone(map)));
        }

        let mut warnings = Vec::new();
        let map = slot.get_or_try_init(|| {
            let built = build()?;
            #[cfg(feature = "tracing")]
            tracing::debug!(?key, warnings = built.warnings.len(), "built character map");
            warnings = built.warnings;
            Ok::<_, BackendError>(Arc::new(built.value))
        })?;
        Ok(ExtractResult::with_warnings(Arc::clone(map), warnings))
    }

    /// Return the map of `font`, building it with
    /// [`build_character_map`](crate::build_character_map) on first use.
    ///
    /// An unsupported encoding is warned about once per cache, so a
    /// misspelled `/Encoding` shared by many fonts yields one warning.
    pub fn get_or_build_font<R: ObjectResolver + ?Sized>(
        &self,
        resolver: &R,
        key: &FontKey,
        font: &Dictionary,
        space_width_hint: f64,
        options: &ExtractOptions,
    ) -> Result<ExtractResult<Arc<CharacterMap>>, BackendError> {
        self.get_or_build(key, || {
            build_with_reports(
                resolver,
                font,
                space_width_hint,
                options,
                self.reported_encodings.clone(),
            )
        })
    }

    /// Drop the entry for `key`, e.g. after its font dictionary was replaced.
    ///
    /// Returns true if an entry existed. Maps already handed out stay valid.
    pub fn invalidate(&self, key: &FontKey) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        entries.clear();
    }

    /// Number of published maps.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.values().filter(|slot| slot.get().is_some()).count()
    }

    /// Returns true if no map is published.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
