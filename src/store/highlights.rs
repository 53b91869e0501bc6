// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use super::writer::Persistence;
use crate::model::{HighlightColor, StorageKey, VerseKey};

/// Verse highlights, persisted under `bibleHighlights` as `{ "<verse key>": "<color>" }`.
///
/// Mutations update memory first and then enqueue the full mapping. A failed write is logged and
/// the in-memory state is kept.
#[derive(Debug)]
pub struct HighlightStore {
    persistence: Persistence,
    entries: BTreeMap<VerseKey, HighlightColor>,
}

impl HighlightStore {
    pub fn load(persistence: Persistence) -> Self {
        let raw = persistence
            .load_or_log::<BTreeMap<String, serde_json::Value>>(StorageKey::Highlights)
            .unwrap_or_default();

        let mut entries = BTreeMap::new();
        for (raw_key, raw_color) in raw {
            let key = match raw_key.parse::<VerseKey>() {
                Ok(key) => key,
                Err(err) => {
                    warn!(key = %raw_key, error = %err, "skipping stored highlight");
                    continue;
                }
            };
            match serde_json::from_value::<HighlightColor>(raw_color) {
                Ok(color) => {
                    entries.insert(key, color);
                }
                Err(err) => warn!(%key, error = %err, "skipping stored highlight"),
            }
        }

        info!(count = entries.len(), "loaded highlights");
        Self {
            persistence,
            entries,
        }
    }

    pub fn get(&self, key: &VerseKey) -> Option<HighlightColor> {
        self.entries.get(key).copied()
    }

    pub fn entries(&self) -> &BTreeMap<VerseKey, HighlightColor> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highlights of one chapter, in verse order.
    pub fn in_chapter(
        &self,
        book_id: u32,
        chapter: u32,
    ) -> impl Iterator<Item = (&VerseKey, HighlightColor)> + '_ {
        self.entries
            .range(VerseKey::new(book_id, chapter, 0)..=VerseKey::new(book_id, chapter, u32::MAX))
            .map(|(key, color)| (key, *color))
    }

    pub fn set(&mut self, key: VerseKey, color: HighlightColor) {
        self.entries.insert(key, color);
        debug!(%key, %color, "highlight set");
        self.persist();
    }

    /// Merges `mapping` into the store with a single write.
    pub fn set_batch(&mut self, mapping: impl IntoIterator<Item = (VerseKey, HighlightColor)>) {
        let mut changed = 0_usize;
        for (key, color) in mapping {
            if self.entries.insert(key, color) != Some(color) {
                changed += 1;
            }
        }
        debug!(changed, "highlight batch set");
        if changed > 0 {
            self.persist();
        }
    }

    /// Applies one color to every key with a single write.
    pub fn apply_color(&mut self, keys: &[VerseKey], color: HighlightColor) {
        self.set_batch(keys.iter().map(|key| (*key, color)));
    }

    /// Removes every listed key that has a highlight, with a single write.
    pub fn remove_batch(&mut self, keys: &[VerseKey]) {
        let mut removed = 0_usize;
        for key in keys {
            if self.entries.remove(key).is_some() {
                removed += 1;
            }
        }
        debug!(removed, "highlight batch removed");
        if removed > 0 {
            self.persist();
        }
    }

    fn persist(&self) {
        self.persistence.write_json(StorageKey::Highlights, &self.entries);
    }
}
