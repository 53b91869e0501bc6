// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::writer::Persistence;
use crate::model::{Note, StorageKey, VerseKey};

/// Verse notes, persisted under `bibleNotes` as `{ "<verse key>": { "text", "date" } }`.
///
/// A note saved for a multi-verse selection is copied to every key. Blank text never gets
/// stored: writing it deletes the key instead.
#[derive(Debug)]
pub struct NoteStore {
    persistence: Persistence,
    entries: BTreeMap<VerseKey, Note>,
}

impl NoteStore {
    pub fn load(persistence: Persistence) -> Self {
        let raw = persistence
            .load_or_log::<BTreeMap<String, serde_json::Value>>(StorageKey::Notes)
            .unwrap_or_default();

        let mut entries = BTreeMap::new();
        for (raw_key, raw_note) in raw {
            let key = match raw_key.parse::<VerseKey>() {
                Ok(key) => key,
                Err(err) => {
                    warn!(key = %raw_key, error = %err, "skipping stored note");
                    continue;
                }
            };
            match serde_json::from_value::<Note>(raw_note) {
                Ok(note) if note.is_blank() => {}
                Ok(note) => {
                    entries.insert(key, note);
                }
                Err(err) => warn!(%key, error = %err, "skipping stored note"),
            }
        }

        info!(count = entries.len(), "loaded notes");
        Self {
            persistence,
            entries,
        }
    }

    pub fn get(&self, key: &VerseKey) -> Option<&Note> {
        self.entries.get(key)
    }

    pub fn has_note(&self, key: &VerseKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn entries(&self) -> &BTreeMap<VerseKey, Note> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes `text` to every key, or deletes the keys when `text` is blank. One write.
    pub fn set_notes(&mut self, keys: &[VerseKey], text: &str) {
        self.set_notes_at(keys, text, Utc::now());
    }

    pub fn set_notes_at(&mut self, keys: &[VerseKey], text: &str, now: DateTime<Utc>) {
        let text = text.trim();
        if text.is_empty() {
            for key in keys {
                self.entries.remove(key);
            }
            debug!(keys = keys.len(), "notes cleared");
        } else {
            for key in keys {
                self.entries.insert(*key, Note::new(text, now));
            }
            debug!(keys = keys.len(), "notes set");
        }
        self.persist();
    }

    /// Notes attached to any of `keys`, in key order, de-duplicated by exact text.
    pub fn notes_for_keys(&self, keys: &[VerseKey]) -> Vec<&Note> {
        let mut seen = HashSet::new();
        keys.iter()
            .filter_map(|key| self.entries.get(key))
            .filter(|note| seen.insert(note.text()))
            .collect()
    }

    /// The subset of `keys` whose note text is exactly `text`.
    pub fn keys_with_text(&self, keys: &[VerseKey], text: &str) -> Vec<VerseKey> {
        keys.iter()
            .filter(|key| self.entries.get(key).is_some_and(|note| note.text() == text))
            .copied()
            .collect()
    }

    /// Detaches the note with `text` from exactly those `keys` that carry it. Other notes in the
    /// same selection stay. Returns the number of keys cleared.
    pub fn detach(&mut self, keys: &[VerseKey], text: &str) -> usize {
        let targets = self.keys_with_text(keys, text);
        if !targets.is_empty() {
            self.set_notes(&targets, "");
        }
        targets.len()
    }

    fn persist(&self) {
        self.persistence.write_json(StorageKey::Notes, &self.entries);
    }
}
