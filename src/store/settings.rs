// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::{debug, info};

use super::writer::Persistence;
use crate::model::{ReaderSettings, SettingsStep, StorageKey};

/// Reader preferences and last position, persisted under `bibleSettings`.
#[derive(Debug)]
pub struct SettingsStore {
    persistence: Persistence,
    settings: ReaderSettings,
}

impl SettingsStore {
    pub fn load(persistence: Persistence) -> Self {
        let settings = persistence
            .load_or_log::<ReaderSettings>(StorageKey::Settings)
            .map(ReaderSettings::sanitized)
            .unwrap_or_default();
        info!(translation = %settings.selected_translation, "loaded reader settings");
        Self {
            persistence,
            settings,
        }
    }

    pub fn get(&self) -> &ReaderSettings {
        &self.settings
    }

    /// Applies `f` and writes through if the settings changed.
    pub fn update(&mut self, f: impl FnOnce(&mut ReaderSettings)) -> bool {
        let before = self.settings.clone();
        f(&mut self.settings);
        self.settings = std::mem::take(&mut self.settings).sanitized();
        let changed = self.settings != before;
        if changed {
            debug!("reader settings changed");
            self.persist();
        }
        changed
    }

    pub fn apply_step(&mut self, step: SettingsStep) -> bool {
        self.update(|settings| {
            settings.apply_step(step);
        })
    }

    pub fn set_position(&mut self, translation: &str, book_id: u32, chapter: u32) -> bool {
        self.update(|settings| {
            translation.clone_into(&mut settings.selected_translation);
            settings.selected_book_id = Some(book_id);
            settings.selected_chapter = chapter;
        })
    }

    fn persist(&self) {
        self.persistence.write_json(StorageKey::Settings, &self.settings);
    }
}
