// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::writer::Persistence;
use crate::model::{ChatMessage, ChatRecord, StorageKey};

/// Saved expound conversations, newest first, persisted under `chatHistory`.
#[derive(Debug)]
pub struct ChatHistoryStore {
    persistence: Persistence,
    records: Vec<ChatRecord>,
}

impl ChatHistoryStore {
    pub fn load(persistence: Persistence) -> Self {
        let raw = persistence
            .load_or_log::<Vec<serde_json::Value>>(StorageKey::ChatHistory)
            .unwrap_or_default();

        let mut records = Vec::with_capacity(raw.len());
        for (index, raw_record) in raw.into_iter().enumerate() {
            match serde_json::from_value::<ChatRecord>(raw_record) {
                Ok(record) => records.push(record),
                Err(err) => warn!(index, error = %err, "skipping stored chat"),
            }
        }
        info!(count = records.len(), "loaded chat history");
        Self {
            persistence,
            records,
        }
    }

    pub fn list(&self) -> &[ChatRecord] {
        &self.records
    }

    pub fn get(&self, id: i64) -> Option<&ChatRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn save_new(&mut self, conversation: Vec<ChatMessage>, verse_ref: &str) -> i64 {
        self.save_new_at(conversation, verse_ref, Utc::now())
    }

    /// Prepends a new record and returns its id (creation time in epoch milliseconds, bumped
    /// past any existing id so ids stay unique).
    pub fn save_new_at(
        &mut self,
        conversation: Vec<ChatMessage>,
        verse_ref: &str,
        now: DateTime<Utc>,
    ) -> i64 {
        let mut id = now.timestamp_millis();
        if let Some(max) = self.records.iter().map(|record| record.id).max() {
            if id <= max {
                id = max + 1;
            }
        }

        self.records.insert(
            0,
            ChatRecord {
                id,
                verse_ref: verse_ref.to_owned(),
                conversation,
                timestamp: now,
            },
        );
        debug!(id, verse_ref, "chat saved");
        self.persist();
        id
    }

    pub fn update_conversation(&mut self, id: i64, conversation: Vec<ChatMessage>) -> bool {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            return false;
        };
        record.conversation = conversation;
        debug!(id, "chat updated");
        self.persist();
        true
    }

    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id != id);
        if self.records.len() == before {
            return false;
        }
        debug!(id, "chat deleted");
        self.persist();
        true
    }

    fn persist(&self) {
        self.persistence.write_json(StorageKey::ChatHistory, &self.records);
    }
}
