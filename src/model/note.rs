// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A note attached to one verse key. The same text may be attached to several keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    text: String,
    date: DateTime<Utc>,
}

impl Note {
    pub fn new(text: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            date,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Whitespace-only notes are never stored.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::Note;

    #[test]
    fn round_trips_iso_date_from_device_storage() {
        let raw = r#"{"text":"grace","date":"2024-03-01T08:30:00.000Z"}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.text(), "grace");
        assert_eq!(note.date(), Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap());
    }

    #[test]
    fn blank_detection_ignores_whitespace() {
        let date = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert!(Note::new(" \n\t", date).is_blank());
        assert!(!Note::new(" a ", date).is_blank());
    }
}
