// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

const KEY_SEPARATOR: char = '-';

/// Stable identifier for a single verse: `"{book_id}-{chapter}-{verse}"`.
///
/// All components are unsigned integers, so the separator never appears inside a component and
/// distinct triples never produce the same key. Ordering is by book, then chapter, then verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VerseKey {
    book_id: u32,
    chapter: u32,
    verse: u32,
}

impl VerseKey {
    pub fn new(book_id: u32, chapter: u32, verse: u32) -> Self {
        Self {
            book_id,
            chapter,
            verse,
        }
    }

    pub fn book_id(&self) -> u32 {
        self.book_id
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    pub fn verse(&self) -> u32 {
        self.verse
    }

    /// Returns `true` when this key addresses a verse of the given chapter.
    pub fn in_chapter(&self, book_id: u32, chapter: u32) -> bool {
        self.book_id == book_id && self.chapter == chapter
    }
}

/// Builds the persisted key string for a verse.
pub fn make_key(book_id: u32, chapter: u32, verse: u32) -> String {
    VerseKey::new(book_id, chapter, verse).to_string()
}

impl fmt::Display for VerseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.book_id, self.chapter, self.verse
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseVerseKeyError {
    #[error("verse key must have three components, got {0:?}")]
    Shape(String),
    #[error("verse key component {component:?} in {key:?} is not an unsigned integer")]
    Component { key: String, component: String },
}

impl FromStr for VerseKey {
    type Err = ParseVerseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(KEY_SEPARATOR);
        let (Some(book), Some(chapter), Some(verse), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseVerseKeyError::Shape(s.to_owned()));
        };

        let parse = |component: &str| {
            component
                .parse::<u32>()
                .map_err(|_| ParseVerseKeyError::Component {
                    key: s.to_owned(),
                    component: component.to_owned(),
                })
        };

        Ok(Self::new(parse(book)?, parse(chapter)?, parse(verse)?))
    }
}

impl Serialize for VerseKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VerseKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Device-storage slots. Each slot holds one JSON document rewritten in full on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StorageKey {
    Settings,
    Highlights,
    Notes,
    ChatHistory,
}

impl StorageKey {
    pub const ALL: [StorageKey; 4] = [
        StorageKey::Settings,
        StorageKey::Highlights,
        StorageKey::Notes,
        StorageKey::ChatHistory,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Settings => "bibleSettings",
            Self::Highlights => "bibleHighlights",
            Self::Notes => "bibleNotes",
            Self::ChatHistory => "chatHistory",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
