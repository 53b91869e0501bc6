// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Scripture content: the translation list, the book catalogue and the source port.
//!
//! Transport is left to implementors of [`ScriptureSource`]. This module only knows the endpoint
//! shapes and how to decode their payloads.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::VerseRef;

pub const CONTENT_BASE_URL: &str = "https://bolls.life";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    pub short_name: &'static str,
    pub full_name: &'static str,
}

pub const ALLOWED_TRANSLATIONS: [Translation; 7] = [
    Translation {
        short_name: "ESV",
        full_name: "English Standard Version",
    },
    Translation {
        short_name: "KJV",
        full_name: "King James Version",
    },
    Translation {
        short_name: "NASB",
        full_name: "New American Standard Bible",
    },
    Translation {
        short_name: "NIV",
        full_name: "New International Version",
    },
    Translation {
        short_name: "NKJV",
        full_name: "New King James Version",
    },
    Translation {
        short_name: "NLT",
        full_name: "New Living Translation",
    },
    Translation {
        short_name: "YLT",
        full_name: "Young's Literal Translation",
    },
];

pub fn is_allowed_translation(short_name: &str) -> bool {
    ALLOWED_TRANSLATIONS
        .iter()
        .any(|t| t.short_name == short_name)
}

pub const PROTESTANT_BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// One entry of a translation's book list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInfo {
    pub bookid: u32,
    pub name: String,
    pub chapters: u32,
}

impl BookInfo {
    pub fn new(bookid: u32, name: impl Into<String>, chapters: u32) -> Self {
        Self {
            bookid,
            name: name.into(),
            chapters,
        }
    }
}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("translation {0} is not offered")]
    UnknownTranslation(String),
    #[error("content unavailable from {url}: {reason}")]
    Unavailable { url: String, reason: String },
    #[error("failed to decode content from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

pub fn books_url(translation: &str) -> String {
    format!("{CONTENT_BASE_URL}/get-books/{translation}/")
}

pub fn chapter_url(translation: &str, book_id: u32, chapter: u32) -> String {
    format!("{CONTENT_BASE_URL}/get-text/{translation}/{book_id}/{chapter}/")
}

/// Decodes a `get-books` payload and keeps only the 66-book canon, in payload order.
pub fn parse_books(translation: &str, payload: &[u8]) -> Result<Vec<BookInfo>, ContentError> {
    let books: Vec<BookInfo> =
        serde_json::from_slice(payload).map_err(|source| ContentError::Decode {
            url: books_url(translation),
            source,
        })?;
    Ok(filter_canon(books))
}

/// Decodes a `get-text` payload. Extra fields per verse are ignored.
pub fn parse_chapter(
    translation: &str,
    book_id: u32,
    chapter: u32,
    payload: &[u8],
) -> Result<Vec<VerseRef>, ContentError> {
    let mut verses: Vec<VerseRef> =
        serde_json::from_slice(payload).map_err(|source| ContentError::Decode {
            url: chapter_url(translation, book_id, chapter),
            source,
        })?;
    verses.sort_by_key(|v| v.verse);
    Ok(verses)
}

pub fn filter_canon(books: Vec<BookInfo>) -> Vec<BookInfo> {
    let before = books.len();
    let kept: Vec<BookInfo> = books
        .into_iter()
        .filter(|b| PROTESTANT_BOOKS.contains(&b.name.as_str()))
        .collect();
    if kept.len() != before {
        debug!(dropped = before - kept.len(), "filtered non-canon books");
    }
    kept
}

/// Applies a saved position to a freshly fetched book list.
///
/// A known book keeps its saved chapter clamped to `1..=chapters`. An unknown or missing book
/// falls back to the first book, chapter 1. Returns `None` only for an empty list.
pub fn resolve_position(
    books: &[BookInfo],
    saved_book_id: Option<u32>,
    saved_chapter: u32,
) -> Option<(&BookInfo, u32)> {
    let found = saved_book_id.and_then(|id| books.iter().find(|b| b.bookid == id));
    match found {
        Some(book) => Some((book, saved_chapter.clamp(1, book.chapters.max(1)))),
        None => books.first().map(|book| (book, 1)),
    }
}

/// Next chapter within the same book.
pub fn next_chapter(book: &BookInfo, chapter: u32) -> Option<u32> {
    (chapter < book.chapters).then(|| chapter + 1)
}

pub fn prev_chapter(chapter: u32) -> Option<u32> {
    (chapter > 1).then(|| chapter - 1)
}

/// Where book lists and chapter texts come from.
pub trait ScriptureSource {
    fn books(&self, translation: &str) -> Result<Vec<BookInfo>, ContentError>;

    fn chapter(
        &self,
        translation: &str,
        book_id: u32,
        chapter: u32,
    ) -> Result<Vec<VerseRef>, ContentError>;
}

/// In-memory source keyed by translation, for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    books: HashMap<String, Vec<BookInfo>>,
    chapters: HashMap<(String, u32, u32), Vec<VerseRef>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_books(mut self, translation: &str, books: Vec<BookInfo>) -> Self {
        self.books.insert(translation.to_owned(), filter_canon(books));
        self
    }

    pub fn with_chapter(
        mut self,
        translation: &str,
        book_id: u32,
        chapter: u32,
        verses: Vec<VerseRef>,
    ) -> Self {
        self.chapters
            .insert((translation.to_owned(), book_id, chapter), verses);
        self
    }
}

impl ScriptureSource for StaticSource {
    fn books(&self, translation: &str) -> Result<Vec<BookInfo>, ContentError> {
        self.books
            .get(translation)
            .cloned()
            .ok_or_else(|| ContentError::Unavailable {
                url: books_url(translation),
                reason: "translation not loaded".to_owned(),
            })
    }

    fn chapter(
        &self,
        translation: &str,
        book_id: u32,
        chapter: u32,
    ) -> Result<Vec<VerseRef>, ContentError> {
        self.chapters
            .get(&(translation.to_owned(), book_id, chapter))
            .cloned()
            .ok_or_else(|| ContentError::Unavailable {
                url: chapter_url(translation, book_id, chapter),
                reason: "chapter not loaded".to_owned(),
            })
    }
}
