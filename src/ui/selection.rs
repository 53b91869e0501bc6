// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::model::{VerseKey, VerseRef};

/// The (translation, book, chapter) a selection belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChapterScope {
    pub translation: String,
    pub book_id: u32,
    pub chapter: u32,
}

impl ChapterScope {
    pub fn new(translation: impl Into<String>, book_id: u32, chapter: u32) -> Self {
        Self {
            translation: translation.into(),
            book_id,
            chapter,
        }
    }

    pub fn key(&self, verse: u32) -> VerseKey {
        VerseKey::new(self.book_id, self.chapter, verse)
    }
}

impl fmt::Display for ChapterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", self.translation, self.book_id, self.chapter)
    }
}

/// Selected verses of one chapter: unique verse numbers, always ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    scope: Option<ChapterScope>,
    verses: Vec<VerseRef>,
}

impl SelectionSet {
    pub fn new(scope: ChapterScope) -> Self {
        Self {
            scope: Some(scope),
            verses: Vec::new(),
        }
    }

    pub fn scope(&self) -> Option<&ChapterScope> {
        self.scope.as_ref()
    }

    /// Moves the selection to another chapter. Any scope change empties the selection.
    ///
    /// Returns `true` if the scope changed.
    pub fn set_scope(&mut self, scope: ChapterScope) -> bool {
        if self.scope.as_ref() == Some(&scope) {
            return false;
        }
        self.scope = Some(scope);
        self.verses.clear();
        true
    }

    /// Removes the verse if selected, otherwise inserts it in verse order.
    ///
    /// Returns `true` if the verse is selected afterwards.
    pub fn toggle(&mut self, verse: VerseRef) -> bool {
        match self.verses.binary_search_by_key(&verse.verse, |v| v.verse) {
            Ok(index) => {
                self.verses.remove(index);
                false
            }
            Err(index) => {
                self.verses.insert(index, verse);
                true
            }
        }
    }

    pub fn contains(&self, verse: u32) -> bool {
        self.verses
            .binary_search_by_key(&verse, |v| v.verse)
            .is_ok()
    }

    pub fn clear(&mut self) {
        self.verses.clear();
    }

    pub fn verses(&self) -> &[VerseRef] {
        &self.verses
    }

    pub fn verse_numbers(&self) -> Vec<u32> {
        self.verses.iter().map(|v| v.verse).collect()
    }

    pub fn len(&self) -> usize {
        self.verses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verses.is_empty()
    }

    /// Verse keys of the selection, or nothing when no chapter is in scope.
    pub fn keys(&self) -> Vec<VerseKey> {
        let Some(scope) = self.scope.as_ref() else {
            return Vec::new();
        };
        self.verses.iter().map(|v| scope.key(v.verse)).collect()
    }

    pub fn range_label(&self) -> String {
        format_range(&self.verse_numbers())
    }
}

fn push_run(out: &mut String, start: u32, end: u32) {
    if !out.is_empty() {
        out.push_str(", ");
    }
    if start == end {
        out.push_str(&start.to_string());
    } else {
        out.push_str(&format!("{start}-{end}"));
    }
}

/// Collapses ascending verse numbers into `"1-3, 5, 7-8"` notation.
pub fn format_range(verses: &[u32]) -> String {
    let mut out = String::new();
    let mut iter = verses.iter().copied();
    let Some(first) = iter.next() else {
        return out;
    };

    let (mut start, mut end) = (first, first);
    for verse in iter {
        if end.checked_add(1) == Some(verse) {
            end = verse;
        } else {
            push_run(&mut out, start, end);
            start = verse;
            end = verse;
        }
    }
    push_run(&mut out, start, end);
    out
}

/// Widest span a single range may cover. The longest chapter has 176 verses.
pub const MAX_RANGE_SPAN: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseRangeError {
    #[error("empty verse list")]
    Empty,
    #[error("invalid verse number {0:?}")]
    InvalidVerse(String),
    #[error("range {start}-{end} runs backwards")]
    Backwards { start: u32, end: u32 },
    #[error("range {start}-{end} spans more than {MAX_RANGE_SPAN} verses")]
    TooLong { start: u32, end: u32 },
}

/// Parses `"1-3, 5"` back into ascending, de-duplicated verse numbers.
pub fn parse_range(input: &str) -> Result<Vec<u32>, ParseRangeError> {
    let parse_verse = |raw: &str| {
        let raw = raw.trim();
        raw.parse::<u32>()
            .ok()
            .filter(|verse| *verse > 0)
            .ok_or_else(|| ParseRangeError::InvalidVerse(raw.to_owned()))
    };

    let mut verses = Vec::new();
    for part in input.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let (start, end) = (parse_verse(start)?, parse_verse(end)?);
                if end < start {
                    return Err(ParseRangeError::Backwards { start, end });
                }
                if end - start >= MAX_RANGE_SPAN {
                    return Err(ParseRangeError::TooLong { start, end });
                }
                verses.extend(start..=end);
            }
            None => verses.push(parse_verse(part)?),
        }
    }

    if verses.is_empty() {
        return Err(ParseRangeError::Empty);
    }
    verses.sort_unstable();
    verses.dedup();
    Ok(verses)
}
