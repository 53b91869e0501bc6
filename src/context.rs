// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Provider-level state of the reading app.
//!
//! [`ReaderContext`] owns every store over one [`Persistence`] handle, the book list of the current
//! translation and the open chapter. Navigation writes the position through to the settings.

use std::sync::Arc;

use tracing::{debug, info};

use crate::content::{
    is_allowed_translation, next_chapter, prev_chapter, resolve_position, BookInfo, ContentError,
    ScriptureSource,
};
use crate::expound::{ChatBackend, ExpoundSession};
use crate::model::{HighlightColor, Note, ReaderSettings, SettingsStep, VerseRef};
use crate::store::{
    ChatHistoryStore, HighlightStore, KvBackend, NoteStore, Persistence, SettingsStore, StoreError,
};
use crate::ui::{ChapterScope, ReaderState, VerseDecoration};

/// The chapter on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterView {
    pub translation: String,
    pub book: BookInfo,
    pub chapter: u32,
    pub verses: Vec<VerseRef>,
}

impl ChapterView {
    pub fn scope(&self) -> ChapterScope {
        ChapterScope::new(self.translation.clone(), self.book.bookid, self.chapter)
    }

    pub fn verse(&self, number: u32) -> Option<&VerseRef> {
        self.verses
            .binary_search_by_key(&number, |v| v.verse)
            .ok()
            .map(|index| &self.verses[index])
    }
}

#[derive(Debug)]
pub struct ReaderContext {
    persistence: Persistence,
    settings: SettingsStore,
    highlights: HighlightStore,
    notes: NoteStore,
    history: ChatHistoryStore,
    reader: ReaderState,
    books: Vec<BookInfo>,
    view: Option<ChapterView>,
}

impl ReaderContext {
    /// Starts the write queue and loads every store from `backend`.
    pub fn open(backend: Arc<dyn KvBackend>) -> Result<Self, StoreError> {
        let persistence = Persistence::new(backend)?;
        let context = Self {
            settings: SettingsStore::load(persistence.clone()),
            highlights: HighlightStore::load(persistence.clone()),
            notes: NoteStore::load(persistence.clone()),
            history: ChatHistoryStore::load(persistence.clone()),
            reader: ReaderState::default(),
            books: Vec::new(),
            view: None,
            persistence,
        };
        info!("reader context opened");
        Ok(context)
    }

    pub fn persistence(&self) -> &Persistence {
        &self.persistence
    }

    pub fn settings(&self) -> &ReaderSettings {
        self.settings.get()
    }

    pub fn highlights(&self) -> &HighlightStore {
        &self.highlights
    }

    pub fn notes(&self) -> &NoteStore {
        &self.notes
    }

    pub fn history(&self) -> &ChatHistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut ChatHistoryStore {
        &mut self.history
    }

    pub fn reader(&self) -> &ReaderState {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut ReaderState {
        &mut self.reader
    }

    pub fn books(&self) -> &[BookInfo] {
        &self.books
    }

    pub fn view(&self) -> Option<&ChapterView> {
        self.view.as_ref()
    }

    pub fn apply_setting_step(&mut self, step: SettingsStep) -> bool {
        self.settings.apply_step(step)
    }

    /// Fetches the book list of the saved translation and reopens the saved position.
    pub fn load_position(&mut self, source: &dyn ScriptureSource) -> Result<(), ContentError> {
        let translation = self.settings.get().selected_translation.clone();
        let saved_book = self.settings.get().selected_book_id;
        let saved_chapter = self.settings.get().selected_chapter;
        self.switch_books(source, &translation, saved_book, saved_chapter)
    }

    /// Changes translation, keeping the current book and chapter when the new list has them.
    pub fn set_translation(
        &mut self,
        source: &dyn ScriptureSource,
        translation: &str,
    ) -> Result<(), ContentError> {
        if !is_allowed_translation(translation) {
            return Err(ContentError::UnknownTranslation(translation.to_owned()));
        }
        let (book, chapter) = match &self.view {
            Some(view) => (Some(view.book.bookid), view.chapter),
            None => (None, 1),
        };
        self.switch_books(source, translation, book, chapter)
    }

    /// Opens `chapter` of `book_id` in the current translation. Returns `false` for an unknown
    /// book or an out-of-range chapter.
    pub fn go_to(
        &mut self,
        source: &dyn ScriptureSource,
        book_id: u32,
        chapter: u32,
    ) -> Result<bool, ContentError> {
        let Some(book) = self.books.iter().find(|b| b.bookid == book_id).cloned() else {
            return Ok(false);
        };
        if chapter == 0 || chapter > book.chapters {
            return Ok(false);
        }
        let translation = self.settings.get().selected_translation.clone();
        self.open_chapter(source, &translation, book, chapter)?;
        Ok(true)
    }

    /// Swipe left. Stays within the current book.
    pub fn next_chapter(&mut self, source: &dyn ScriptureSource) -> Result<bool, ContentError> {
        let Some(view) = &self.view else {
            return Ok(false);
        };
        let book_id = view.book.bookid;
        match next_chapter(&view.book, view.chapter) {
            Some(chapter) => self.go_to(source, book_id, chapter),
            None => Ok(false),
        }
    }

    /// Swipe right. Stays within the current book.
    pub fn prev_chapter(&mut self, source: &dyn ScriptureSource) -> Result<bool, ContentError> {
        let Some(view) = &self.view else {
            return Ok(false);
        };
        let book_id = view.book.bookid;
        match prev_chapter(view.chapter) {
            Some(chapter) => self.go_to(source, book_id, chapter),
            None => Ok(false),
        }
    }

    /// Taps a verse of the open chapter. `None` if the chapter has no such verse.
    pub fn toggle_verse(&mut self, number: u32) -> Option<bool> {
        let verse = self.view.as_ref()?.verse(number)?.clone();
        Some(self.reader.toggle_verse(verse))
    }

    pub fn apply_color(&mut self, color: HighlightColor) -> usize {
        self.reader.apply_color(&mut self.highlights, color)
    }

    pub fn remove_highlight(&mut self) -> usize {
        self.reader.remove_highlight(&mut self.highlights)
    }

    pub fn existing_highlight_color(&self) -> Option<HighlightColor> {
        self.reader.existing_highlight_color(&self.highlights)
    }

    pub fn save_note(&mut self) -> bool {
        self.reader.save_note(&mut self.notes)
    }

    pub fn delete_note(&mut self, text: &str) -> usize {
        self.reader.delete_note(&mut self.notes, text)
    }

    pub fn notes_for_selection(&self) -> Vec<&Note> {
        self.reader.notes_for_selection(&self.notes)
    }

    /// Decorations for every verse of the open chapter, in verse order.
    pub fn decorations(&self) -> Vec<(u32, VerseDecoration)> {
        let Some(view) = &self.view else {
            return Vec::new();
        };
        view.verses
            .iter()
            .map(|v| {
                (
                    v.verse,
                    self.reader.decoration(&self.highlights, &self.notes, v.verse),
                )
            })
            .collect()
    }

    pub fn reference_label(&self) -> Option<String> {
        let view = self.view.as_ref()?;
        self.reader.reference_label(&view.book.name)
    }

    /// Starts an expound conversation about the selection. `None` while nothing is selected.
    pub fn expound(&mut self, backend: &dyn ChatBackend) -> Option<ExpoundSession> {
        let reference = self.reference_label()?;
        let verses = self.reader.selection().verses().to_vec();
        Some(ExpoundSession::start(
            &verses,
            &reference,
            backend,
            &mut self.history,
        ))
    }

    /// Blocks until every queued write has reached the backend.
    pub fn flush(&self) {
        self.persistence.flush();
    }

    fn switch_books(
        &mut self,
        source: &dyn ScriptureSource,
        translation: &str,
        book_id: Option<u32>,
        chapter: u32,
    ) -> Result<(), ContentError> {
        let books = source.books(translation)?;
        let target = resolve_position(&books, book_id, chapter)
            .map(|(book, chapter)| (book.clone(), chapter));

        let Some((book, chapter)) = target else {
            debug!(translation, "translation has no books");
            self.books = books;
            self.view = None;
            self.reader.dismiss();
            return Ok(());
        };
        // The book list only changes once the chapter opened.
        self.open_chapter(source, translation, book, chapter)?;
        self.books = books;
        Ok(())
    }

    fn open_chapter(
        &mut self,
        source: &dyn ScriptureSource,
        translation: &str,
        book: BookInfo,
        chapter: u32,
    ) -> Result<(), ContentError> {
        let mut verses = source.chapter(translation, book.bookid, chapter)?;
        verses.sort_by_key(|v| v.verse);
        self.settings.set_position(translation, book.bookid, chapter);

        let view = ChapterView {
            translation: translation.to_owned(),
            book,
            chapter,
            verses,
        };
        self.reader.navigate(view.scope());
        debug!(book = %view.book.name, chapter, "chapter opened");
        self.view = Some(view);
        Ok(())
    }
}

#[cfg(test)]
mod tests;
