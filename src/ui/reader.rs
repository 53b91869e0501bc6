// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Interaction state of the reading screen.
//!
//! `ReaderState` owns the verse selection and the annotation mode and applies committed actions to
//! the highlight and note stores. An empty selection always forces the mode back to `None`.

use tracing::debug;

use super::mode::{Mode, ModeKind};
use super::selection::{ChapterScope, SelectionSet};
use crate::model::{HighlightColor, Note, VerseKey, VerseRef};
use crate::store::{HighlightStore, NoteStore};

/// How one visible verse is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VerseDecoration {
    pub selected: bool,
    pub highlight: Option<HighlightColor>,
    pub has_note: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ReaderState {
    selection: SelectionSet,
    mode: Mode,
}

impl ReaderState {
    pub fn new(scope: ChapterScope) -> Self {
        Self {
            selection: SelectionSet::new(scope),
            mode: Mode::None,
        }
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn mode_kind(&self) -> ModeKind {
        self.mode.kind()
    }

    pub fn scope(&self) -> Option<&ChapterScope> {
        self.selection.scope()
    }

    pub fn selected_keys(&self) -> Vec<VerseKey> {
        self.selection.keys()
    }

    /// Switches translation, book or chapter. A change clears the selection and closes any mode.
    pub fn navigate(&mut self, scope: ChapterScope) -> bool {
        if !self.selection.set_scope(scope) {
            return false;
        }
        debug!(scope = ?self.selection.scope(), "reader navigated");
        self.mode.reset();
        true
    }

    /// Taps a verse. Returns `true` if the verse is selected afterwards.
    pub fn toggle_verse(&mut self, verse: VerseRef) -> bool {
        let selected = self.selection.toggle(verse);
        self.sync_mode();
        selected
    }

    /// Pull-down gesture: drops the selection and closes any mode.
    pub fn dismiss(&mut self) {
        self.selection.clear();
        self.mode.reset();
    }

    /// Opens or closes the highlight picker. Ignored while nothing is selected.
    pub fn toggle_highlight_mode(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.mode.toggle_highlight();
    }

    /// Opens or closes the note editor. Ignored while nothing is selected.
    pub fn toggle_notes_mode(&mut self) {
        if self.selection.is_empty() {
            return;
        }
        self.mode.toggle_notes();
    }

    pub fn clear_modes(&mut self) {
        self.mode.reset();
    }

    /// Highlights every selected verse with `color`, then clears selection and mode.
    ///
    /// Returns the number of verses highlighted.
    pub fn apply_color(&mut self, highlights: &mut HighlightStore, color: HighlightColor) -> usize {
        let keys = self.selection.keys();
        if !keys.is_empty() {
            highlights.apply_color(&keys, color);
        }
        self.dismiss();
        keys.len()
    }

    /// Removes highlights from every selected verse, then clears selection and mode.
    pub fn remove_highlight(&mut self, highlights: &mut HighlightStore) -> usize {
        let keys = self.selection.keys();
        let removed = keys.iter().filter(|key| highlights.get(key).is_some()).count();
        if removed > 0 {
            highlights.remove_batch(&keys);
        }
        self.dismiss();
        removed
    }

    /// Color of the first selected verse that carries a highlight.
    pub fn existing_highlight_color(&self, highlights: &HighlightStore) -> Option<HighlightColor> {
        self.selection
            .keys()
            .iter()
            .find_map(|key| highlights.get(key))
    }

    pub fn set_note_draft(&mut self, text: &str) -> bool {
        self.mode.set_draft(text)
    }

    /// Opens the editor prefilled with an existing note.
    pub fn edit_note(&mut self, note: &Note) {
        if self.selection.is_empty() {
            return;
        }
        self.mode.begin_edit(note.clone());
    }

    /// Saves the draft to every selected verse and closes notes mode. The selection is kept.
    ///
    /// An empty draft or empty selection only closes the editor. Returns `true` if a note was
    /// written.
    pub fn save_note(&mut self, notes: &mut NoteStore) -> bool {
        let draft = self.mode.draft().map(str::trim).unwrap_or_default().to_owned();
        let keys = self.selection.keys();
        self.mode.reset();
        if draft.is_empty() || keys.is_empty() {
            return false;
        }
        notes.set_notes(&keys, &draft);
        true
    }

    /// Detaches the note with `text` from the selected verses that carry exactly that text.
    pub fn delete_note(&mut self, notes: &mut NoteStore, text: &str) -> usize {
        let keys = self.selection.keys();
        notes.detach(&keys, text)
    }

    pub fn notes_for_selection<'a>(&self, notes: &'a NoteStore) -> Vec<&'a Note> {
        notes.notes_for_keys(&self.selection.keys())
    }

    pub fn decoration(
        &self,
        highlights: &HighlightStore,
        notes: &NoteStore,
        verse: u32,
    ) -> VerseDecoration {
        let Some(scope) = self.selection.scope() else {
            return VerseDecoration::default();
        };
        let key = scope.key(verse);
        VerseDecoration {
            selected: self.selection.contains(verse),
            highlight: highlights.get(&key),
            has_note: notes.has_note(&key),
        }
    }

    /// Human reference for the selection, e.g. `John 3:16-18, 20`.
    pub fn reference_label(&self, book_name: &str) -> Option<String> {
        let scope = self.selection.scope()?;
        if self.selection.is_empty() {
            return None;
        }
        Some(format!(
            "{book_name} {}:{}",
            scope.chapter,
            self.selection.range_label()
        ))
    }

    fn sync_mode(&mut self) {
        if self.selection.is_empty() && !self.mode.is_none() {
            self.mode.reset();
        }
    }
}
