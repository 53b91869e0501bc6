// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::ReaderContext;
use crate::content::{BookInfo, ContentError, StaticSource};
use crate::expound::{ChatBackend, ChatError};
use crate::model::{ChatMessage, HighlightColor, SettingsStep, StorageKey, VerseKey, VerseRef};
use crate::store::MemoryBackend;
use crate::ui::ModeKind;

fn verses(count: u32) -> Vec<VerseRef> {
    (1..=count)
        .map(|verse| VerseRef::new(verse, format!("text {verse}")))
        .collect()
}

#[fixture]
fn source() -> StaticSource {
    let books = vec![
        BookInfo::new(1, "Genesis", 50),
        BookInfo::new(43, "John", 21),
        BookInfo::new(67, "Tobit", 14),
    ];
    StaticSource::new()
        .with_books("NLT", books.clone())
        .with_books("KJV", vec![BookInfo::new(1, "Genesis", 50)])
        .with_chapter("NLT", 1, 1, verses(31))
        .with_chapter("NLT", 43, 3, verses(36))
        .with_chapter("NLT", 43, 4, verses(54))
        .with_chapter("NLT", 43, 21, verses(25))
        .with_chapter("KJV", 1, 1, verses(31))
}

fn open_with(backend: MemoryBackend) -> (Arc<MemoryBackend>, ReaderContext) {
    let backend = Arc::new(backend);
    let context = ReaderContext::open(backend.clone()).unwrap();
    (backend, context)
}

fn saved_position(book: u32, chapter: u32) -> MemoryBackend {
    let settings = serde_json::json!({
        "selectedTranslation": "NLT",
        "selectedBookId": book,
        "selectedChapter": chapter,
    });
    MemoryBackend::new().with_slot(StorageKey::Settings, settings.to_string())
}

#[rstest]
fn fresh_install_opens_first_canon_book(source: StaticSource) {
    let (_, mut context) = open_with(MemoryBackend::new());
    context.load_position(&source).unwrap();

    let view = context.view().unwrap();
    assert_eq!((view.book.bookid, view.chapter), (1, 1));
    assert_eq!(context.books().len(), 2);
    assert_eq!(context.settings().selected_book_id, Some(1));
}

#[rstest]
#[case(43, 3, 3)]
#[case(43, 99, 21)]
fn saved_position_is_restored_and_clamped(
    source: StaticSource,
    #[case] book: u32,
    #[case] chapter: u32,
    #[case] expected: u32,
) {
    let (_, mut context) = open_with(saved_position(book, chapter));
    context.load_position(&source).unwrap();
    assert_eq!(context.view().unwrap().chapter, expected);
}

#[rstest]
fn chapter_navigation_stays_in_book(source: StaticSource) {
    let (backend, mut context) = open_with(saved_position(43, 3));
    context.load_position(&source).unwrap();

    assert!(context.next_chapter(&source).unwrap());
    assert_eq!(context.view().unwrap().chapter, 4);
    assert!(context.prev_chapter(&source).unwrap());
    assert_eq!(context.view().unwrap().chapter, 3);

    context.flush();
    let saved = backend.slot_json(StorageKey::Settings).unwrap();
    assert_eq!(saved["selectedBookId"], 43);
}

#[rstest]
fn last_chapter_has_no_next(source: StaticSource) {
    let (_, mut context) = open_with(saved_position(43, 21));
    context.load_position(&source).unwrap();
    assert!(!context.next_chapter(&source).unwrap());
    assert_eq!(context.view().unwrap().chapter, 21);
}

#[rstest]
fn missing_chapter_content_keeps_current_view(source: StaticSource) {
    let (_, mut context) = open_with(saved_position(43, 3));
    context.load_position(&source).unwrap();

    let err = context.go_to(&source, 43, 5).unwrap_err();
    assert!(matches!(err, ContentError::Unavailable { .. }));
    assert_eq!(context.view().unwrap().chapter, 3);
    assert_eq!(context.settings().selected_chapter, 3);
}

#[rstest]
fn failed_translation_switch_keeps_current_books(source: StaticSource) {
    let source = source.with_books("ESV", vec![BookInfo::new(1, "Genesis", 50)]);
    let (_, mut context) = open_with(saved_position(43, 3));
    context.load_position(&source).unwrap();

    let err = context.set_translation(&source, "ESV").unwrap_err();
    assert!(matches!(err, ContentError::Unavailable { .. }));

    let view = context.view().unwrap();
    assert_eq!((view.translation.as_str(), view.book.bookid, view.chapter), ("NLT", 43, 3));
    assert_eq!(context.settings().selected_translation, "NLT");
    let ids: Vec<u32> = context.books().iter().map(|b| b.bookid).collect();
    assert_eq!(ids, vec![1, 43]);

    assert!(context.next_chapter(&source).unwrap());
    assert_eq!(context.view().unwrap().chapter, 4);
}

#[rstest]
fn translation_switch_falls_back_when_book_is_missing(source: StaticSource) {
    let (_, mut context) = open_with(saved_position(43, 3));
    context.load_position(&source).unwrap();
    context.toggle_verse(16);

    context.set_translation(&source, "KJV").unwrap();
    let view = context.view().unwrap();
    assert_eq!((view.translation.as_str(), view.book.bookid, view.chapter), ("KJV", 1, 1));
    assert!(context.reader().selection().is_empty());

    assert!(matches!(
        context.set_translation(&source, "XYZ"),
        Err(ContentError::UnknownTranslation(_))
    ));
}

#[rstest]
fn annotations_flow_through_to_storage(source: StaticSource) {
    let (backend, mut context) = open_with(saved_position(43, 3));
    context.load_position(&source).unwrap();

    for verse in [16, 17, 18, 20] {
        assert_eq!(context.toggle_verse(verse), Some(true));
    }
    assert_eq!(context.toggle_verse(99), None);
    assert_eq!(context.reference_label().as_deref(), Some("John 3:16-18, 20"));

    context.reader_mut().toggle_notes_mode();
    context.reader_mut().set_note_draft("God's love");
    assert!(context.save_note());
    assert_eq!(context.notes_for_selection().len(), 1);

    context.reader_mut().toggle_highlight_mode();
    assert_eq!(context.reader().mode_kind(), ModeKind::Highlight);
    assert_eq!(context.apply_color(HighlightColor::Yellow), 4);

    let decorations = context.decorations();
    assert_eq!(decorations.len(), 36);
    let (_, d16) = decorations[15];
    assert!(d16.has_note && d16.highlight == Some(HighlightColor::Yellow) && !d16.selected);

    context.flush();
    let highlights = backend.slot_json(StorageKey::Highlights).unwrap();
    assert_eq!(highlights["43-3-20"], "yellow");
    let notes = backend.slot_json(StorageKey::Notes).unwrap();
    assert_eq!(notes["43-3-17"]["text"], "God's love");
}

#[rstest]
fn state_survives_reopen(source: StaticSource) {
    let (backend, mut context) = open_with(saved_position(43, 3));
    context.load_position(&source).unwrap();
    context.toggle_verse(16);
    context.apply_color(HighlightColor::Purple);
    context.apply_setting_step(SettingsStep::IncreaseFontSize);
    drop(context);

    let reopened = ReaderContext::open(backend).unwrap();
    assert_eq!(
        reopened.highlights().get(&VerseKey::new(43, 3, 16)),
        Some(HighlightColor::Purple)
    );
    assert_eq!(reopened.settings().font_size, 19);
}

struct Echo;

impl ChatBackend for Echo {
    fn complete(&self, conversation: &[ChatMessage]) -> Result<String, ChatError> {
        conversation
            .last()
            .map(|message| format!("about: {}", message.content.len()))
            .ok_or(ChatError::NotConfigured)
    }
}

#[rstest]
fn expound_needs_a_selection(source: StaticSource) {
    let (_, mut context) = open_with(saved_position(43, 3));
    context.load_position(&source).unwrap();
    assert!(context.expound(&Echo).is_none());

    context.toggle_verse(16);
    let session = context.expound(&Echo).unwrap();
    assert_eq!(session.verse_ref(), "John 3:16");
    assert!(session.conversation()[0].content.contains("\"text 16\""));
    assert_eq!(context.history().list().len(), 1);
}
