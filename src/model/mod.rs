// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! Verses are addressed by [`VerseKey`]; highlights, notes, reader settings and saved expound
//! chats are plain values owned by the stores in [`crate::store`].

pub mod chat;
pub mod highlight;
pub mod ids;
pub mod note;
pub mod settings;
pub mod verse;

pub use chat::{ChatMessage, ChatRecord, ChatRole};
pub use highlight::{HighlightColor, ParseColorError};
pub use ids::{make_key, ParseVerseKeyError, StorageKey, VerseKey};
pub use note::Note;
pub use settings::{ReaderSettings, SettingsStep};
pub use verse::{clean_verse_text, VerseRef};
