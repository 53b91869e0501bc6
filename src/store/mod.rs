// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for annotations, settings and chat history.
//!
//! Every store keeps its full state in memory and mirrors it to a [`KvBackend`] slot on each
//! mutation. Writes go through a single-writer [`WriteQueue`], so the in-memory update and the
//! enqueue happen in the same call and writes to one slot are applied in issuance order.

pub mod backend;
pub mod chat_history;
pub mod highlights;
pub mod notes;
pub mod settings;
pub mod writer;

pub use backend::{DirBackend, KvBackend, MemoryBackend, StoreError, WriteDurability};
pub use chat_history::ChatHistoryStore;
pub use highlights::HighlightStore;
pub use notes::NoteStore;
pub use settings::SettingsStore;
pub use writer::{Persistence, WriteQueue};

#[cfg(test)]
pub(crate) mod test_utils;
