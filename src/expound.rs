// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Expound: ask a chat model to explain the selected verses, and keep the conversation.

use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{clean_verse_text, ChatMessage, ChatRecord, VerseRef};
use crate::store::ChatHistoryStore;

/// Reply shown in place of a completion when the backend fails.
pub const APOLOGY: &str = "Sorry, I'm unable to generate a response right now. Please check your internet connection and try again.";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat backend is not configured")]
    NotConfigured,
    #[error("chat backend failed: {0}")]
    Backend(String),
}

/// A chat model. Receives the whole conversation, the last message being the new user turn.
pub trait ChatBackend {
    fn complete(&self, conversation: &[ChatMessage]) -> Result<String, ChatError>;
}

/// Opening prompt for a selection: `Expound`, the quoted verse text, then the reference.
pub fn expound_prompt(verses: &[VerseRef], reference: &str) -> String {
    let text = verses
        .iter()
        .map(|v| clean_verse_text(&v.text))
        .collect::<Vec<_>>()
        .join(" ");
    format!("Expound\n\n\"{text}\"\n\n{reference}")
}

/// The conversation as sent to a backend: messages with empty content are dropped.
pub fn prepare_conversation(conversation: &[ChatMessage]) -> Vec<ChatMessage> {
    conversation
        .iter()
        .filter(|message| !message.content.is_empty())
        .cloned()
        .collect()
}

fn reply(backend: &dyn ChatBackend, conversation: &[ChatMessage]) -> String {
    match backend.complete(&prepare_conversation(conversation)) {
        Ok(text) => text,
        Err(err) => {
            warn!(error = %err, "expound request failed");
            APOLOGY.to_owned()
        }
    }
}

/// One expound conversation. The first reply creates a history record, later replies update it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpoundSession {
    verse_ref: String,
    conversation: Vec<ChatMessage>,
    chat_id: Option<i64>,
}

impl ExpoundSession {
    /// Sends the opening prompt for `verses` and saves the exchange to `history`.
    pub fn start(
        verses: &[VerseRef],
        reference: &str,
        backend: &dyn ChatBackend,
        history: &mut ChatHistoryStore,
    ) -> Self {
        let mut session = Self {
            verse_ref: reference.to_owned(),
            conversation: vec![ChatMessage::user(expound_prompt(verses, reference))],
            chat_id: None,
        };
        session.respond(backend, history);
        session
    }

    /// Continues a saved conversation.
    pub fn resume(record: &ChatRecord) -> Self {
        Self {
            verse_ref: record.verse_ref.clone(),
            conversation: record.conversation.clone(),
            chat_id: Some(record.id),
        }
    }

    /// Sends a follow-up question. Blank input is ignored and returns `None`.
    pub fn send(
        &mut self,
        text: &str,
        backend: &dyn ChatBackend,
        history: &mut ChatHistoryStore,
    ) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.conversation.push(ChatMessage::user(text));
        self.respond(backend, history);
        self.conversation.last()
    }

    pub fn verse_ref(&self) -> &str {
        &self.verse_ref
    }

    pub fn conversation(&self) -> &[ChatMessage] {
        &self.conversation
    }

    pub fn chat_id(&self) -> Option<i64> {
        self.chat_id
    }

    pub fn title(&self) -> String {
        format!("Expound on {}", self.verse_ref)
    }

    fn respond(&mut self, backend: &dyn ChatBackend, history: &mut ChatHistoryStore) {
        let answer = reply(backend, &self.conversation);
        self.conversation.push(ChatMessage::model(answer));

        match self.chat_id {
            Some(id) => {
                if !history.update_conversation(id, self.conversation.clone()) {
                    debug!(id, "chat no longer in history");
                }
            }
            None => {
                let id = history.save_new(self.conversation.clone(), &self.verse_ref);
                self.chat_id = Some(id);
            }
        }
    }
}
