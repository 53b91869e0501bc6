// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// One verse as delivered by the content provider. Read-only input to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRef {
    pub verse: u32,
    #[serde(default)]
    pub text: String,
}

impl VerseRef {
    pub fn new(verse: u32, text: impl Into<String>) -> Self {
        Self {
            verse,
            text: text.into(),
        }
    }
}

fn markup_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("markup tag pattern is valid"))
}

/// Strips inline markup (`<S>`, `<i>`, `<br/>`, ...) and decodes HTML entities.
pub fn clean_verse_text(raw: &str) -> String {
    let stripped = markup_tag_re().replace_all(raw, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}
