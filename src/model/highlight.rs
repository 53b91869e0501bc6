// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed highlight palette. Persisted as the lowercase tag (`"yellow"`, `"blue"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightColor {
    Yellow,
    Blue,
    Green,
    Pink,
    Orange,
    Purple,
}

impl HighlightColor {
    /// Palette order as shown in the color picker.
    pub const ALL: [HighlightColor; 6] = [
        HighlightColor::Yellow,
        HighlightColor::Blue,
        HighlightColor::Green,
        HighlightColor::Pink,
        HighlightColor::Orange,
        HighlightColor::Purple,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Yellow => "yellow",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Pink => "pink",
            Self::Orange => "orange",
            Self::Purple => "purple",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Yellow => "Yellow",
            Self::Blue => "Blue",
            Self::Green => "Green",
            Self::Pink => "Pink",
            Self::Orange => "Orange",
            Self::Purple => "Purple",
        }
    }

    /// Background color used when rendering a highlighted verse.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Yellow => "#FFD700",
            Self::Blue => "#87CEEB",
            Self::Green => "#90EE90",
            Self::Pink => "#FFB6C1",
            Self::Orange => "#FFA500",
            Self::Purple => "#DDA0DD",
        }
    }
}

impl fmt::Display for HighlightColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown highlight color {0:?} (expected one of yellow, blue, green, pink, orange, purple)")]
pub struct ParseColorError(pub String);

impl FromStr for HighlightColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|color| color.tag().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ParseColorError(s.to_owned()))
    }
}
