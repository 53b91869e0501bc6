// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use crate::model::{HighlightColor, Note};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeKind {
    #[default]
    None,
    Highlight,
    Notes,
}

/// The annotation panel that is open for the current selection.
///
/// Each variant owns its transient picker state, so leaving a mode always discards the color
/// choice or note draft of the mode being left.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    None,
    Highlight {
        picked: Option<HighlightColor>,
    },
    Notes {
        draft: String,
        editing: Option<Note>,
    },
}

impl Mode {
    pub fn kind(&self) -> ModeKind {
        match self {
            Self::None => ModeKind::None,
            Self::Highlight { .. } => ModeKind::Highlight,
            Self::Notes { .. } => ModeKind::Notes,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    fn transition(&mut self, next: Mode) {
        let from = self.kind();
        *self = next;
        let to = self.kind();
        if from != to {
            debug!(?from, ?to, "mode changed");
        }
    }

    /// Opens highlight mode, or closes it if already open.
    pub fn toggle_highlight(&mut self) {
        let next = match self {
            Self::Highlight { .. } => Self::None,
            _ => Self::Highlight { picked: None },
        };
        self.transition(next);
    }

    /// Opens notes mode with an empty draft, or closes it if already open.
    pub fn toggle_notes(&mut self) {
        let next = match self {
            Self::Notes { .. } => Self::None,
            _ => Self::Notes {
                draft: String::new(),
                editing: None,
            },
        };
        self.transition(next);
    }

    pub fn reset(&mut self) {
        self.transition(Self::None);
    }

    /// Records the chosen color. Only meaningful in highlight mode.
    pub fn pick_color(&mut self, color: HighlightColor) -> bool {
        match self {
            Self::Highlight { picked } => {
                *picked = Some(color);
                true
            }
            _ => false,
        }
    }

    pub fn picked_color(&self) -> Option<HighlightColor> {
        match self {
            Self::Highlight { picked } => *picked,
            _ => None,
        }
    }

    /// Replaces the note draft. Only meaningful in notes mode.
    pub fn set_draft(&mut self, text: &str) -> bool {
        match self {
            Self::Notes { draft, .. } => {
                text.clone_into(draft);
                true
            }
            _ => false,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Notes { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Loads an existing note into the editor, entering notes mode if needed.
    pub fn begin_edit(&mut self, note: Note) {
        self.transition(Self::Notes {
            draft: note.text().to_owned(),
            editing: Some(note),
        });
    }

    pub fn editing(&self) -> Option<&Note> {
        match self {
            Self::Notes { editing, .. } => editing.as_ref(),
            _ => None,
        }
    }
}
