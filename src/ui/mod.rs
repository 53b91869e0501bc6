// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Reading-screen interaction state.
//!
//! Holds the verse selection, the exclusive annotation mode and the reader operations that write
//! through to the highlight and note stores.

pub mod mode;
pub mod reader;
pub mod selection;

pub use mode::{Mode, ModeKind};
pub use reader::{ReaderState, VerseDecoration};
pub use selection::{format_range, parse_range, ChapterScope, ParseRangeError, SelectionSet};
