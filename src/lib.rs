// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Versemark: verse highlighting, notes and expound history for a Bible reader.
//!
//! The crate is the engine behind the reading screen. Stores persist through a pluggable
//! key-value port, the reader state tracks selection and annotation mode, and content and chat
//! transports are ports left to the embedding app.

pub mod content;
pub mod context;
pub mod expound;
pub mod model;
pub mod store;
pub mod ui;
