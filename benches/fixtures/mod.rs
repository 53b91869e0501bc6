// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use versemark::model::{VerseKey, VerseRef};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("versemark_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    /// A handful of verses, mostly contiguous.
    Small,
    /// Psalm 119: 176 verses, every third one skipped.
    Long,
}

pub fn verse_numbers(case: Case) -> Vec<u32> {
    match case {
        Case::Small => vec![1, 2, 3, 5, 7, 8],
        Case::Long => (1..=176).filter(|verse| verse % 3 != 0).collect(),
    }
}

pub fn verse_refs(case: Case) -> Vec<VerseRef> {
    verse_numbers(case)
        .into_iter()
        .map(|verse| VerseRef::new(verse, format!("Verse {verse} of the chapter.")))
        .collect()
}

pub fn verse_keys(case: Case) -> Vec<VerseKey> {
    verse_numbers(case)
        .into_iter()
        .map(|verse| VerseKey::new(19, 119, verse))
        .collect()
}

/// Highlights spread over the whole canon, for store payload sizes close to a heavy reader.
pub fn annotated_keys(count: u32) -> Vec<VerseKey> {
    (0..count)
        .map(|i| VerseKey::new(1 + i % 66, 1 + (i / 66) % 50, 1 + i % 31))
        .collect()
}
