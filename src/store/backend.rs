// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::model::StorageKey;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error in {key}: {source}")]
    Json {
        key: StorageKey,
        #[source]
        source: serde_json::Error,
    },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
    #[error("storage slot {key} is unavailable: {reason}")]
    Unavailable { key: StorageKey, reason: String },
    #[error("cannot start persistence writer: {0}")]
    WorkerSpawn(#[source] io::Error),
}

/// Flat key-value device storage. One opaque document per [`StorageKey`].
///
/// Implementations must be safe to call from the persistence writer thread.
pub trait KvBackend: fmt::Debug + Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored under `key` yet.
    fn load(&self, key: StorageKey) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replaces the document stored under `key`.
    fn save(&self, key: StorageKey, contents: &[u8]) -> Result<(), StoreError>;
}

/// In-process storage, used by tests and demos.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    slots: Mutex<HashMap<StorageKey, Vec<u8>>>,
    fail_writes: AtomicBool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a slot, bypassing the write path.
    pub fn with_slot(self, key: StorageKey, contents: impl Into<Vec<u8>>) -> Self {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, contents.into());
        self
    }

    /// Makes every subsequent `save` fail, simulating a full or read-only device store.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn slot(&self, key: StorageKey) -> Option<Vec<u8>> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned()
    }

    pub fn slot_json(&self, key: StorageKey) -> Option<serde_json::Value> {
        self.slot(key)
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
    }
}

impl KvBackend for MemoryBackend {
    fn load(&self, key: StorageKey) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.slot(key))
    }

    fn save(&self, key: StorageKey, contents: &[u8]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable {
                key,
                reason: "writes disabled".to_owned(),
            });
        }
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, contents.to_vec());
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// - Writes a temp file and renames atomically into place.
    /// - Does not perform per-file fsync/sync.
    #[default]
    BestEffort,

    /// Slower, best-effort durability.
    ///
    /// Flushes file contents and the rename to stable storage where the platform allows it.
    Durable,
}

/// Stores each slot as `<root>/<key>.json`.
#[derive(Debug, Clone)]
pub struct DirBackend {
    root: PathBuf,
    durability: WriteDurability,
}

impl DirBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            durability: WriteDurability::default(),
        }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, key: StorageKey) -> PathBuf {
        self.root.join(format!("{}.json", key.as_str()))
    }
}

impl KvBackend for DirBackend {
    fn load(&self, key: StorageKey) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.slot_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn save(&self, key: StorageKey, contents: &[u8]) -> Result<(), StoreError> {
        write_atomic(&self.root, &self.slot_path(key), contents, self.durability)
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(
    root: &Path,
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), StoreError> {
    fs::create_dir_all(root).map_err(|source| StoreError::Io {
        path: root.to_path_buf(),
        source,
    })?;

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(StoreError::SymlinkRefused {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let Some(file_name) = path.file_name() else {
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let tmp_path = root.join(format!(
        ".versemark.tmp.{}.{}",
        file_name.to_string_lossy(),
        nanos
    ));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;

    file.write_all(contents).map_err(|source| StoreError::Io {
        path: tmp_path.clone(),
        source,
    })?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(|source| StoreError::Io {
            path: tmp_path.clone(),
            source,
        })?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(root).map_err(|source| StoreError::Io {
                path: root.to_path_buf(),
                source,
            })?;
            dir.sync_all().map_err(|source| StoreError::Io {
                path: root.to_path_buf(),
                source,
            })?;
        }
    }

    Ok(())
}
