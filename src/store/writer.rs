// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::backend::{KvBackend, StoreError};
use crate::model::StorageKey;

#[derive(Debug, Default)]
struct QueueState {
    pending: HashMap<StorageKey, Vec<u8>>,
    queue: VecDeque<StorageKey>,
    in_flight: Option<StorageKey>,
    shutdown: bool,
    completed: u64,
    failed: u64,
}

impl QueueState {
    fn is_idle(&self) -> bool {
        self.in_flight.is_none() && self.pending.is_empty()
    }
}

struct QueueInner {
    state: Mutex<QueueState>,
    cv: Condvar,
    backend: Arc<dyn KvBackend>,
}

impl QueueInner {
    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Single-writer persistence queue.
///
/// One worker thread drains scheduled documents into the backend. A document scheduled while an
/// older one for the same slot is still pending replaces it in place, so each slot only ever
/// receives its latest state and writes to one slot are never concurrent.
pub struct WriteQueue {
    inner: Arc<QueueInner>,
    worker: Option<JoinHandle<()>>,
}

impl fmt::Debug for WriteQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("WriteQueue")
            .field("backend", &self.inner.backend)
            .field("pending", &state.queue)
            .field("in_flight", &state.in_flight)
            .finish()
    }
}

impl WriteQueue {
    pub fn new(backend: Arc<dyn KvBackend>) -> Result<Self, StoreError> {
        let inner = Arc::new(QueueInner {
            state: Mutex::new(QueueState::default()),
            cv: Condvar::new(),
            backend,
        });

        let worker = std::thread::Builder::new()
            .name("versemark-persist".to_owned())
            .spawn({
                let inner = inner.clone();
                move || Self::run_worker(inner)
            })
            .map_err(StoreError::WorkerSpawn)?;

        Ok(Self {
            inner,
            worker: Some(worker),
        })
    }

    pub fn backend(&self) -> &Arc<dyn KvBackend> {
        &self.inner.backend
    }

    pub fn schedule(&self, key: StorageKey, contents: Vec<u8>) {
        let mut state = self.inner.lock();
        if state.pending.insert(key, contents).is_some() {
            debug!(%key, "coalesced pending write");
            return;
        }
        state.queue.push_back(key);
        self.inner.cv.notify_all();
    }

    /// Blocks until every scheduled write has been attempted.
    pub fn flush(&self) {
        let mut state = self.inner.lock();
        while !state.is_idle() {
            state = self
                .inner
                .cv
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    pub fn completed_writes(&self) -> u64 {
        self.inner.lock().completed
    }

    pub fn failed_writes(&self) -> u64 {
        self.inner.lock().failed
    }

    fn run_worker(inner: Arc<QueueInner>) {
        loop {
            let (key, contents) = {
                let mut state = inner.lock();

                loop {
                    if let Some(key) = state.queue.pop_front() {
                        if let Some(contents) = state.pending.remove(&key) {
                            state.in_flight = Some(key);
                            break (key, contents);
                        }
                        continue;
                    }

                    if state.shutdown {
                        return;
                    }

                    state = inner.cv.wait(state).unwrap_or_else(PoisonError::into_inner);
                }
            };

            let result = inner.backend.save(key, &contents);

            let mut state = inner.lock();
            match result {
                Ok(()) => {
                    state.completed += 1;
                    debug!(%key, bytes = contents.len(), "persisted");
                }
                Err(err) => {
                    state.failed += 1;
                    warn!(%key, error = %err, "failed to persist; in-memory state kept");
                }
            }
            state.in_flight = None;
            inner.cv.notify_all();
        }
    }
}

impl Drop for WriteQueue {
    fn drop(&mut self) {
        {
            let mut state = self.inner.lock();
            state.shutdown = true;
            self.inner.cv.notify_all();
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("persistence writer panicked");
            }
        }
    }
}

/// Handle shared by the stores: synchronous reads from the backend, queued writes.
#[derive(Debug, Clone)]
pub struct Persistence {
    queue: Arc<WriteQueue>,
}

impl Persistence {
    pub fn new(backend: Arc<dyn KvBackend>) -> Result<Self, StoreError> {
        Ok(Self {
            queue: Arc::new(WriteQueue::new(backend)?),
        })
    }

    /// Reads the stored document for `key`, after any queued writes have landed.
    pub fn read(&self, key: StorageKey) -> Result<Option<Vec<u8>>, StoreError> {
        self.queue.flush();
        self.queue.backend().load(key)
    }

    pub fn read_json<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StoreError> {
        let Some(bytes) = self.read(key)? else {
            return Ok(None);
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Json { key, source })
    }

    /// Startup load: any failure is logged and treated as "nothing stored".
    pub fn load_or_log<T: DeserializeOwned>(&self, key: StorageKey) -> Option<T> {
        match self.read_json(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(%key, error = %err, "failed to load; starting empty");
                None
            }
        }
    }

    /// Serializes `value` and enqueues it as the new document for `key`.
    pub fn write_json<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) {
        match serde_json::to_vec(value) {
            Ok(bytes) => self.queue.schedule(key, bytes),
            Err(source) => {
                let err = StoreError::Json { key, source };
                warn!(%key, error = %err, "failed to serialize; write skipped");
            }
        }
    }

    pub fn flush(&self) {
        self.queue.flush();
    }

    pub fn failed_writes(&self) -> u64 {
        self.queue.failed_writes()
    }

    pub fn completed_writes(&self) -> u64 {
        self.queue.completed_writes()
    }
}

#[cfg(test)]
mod tests;
