// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Versemark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Versemark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use rstest::rstest;
use serde::Deserialize;

use super::{Persistence, WriteQueue};
use crate::model::StorageKey;
use crate::store::backend::{KvBackend, MemoryBackend, StoreError};

/// Records every save and parks the writer inside `save` until the test releases it.
#[derive(Debug)]
struct GatedBackend {
    saves: Mutex<Vec<(StorageKey, Vec<u8>)>>,
    entered: Mutex<Sender<()>>,
    release: Mutex<Receiver<()>>,
}

impl GatedBackend {
    fn new() -> (Arc<Self>, Receiver<()>, Sender<()>) {
        let (entered_tx, entered_rx) = channel();
        let (release_tx, release_rx) = channel();
        let backend = Arc::new(Self {
            saves: Mutex::new(Vec::new()),
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        });
        (backend, entered_rx, release_tx)
    }

    fn saves(&self) -> Vec<(StorageKey, Vec<u8>)> {
        self.saves.lock().unwrap().clone()
    }
}

impl KvBackend for GatedBackend {
    fn load(&self, _key: StorageKey) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(None)
    }

    fn save(&self, key: StorageKey, contents: &[u8]) -> Result<(), StoreError> {
        self.entered.lock().unwrap().send(()).unwrap();
        self.release.lock().unwrap().recv().unwrap();
        self.saves.lock().unwrap().push((key, contents.to_vec()));
        Ok(())
    }
}

#[test]
fn pending_writes_for_one_slot_coalesce_to_latest() {
    let (backend, entered, release) = GatedBackend::new();
    let queue = WriteQueue::new(backend.clone()).unwrap();

    queue.schedule(StorageKey::Highlights, b"v1".to_vec());
    entered.recv_timeout(Duration::from_secs(5)).unwrap();

    queue.schedule(StorageKey::Highlights, b"v2".to_vec());
    queue.schedule(StorageKey::Highlights, b"v3".to_vec());

    release.send(()).unwrap();
    entered.recv_timeout(Duration::from_secs(5)).unwrap();
    release.send(()).unwrap();
    queue.flush();

    assert_eq!(
        backend.saves(),
        vec![
            (StorageKey::Highlights, b"v1".to_vec()),
            (StorageKey::Highlights, b"v3".to_vec()),
        ]
    );
    assert_eq!(queue.completed_writes(), 2);
}

#[test]
fn slots_are_written_in_first_scheduled_order() {
    let (backend, entered, release) = GatedBackend::new();
    let queue = WriteQueue::new(backend.clone()).unwrap();

    queue.schedule(StorageKey::Settings, b"s".to_vec());
    entered.recv_timeout(Duration::from_secs(5)).unwrap();
    queue.schedule(StorageKey::Notes, b"n1".to_vec());
    queue.schedule(StorageKey::Highlights, b"h".to_vec());
    queue.schedule(StorageKey::Notes, b"n2".to_vec());

    for _ in 0..2 {
        release.send(()).unwrap();
        entered.recv_timeout(Duration::from_secs(5)).unwrap();
    }
    release.send(()).unwrap();
    queue.flush();

    assert_eq!(
        backend.saves(),
        vec![
            (StorageKey::Settings, b"s".to_vec()),
            (StorageKey::Notes, b"n2".to_vec()),
            (StorageKey::Highlights, b"h".to_vec()),
        ]
    );
}

#[test]
fn dropping_the_queue_drains_pending_writes() {
    let backend = Arc::new(MemoryBackend::new());
    {
        let queue = WriteQueue::new(backend.clone()).unwrap();
        queue.schedule(StorageKey::ChatHistory, b"[]".to_vec());
    }
    assert_eq!(backend.slot(StorageKey::ChatHistory).as_deref(), Some(&b"[]"[..]));
}

#[test]
fn failed_writes_are_counted_not_retried() {
    let backend = Arc::new(MemoryBackend::new());
    backend.set_fail_writes(true);
    let persistence = Persistence::new(backend.clone()).unwrap();

    persistence.write_json(StorageKey::Notes, &serde_json::json!({}));
    persistence.flush();

    assert_eq!(persistence.failed_writes(), 1);
    assert_eq!(persistence.completed_writes(), 0);
    assert!(backend.slot(StorageKey::Notes).is_none());
}

#[derive(Debug, Deserialize, PartialEq)]
struct Probe {
    value: u32,
}

#[rstest]
#[case(None, None)]
#[case(Some("{\"value\":7}"), Some(Probe { value: 7 }))]
#[case(Some("{not json"), None)]
fn load_or_log_falls_back_to_none(#[case] stored: Option<&str>, #[case] expected: Option<Probe>) {
    let backend = match stored {
        Some(raw) => MemoryBackend::new().with_slot(StorageKey::Settings, raw),
        None => MemoryBackend::new(),
    };
    let persistence = Persistence::new(Arc::new(backend)).unwrap();
    assert_eq!(persistence.load_or_log::<Probe>(StorageKey::Settings), expected);
}

#[test]
fn read_sees_queued_writes() {
    let persistence = Persistence::new(Arc::new(MemoryBackend::new())).unwrap();
    persistence.write_json(StorageKey::Settings, &serde_json::json!({"value": 3}));
    let probe: Option<Probe> = persistence.read_json(StorageKey::Settings).unwrap();
    assert_eq!(probe, Some(Probe { value: 3 }));
}
