//! Shared key-value storage with change events.
//!
//! The cart and theme persist through a small string-to-string store.
//! Every handle onto a store has its own identity: writes made through
//! one handle are announced to subscribers of *other* handles, never
//! back to the writer. A second storefront instance therefore sees the
//! first instance's changes, while each instance stays authoritative
//! for its own.
//!
//! Two backends are provided:
//!
//! - [`MemoryStorage`] keeps everything in process memory and is the
//!   test double for multi-instance scenarios
//! - [`FileStorage`] writes a single JSON document to disk and can
//!   poll it for edits made by other processes (e.g. the `bq` CLI)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// A committed change to one key.
///
/// `old_value`/`new_value` are `None` for keys that were absent before
/// or removed by the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub key: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
}

/// A handle onto a shared key-value store.
///
/// All methods take `&self`; implementations synchronize internally so
/// handles can be shared across threads.
pub trait SharedStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`.
    ///
    /// Writing a value identical to the current one is a no-op and
    /// emits no event.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be committed. The store
    /// keeps its previous contents in that case.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key` if present. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be committed.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Register for change events.
    ///
    /// The receiver sees every committed change except those written
    /// through this same handle.
    fn subscribe(&self) -> mpsc::Receiver<StorageEvent>;
}

/// Fan-out of storage events to per-handle subscribers.
struct EventBus {
    subscribers: Mutex<Vec<(Uuid, mpsc::Sender<StorageEvent>)>>,
}

impl EventBus {
    const fn new() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }

    fn subscribe(&self, handle_id: Uuid) -> mpsc::Receiver<StorageEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((handle_id, tx));
        rx
    }

    /// Deliver `event` to every subscriber except those registered by
    /// `writer`. Subscribers whose receiver is gone are dropped.
    fn broadcast(&self, writer: Option<Uuid>, event: &StorageEvent) {
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|(handle_id, tx)| {
                if Some(*handle_id) == writer {
                    return true;
                }
                tx.send(event.clone()).is_ok()
            });
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

struct MemoryInner {
    values: Mutex<BTreeMap<String, String>>,
    bus: EventBus,
}

/// In-memory storage, shared between handles cloned off one root.
///
/// Each handle created by [`MemoryStorage::another_handle`] behaves
/// like a separate storefront instance on the same underlying store.
pub struct MemoryStorage {
    handle_id: Uuid,
    inner: Arc<MemoryInner>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self {
            handle_id: Uuid::new_v4(),
            inner: Arc::new(MemoryInner {
                values: Mutex::new(BTreeMap::new()),
                bus: EventBus::new(),
            }),
        }
    }

    /// A second handle onto the same store with its own identity.
    #[must_use]
    pub fn another_handle(&self) -> Self {
        Self {
            handle_id: Uuid::new_v4(),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.inner.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let old_value = {
            let mut values = self.inner.values.lock().unwrap_or_else(|e| e.into_inner());
            if values.get(key).map(String::as_str) == Some(value) {
                return Ok(());
            }
            values.insert(key.to_string(), value.to_string())
        };
        self.inner.bus.broadcast(
            Some(self.handle_id),
            &StorageEvent {
                key: key.to_string(),
                old_value,
                new_value: Some(value.to_string()),
            },
        );
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let old_value = {
            let mut values = self.inner.values.lock().unwrap_or_else(|e| e.into_inner());
            match values.remove(key) {
                Some(old) => old,
                None => return Ok(()),
            }
        };
        self.inner.bus.broadcast(
            Some(self.handle_id),
            &StorageEvent {
                key: key.to_string(),
                old_value: Some(old_value),
                new_value: None,
            },
        );
        Ok(())
    }

    fn subscribe(&self) -> mpsc::Receiver<StorageEvent> {
        self.inner.bus.subscribe(self.handle_id)
    }
}

// =============================================================================
// FileStorage
// =============================================================================

struct FileInner {
    path: PathBuf,
    /// Last document this process has seen on disk.
    state: Mutex<BTreeMap<String, String>>,
    bus: EventBus,
}

/// File-backed storage holding one JSON document of all keys.
///
/// Writes go through the in-process state and are flushed to disk
/// before subscribers are told, so an event always means the change is
/// durable. [`FileStorage::poll_external`] picks up edits other
/// processes made to the same file and replays them as events to every
/// local subscriber.
pub struct FileStorage {
    handle_id: Uuid,
    inner: Arc<FileInner>,
}

impl FileStorage {
    /// Open storage backed by the JSON document at `path`.
    ///
    /// A missing file starts empty. An unparseable file is treated as
    /// empty too and will be replaced wholesale by the next write.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let state = match read_document(&path)? {
            DocumentRead::Document(doc) => doc,
            DocumentRead::Missing => BTreeMap::new(),
            DocumentRead::Unparseable(err) => {
                tracing::warn!("storage file {} is unreadable, starting empty: {err}", path.display());
                BTreeMap::new()
            }
        };
        Ok(Self {
            handle_id: Uuid::new_v4(),
            inner: Arc::new(FileInner {
                path,
                state: Mutex::new(state),
                bus: EventBus::new(),
            }),
        })
    }

    /// A second handle onto the same underlying file and state.
    #[must_use]
    pub fn another_handle(&self) -> Self {
        Self {
            handle_id: Uuid::new_v4(),
            inner: Arc::clone(&self.inner),
        }
    }

    /// Re-read the file and emit events for keys other processes have
    /// changed since the last look. Events from a poll are delivered
    /// to every local subscriber; the writer was external.
    ///
    /// A document that fails to parse is skipped without updating
    /// state. That covers catching another process mid-write; the next
    /// poll sees the finished file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn poll_external(&self) -> Result<(), StorageError> {
        let disk = match read_document(&self.inner.path)? {
            DocumentRead::Document(doc) => doc,
            DocumentRead::Missing => BTreeMap::new(),
            DocumentRead::Unparseable(err) => {
                tracing::debug!("skipping unparseable storage document: {err}");
                return Ok(());
            }
        };

        let events = {
            let mut state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
            let events = diff_documents(&state, &disk);
            *state = disk;
            events
        };
        for event in &events {
            self.inner.bus.broadcast(None, event);
        }
        Ok(())
    }

    /// Spawn a thread that calls [`Self::poll_external`] forever at
    /// `interval`. Poll failures are logged and polling continues.
    pub fn spawn_watcher(&self, interval: Duration) -> std::thread::JoinHandle<()> {
        let handle = self.another_handle();
        std::thread::spawn(move || {
            loop {
                std::thread::sleep(interval);
                if let Err(err) = handle.poll_external() {
                    tracing::warn!("storage watcher poll failed: {err}");
                }
            }
        })
    }

    fn commit(&self, next: BTreeMap<String, String>, event: StorageEvent) -> Result<(), StorageError> {
        {
            let mut state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
            write_document(&self.inner.path, &next)?;
            *state = next;
        }
        self.inner.bus.broadcast(Some(self.handle_id), &event);
        Ok(())
    }
}

impl SharedStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
        Ok(state.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let (next, old_value) = {
            let state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.get(key).map(String::as_str) == Some(value) {
                return Ok(());
            }
            let mut next = state.clone();
            let old_value = next.insert(key.to_string(), value.to_string());
            (next, old_value)
        };
        self.commit(
            next,
            StorageEvent {
                key: key.to_string(),
                old_value,
                new_value: Some(value.to_string()),
            },
        )
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let (next, old_value) = {
            let state = self.inner.state.lock().unwrap_or_else(|e| e.into_inner());
            if !state.contains_key(key) {
                return Ok(());
            }
            let mut next = state.clone();
            let old_value = next.remove(key);
            (next, old_value)
        };
        self.commit(
            next,
            StorageEvent {
                key: key.to_string(),
                old_value,
                new_value: None,
            },
        )
    }

    fn subscribe(&self) -> mpsc::Receiver<StorageEvent> {
        self.inner.bus.subscribe(self.handle_id)
    }
}

// =============================================================================
// Document IO
// =============================================================================

enum DocumentRead {
    Document(BTreeMap<String, String>),
    Missing,
    Unparseable(serde_json::Error),
}

fn read_document(path: &Path) -> Result<DocumentRead, StorageError> {
    if !path.exists() {
        return Ok(DocumentRead::Missing);
    }
    let raw = std::fs::read_to_string(path)?;
    match serde_json::from_str(&raw) {
        Ok(doc) => Ok(DocumentRead::Document(doc)),
        Err(err) => Ok(DocumentRead::Unparseable(err)),
    }
}

fn write_document(path: &Path, doc: &BTreeMap<String, String>) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, raw)?;
    Ok(())
}

/// Events that turn `before` into `after`, in key order.
fn diff_documents(
    before: &BTreeMap<String, String>,
    after: &BTreeMap<String, String>,
) -> Vec<StorageEvent> {
    let mut events = Vec::new();
    for (key, old_value) in before {
        if after.get(key) != Some(old_value) {
            events.push(StorageEvent {
                key: key.clone(),
                old_value: Some(old_value.clone()),
                new_value: after.get(key).cloned(),
            });
        }
    }
    for (key, new_value) in after {
        if !before.contains_key(key) {
            events.push(StorageEvent {
                key: key.clone(),
                old_value: None,
                new_value: Some(new_value.clone()),
            });
        }
    }
    events
}
