//! Key-value persistence seam for small durable records.
//!
//! The view history is persisted through this trait so its logic is
//! testable without a real storage backend. Values are raw JSON strings
//! keyed by name, matching origin-scoped browser storage semantics:
//! synchronous, last-writer-wins across concurrent writers.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Synchronous keyed storage of raw JSON strings.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;
    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    inner: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.inner.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        self.inner
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store: one JSON object per file, keys as fields.
///
/// Writes go through a temp file and rename so a crashed write never leaves
/// a half-written record. A map file that fails to parse is treated as empty
/// on write; reads surface the parse error and leave recovery to the caller.
#[derive(Debug)]
pub struct FileKvStore {
    path: PathBuf,
    // Serializes read-modify-write cycles between threads of this process.
    lock: Mutex<()>,
}

impl FileKvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileKvStore {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    fn read_map(&self) -> Result<HashMap<String, String>, KvError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(KvError::Io(e)),
        }
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let _guard = self.lock.lock().unwrap();
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let _guard = self.lock.lock().unwrap();

        let mut map = self.read_map().unwrap_or_else(|_| {
            tracing::debug!(path = %self.path.display(), "Unreadable kv file, rewriting");
            HashMap::new()
        });
        map.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string(&map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}
