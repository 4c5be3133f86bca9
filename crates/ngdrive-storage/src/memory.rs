use crate::keys::validate_object_name;
use crate::traits::{
    ListOptions, ObjectStore, SortOrder, StorageError, StorageResult, UploadOptions,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ngdrive_core::StoredObject;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct StoredRecord {
    data: Vec<u8>,
    content_type: String,
    cache_control: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// In-memory storage implementation
///
/// Keeps objects in a map behind a mutex. Used for tests and ephemeral
/// setups; the `set_offline` switch makes collaborator failure paths
/// reachable without a real outage.
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, StoredRecord>>,
    base_url: String,
    offline: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_base_url("https://files.example.com".to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        MemoryStore {
            objects: Mutex::new(BTreeMap::new()),
            base_url,
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate a storage outage: while offline, every operation fails.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Seed an object directly (for test setup).
    pub fn insert_object(&self, name: &str, data: Vec<u8>) {
        let now = Utc::now();
        self.objects.lock().unwrap().insert(
            name.to_string(),
            StoredRecord {
                data,
                content_type: "application/octet-stream".to_string(),
                cache_control: None,
                created_at: now,
                updated_at: now,
            },
        );
    }

    /// Stored bytes for an object (for test assertions).
    pub fn object(&self, name: &str) -> Option<Vec<u8>> {
        self.objects.lock().unwrap().get(name).map(|r| r.data.clone())
    }

    /// Stored cache-control hint for an object (for test assertions).
    pub fn cache_control(&self, name: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .and_then(|r| r.cache_control.clone())
    }

    /// Stored content type for an object (for test assertions).
    pub fn content_type(&self, name: &str) -> Option<String> {
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .map(|r| r.content_type.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.objects.lock().unwrap().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_online(&self) -> StorageResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(StorageError::Backend(
                "storage unreachable (offline)".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn list(&self, prefix: &str, opts: &ListOptions) -> StorageResult<Vec<StoredObject>> {
        self.check_online()?;

        let objects = self.objects.lock().unwrap();
        let mut listed: Vec<StoredObject> = objects
            .iter()
            .filter(|(name, _)| name.starts_with(prefix))
            .map(|(name, record)| StoredObject {
                name: name.clone(),
                size: Some(record.data.len() as i64),
                created_at: Some(record.created_at),
                updated_at: Some(record.updated_at),
            })
            .collect();

        // BTreeMap iteration is already ascending by name.
        if opts.sort.order == SortOrder::Desc {
            listed.reverse();
        }

        Ok(listed
            .into_iter()
            .skip(opts.offset)
            .take(opts.limit)
            .collect())
    }

    async fn upload(&self, name: &str, data: Vec<u8>, opts: &UploadOptions) -> StorageResult<()> {
        self.check_online()?;
        validate_object_name(name)?;

        let mut objects = self.objects.lock().unwrap();
        let now = Utc::now();

        match objects.get_mut(name) {
            Some(existing) => {
                if !opts.upsert {
                    return Err(StorageError::AlreadyExists(name.to_string()));
                }
                existing.data = data;
                existing.content_type = opts.content_type.clone();
                existing.cache_control = opts.cache_control.clone();
                existing.updated_at = now;
            }
            None => {
                objects.insert(
                    name.to_string(),
                    StoredRecord {
                        data,
                        content_type: opts.content_type.clone(),
                        cache_control: opts.cache_control.clone(),
                        created_at: now,
                        updated_at: now,
                    },
                );
            }
        }

        Ok(())
    }

    async fn download(&self, name: &str) -> StorageResult<Vec<u8>> {
        self.check_online()?;
        self.objects
            .lock()
            .unwrap()
            .get(name)
            .map(|r| r.data.clone())
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn public_url(&self, name: &str) -> StorageResult<String> {
        self.check_online()?;
        validate_object_name(name)?;
        Ok(format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(name)
        ))
    }

    async fn remove(&self, names: &[String]) -> StorageResult<()> {
        self.check_online()?;

        let mut objects = self.objects.lock().unwrap();
        for name in names {
            objects
                .remove(name)
                .ok_or_else(|| StorageError::NotFound(name.clone()))?;
        }
        Ok(())
    }
}
