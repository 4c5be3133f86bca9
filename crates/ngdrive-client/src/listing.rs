//! Object listing cache
//!
//! Holds the most recently fetched snapshot of the user's stored objects.
//! `refresh` replaces the snapshot wholesale; a failed refresh leaves the
//! previous snapshot untouched and surfaces the collaborator's error. There
//! is no push notification from storage, so staleness between refreshes is
//! accepted.

use ngdrive_core::{filter, AppError, Category, StoredObject};
use ngdrive_storage::{ListOptions, ObjectStore};
use std::sync::{Arc, RwLock};

pub struct ListingCache {
    store: Arc<dyn ObjectStore>,
    prefix: String,
    options: ListOptions,
    snapshot: RwLock<Vec<StoredObject>>,
}

impl ListingCache {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::with_options(store, String::new(), ListOptions::default())
    }

    pub fn with_options(store: Arc<dyn ObjectStore>, prefix: String, options: ListOptions) -> Self {
        ListingCache {
            store,
            prefix,
            options,
            snapshot: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the full object list and replace the snapshot atomically.
    ///
    /// On failure the cache keeps serving the previous snapshot; the error
    /// is propagated for the caller to report, never retried here.
    pub async fn refresh(&self) -> Result<Vec<StoredObject>, AppError> {
        let objects = self
            .store
            .list(&self.prefix, &self.options)
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Listing refresh failed, keeping previous snapshot");
                AppError::from(e)
            })?;

        let mut snapshot = self.snapshot.write().unwrap();
        *snapshot = objects.clone();
        tracing::debug!(count = objects.len(), "Listing snapshot replaced");

        Ok(objects)
    }

    /// Present snapshot; possibly empty, possibly stale after a failed refresh.
    pub fn current(&self) -> Vec<StoredObject> {
        self.snapshot.read().unwrap().clone()
    }

    /// Visible subset of the snapshot for a category tab and search term.
    pub fn visible(&self, category: Category, query: &str) -> Vec<StoredObject> {
        filter::visible(&self.snapshot.read().unwrap(), category, query)
    }

    /// Optimistically drop an object from the snapshot after a successful
    /// delete, without waiting for a refresh round-trip.
    pub fn remove_local(&self, name: &str) {
        self.snapshot.write().unwrap().retain(|o| o.name != name);
    }

    /// Drop the snapshot entirely (sign-out clears per-session state).
    pub fn clear(&self) {
        self.snapshot.write().unwrap().clear();
    }
}
