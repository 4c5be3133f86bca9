//! Storage abstraction trait
//!
//! This module defines the `ObjectStore` trait that all storage backends
//! must implement, mirroring the contract the front end needs from a
//! managed object-storage provider: list, upload, download, public URL
//! resolution, and removal over a flat named-object namespace.

use async_trait::async_trait;
use ngdrive_core::{AppError, StoredObject};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Listing failed: {0}")]
    ListFailed(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Object not found: {0}")]
    NotFound(String),

    #[error("Invalid object name: {0}")]
    InvalidName(String),

    #[error("Storage backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) => AppError::NotFound(name),
            StorageError::InvalidName(msg) => AppError::InvalidInput(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Listing sort column. Only names are sortable in a flat namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortColumn {
    #[default]
    Name,
}

/// Listing sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Sort column and order for a listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortBy {
    pub column: SortColumn,
    pub order: SortOrder,
}

/// Options for a listing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: usize,
    pub offset: usize,
    pub sort: SortBy,
}

impl Default for ListOptions {
    fn default() -> Self {
        ListOptions {
            limit: ngdrive_core::constants::LIST_LIMIT,
            offset: ngdrive_core::constants::LIST_OFFSET,
            sort: SortBy::default(),
        }
    }
}

/// Options for an upload request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadOptions {
    pub content_type: String,
    /// Cache-control hint, in seconds, forwarded to the backend.
    pub cache_control: Option<String>,
    /// When true, uploading over an existing name replaces the object.
    pub upsert: bool,
}

impl Default for UploadOptions {
    fn default() -> Self {
        UploadOptions {
            content_type: "application/octet-stream".to_string(),
            cache_control: None,
            upsert: false,
        }
    }
}

/// Object storage abstraction
///
/// All backends operate on a flat namespace keyed by object name. Errors are
/// surfaced to the caller as-is; no backend retries internally.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// List objects whose names start with `prefix`, ordered and paged per `opts`.
    async fn list(&self, prefix: &str, opts: &ListOptions) -> StorageResult<Vec<StoredObject>>;

    /// Upload an object. With `opts.upsert` unset, an existing name fails
    /// with `AlreadyExists`; with it set, the object is replaced.
    async fn upload(&self, name: &str, data: Vec<u8>, opts: &UploadOptions) -> StorageResult<()>;

    /// Download an object's bytes.
    async fn download(&self, name: &str) -> StorageResult<Vec<u8>>;

    /// Stable publicly resolvable URL for an object name.
    ///
    /// URL construction does not verify existence; a URL for a missing
    /// object simply fails to resolve downstream.
    fn public_url(&self, name: &str) -> StorageResult<String>;

    /// Remove the named objects.
    async fn remove(&self, names: &[String]) -> StorageResult<()>;
}
