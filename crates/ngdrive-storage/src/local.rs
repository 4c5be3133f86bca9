use crate::keys::validate_object_name;
use crate::traits::{
    ListOptions, ObjectStore, SortOrder, StorageError, StorageResult, UploadOptions,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ngdrive_core::StoredObject;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Objects live as plain files directly under `base_path`; public URLs are
/// built from `base_url`. Useful for development and self-hosted setups.
#[derive(Clone)]
pub struct LocalStore {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStore {
    /// Create a new LocalStore instance
    ///
    /// # Arguments
    /// * `base_path` - Directory object files are stored in (e.g., "./ngdrive-data/files")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/files")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::Config(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStore {
            base_path,
            base_url,
        })
    }

    /// Convert a validated object name to its filesystem path.
    ///
    /// Validation rejects separators and dot components, so the result can
    /// never escape `base_path`.
    fn name_to_path(&self, name: &str) -> StorageResult<PathBuf> {
        validate_object_name(name)?;
        Ok(self.base_path.join(name))
    }

    /// Generate the public URL for an object name.
    fn generate_url(&self, name: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(name)
        )
    }

    async fn read_entry(&self, path: &Path, name: String) -> StorageResult<StoredObject> {
        let meta = fs::metadata(path).await?;
        let modified: Option<DateTime<Utc>> = meta.modified().ok().map(DateTime::<Utc>::from);
        let created: Option<DateTime<Utc>> = meta.created().ok().map(DateTime::<Utc>::from);

        Ok(StoredObject {
            name,
            size: Some(meta.len() as i64),
            created_at: created,
            updated_at: modified,
        })
    }
}

#[async_trait]
impl ObjectStore for LocalStore {
    async fn list(&self, prefix: &str, opts: &ListOptions) -> StorageResult<Vec<StoredObject>> {
        let start = std::time::Instant::now();

        let mut dir = fs::read_dir(&self.base_path).await.map_err(|e| {
            StorageError::ListFailed(format!(
                "Failed to read storage directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let mut objects = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| StorageError::ListFailed(e.to_string()))?
        {
            if !entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(String::from) else {
                continue;
            };
            if !name.starts_with(prefix) {
                continue;
            }
            objects.push(self.read_entry(&entry.path(), name).await?);
        }

        match opts.sort.order {
            SortOrder::Asc => objects.sort_by(|a, b| a.name.cmp(&b.name)),
            SortOrder::Desc => objects.sort_by(|a, b| b.name.cmp(&a.name)),
        }

        let page: Vec<StoredObject> = objects
            .into_iter()
            .skip(opts.offset)
            .take(opts.limit)
            .collect();

        tracing::debug!(
            prefix = %prefix,
            count = page.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage listing"
        );

        Ok(page)
    }

    async fn upload(&self, name: &str, data: Vec<u8>, opts: &UploadOptions) -> StorageResult<()> {
        let path = self.name_to_path(name)?;
        let size = data.len();

        if !opts.upsert && fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::AlreadyExists(name.to_string()));
        }

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            name = %name,
            size_bytes = size,
            upsert = opts.upsert,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(())
    }

    async fn download(&self, name: &str) -> StorageResult<Vec<u8>> {
        let path = self.name_to_path(name)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(name.to_string()));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            name = %name,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    fn public_url(&self, name: &str) -> StorageResult<String> {
        validate_object_name(name)?;
        Ok(self.generate_url(name))
    }

    async fn remove(&self, names: &[String]) -> StorageResult<()> {
        for name in names {
            let path = self.name_to_path(name)?;

            if !fs::try_exists(&path).await.unwrap_or(false) {
                return Err(StorageError::NotFound(name.clone()));
            }

            fs::remove_file(&path).await.map_err(|e| {
                StorageError::DeleteFailed(format!(
                    "Failed to remove file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            tracing::info!(name = %name, "Local storage object removed");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> (tempfile::TempDir, LocalStore) {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let store = LocalStore::new(dir.path(), "http://localhost:3000/files".to_string())
            .await
            .unwrap();
        (dir, store)
    }

    fn upsert() -> UploadOptions {
        UploadOptions {
            upsert: true,
            ..UploadOptions::default()
        }
    }

    #[tokio::test]
    async fn test_upload_then_download_round_trip() {
        let (_dir, store) = test_store().await;

        store
            .upload("notes.txt", b"hello".to_vec(), &upsert())
            .await
            .unwrap();

        let data = store.download("notes.txt").await.unwrap();
        assert_eq!(data, b"hello");
    }

    #[tokio::test]
    async fn test_upload_without_upsert_rejects_existing_name() {
        let (_dir, store) = test_store().await;

        store
            .upload("a.pdf", b"one".to_vec(), &upsert())
            .await
            .unwrap();

        let err = store
            .upload("a.pdf", b"two".to_vec(), &UploadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::AlreadyExists(_)));

        // The stored bytes are unchanged after the rejected upload.
        assert_eq!(store.download("a.pdf").await.unwrap(), b"one");
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_object() {
        let (_dir, store) = test_store().await;

        store
            .upload("a.pdf", b"one".to_vec(), &upsert())
            .await
            .unwrap();
        store
            .upload("a.pdf", b"two".to_vec(), &upsert())
            .await
            .unwrap();

        assert_eq!(store.download("a.pdf").await.unwrap(), b"two");

        let listed = store.list("", &ListOptions::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
    }

    #[tokio::test]
    async fn test_list_sorts_by_name_and_pages() {
        let (_dir, store) = test_store().await;

        for name in ["c.txt", "a.txt", "b.txt", "d.txt"] {
            store
                .upload(name, b"x".to_vec(), &upsert())
                .await
                .unwrap();
        }

        let all = store.list("", &ListOptions::default()).await.unwrap();
        let names: Vec<&str> = all.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "c.txt", "d.txt"]);

        let page = store
            .list(
                "",
                &ListOptions {
                    limit: 2,
                    offset: 1,
                    ..ListOptions::default()
                },
            )
            .await
            .unwrap();
        let names: Vec<&str> = page.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["b.txt", "c.txt"]);
    }

    #[tokio::test]
    async fn test_list_filters_by_prefix() {
        let (_dir, store) = test_store().await;

        for name in ["report-q1.pdf", "report-q2.pdf", "notes.txt"] {
            store
                .upload(name, b"x".to_vec(), &upsert())
                .await
                .unwrap();
        }

        let reports = store.list("report-", &ListOptions::default()).await.unwrap();
        assert_eq!(reports.len(), 2);
    }

    #[tokio::test]
    async fn test_download_missing_object_is_not_found() {
        let (_dir, store) = test_store().await;
        let err = store.download("ghost.pdf").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_deletes_object() {
        let (_dir, store) = test_store().await;

        store
            .upload("old.zip", b"x".to_vec(), &upsert())
            .await
            .unwrap();
        store.remove(&["old.zip".to_string()]).await.unwrap();

        assert!(store.list("", &ListOptions::default()).await.unwrap().is_empty());
        let err = store.remove(&["old.zip".to_string()]).await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_public_url_encodes_name() {
        let (_dir, store) = test_store().await;
        let url = store.public_url("my report.pdf").unwrap();
        assert_eq!(url, "http://localhost:3000/files/my%20report.pdf");
    }

    #[tokio::test]
    async fn test_path_separators_rejected() {
        let (_dir, store) = test_store().await;
        let err = store
            .upload("../escape.txt", b"x".to_vec(), &upsert())
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
    }
}
