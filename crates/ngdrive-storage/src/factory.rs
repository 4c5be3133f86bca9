use crate::{LocalStore, MemoryStore, ObjectStore, StorageResult};
use ngdrive_core::{Config, StorageBackend};
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_store(config: &Config) -> StorageResult<Arc<dyn ObjectStore>> {
    match config.storage_backend {
        StorageBackend::Local => {
            let store = LocalStore::new(
                config.local_storage_path.clone(),
                config.public_base_url.clone(),
            )
            .await?;
            Ok(Arc::new(store))
        }
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::with_base_url(
            config.public_base_url.clone(),
        ))),
    }
}
