//! Configuration module
//!
//! Environment-driven configuration for the storage backend, data paths,
//! listing and history limits, and the external document viewer.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_VIEWER_BASE_URL, HISTORY_CAPACITY, LIST_LIMIT,
};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(StorageBackend::Local),
            "memory" => Ok(StorageBackend::Memory),
            _ => Err(anyhow::anyhow!("Invalid storage backend: {}", s)),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    /// Root directory for all durable state (object files, history, auth).
    pub data_dir: PathBuf,
    /// Directory object files are stored under (local backend).
    pub local_storage_path: PathBuf,
    /// Base URL public object URLs are built from.
    pub public_base_url: String,
    pub list_limit: usize,
    pub history_capacity: usize,
    /// File the view history key-value record lives in.
    pub history_path: PathBuf,
    /// File the local auth provider persists users and the session to.
    pub auth_state_path: PathBuf,
    /// Base URL of the external document viewer.
    pub viewer_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        let data_dir = PathBuf::from(
            env::var("NGDRIVE_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string()),
        );

        let storage_backend = match env::var("NGDRIVE_STORAGE_BACKEND") {
            Ok(value) => value.parse()?,
            Err(_) => StorageBackend::Local,
        };

        let local_storage_path = env::var("NGDRIVE_LOCAL_STORAGE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("files"));

        let public_base_url = env::var("NGDRIVE_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/files".to_string());

        let list_limit = parse_env("NGDRIVE_LIST_LIMIT", LIST_LIMIT)?;
        let history_capacity = parse_env("NGDRIVE_HISTORY_CAPACITY", HISTORY_CAPACITY)?;

        let history_path = env::var("NGDRIVE_HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("history.json"));

        let auth_state_path = env::var("NGDRIVE_AUTH_STATE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("auth.json"));

        let viewer_base_url = env::var("NGDRIVE_VIEWER_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_VIEWER_BASE_URL.to_string());

        Ok(Config {
            storage_backend,
            data_dir,
            local_storage_path,
            public_base_url,
            list_limit,
            history_capacity,
            history_path,
            auth_state_path,
            viewer_base_url,
        })
    }
}

fn parse_env(key: &str, default: usize) -> Result<usize, anyhow::Error> {
    match env::var(key) {
        Ok(value) => value
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_backend_from_str() {
        assert_eq!(
            StorageBackend::from_str("local").unwrap(),
            StorageBackend::Local
        );
        assert_eq!(
            StorageBackend::from_str("Memory").unwrap(),
            StorageBackend::Memory
        );
        assert!(StorageBackend::from_str("s3").is_err());
    }
}
