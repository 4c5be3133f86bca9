//! NG-Drive Core Library
//!
//! This crate provides the domain models, filtering logic, error types,
//! configuration, and constants shared across all NG-Drive components.

pub mod config;
pub mod constants;
pub mod error;
pub mod filter;
pub mod models;

// Re-export commonly used types
pub use config::{Config, StorageBackend};
pub use error::AppError;
pub use filter::visible;
pub use models::{Category, FileKind, HistoryEntry, StoredObject, UploadCandidate};
