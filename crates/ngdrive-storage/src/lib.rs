//! NG-Drive Storage Library
//!
//! This crate provides the object-storage collaborator contract and its
//! implementations. The namespace is flat: objects are keyed by name, with
//! no directory nesting. Name validation is centralized in the `keys`
//! module so all backends stay consistent.

pub mod factory;
pub(crate) mod keys;
pub mod local;
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_store;
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use traits::{
    ListOptions, ObjectStore, SortBy, SortColumn, SortOrder, StorageError, StorageResult,
    UploadOptions,
};
