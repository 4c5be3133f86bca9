//! Shared object-name validation for storage backends.
//!
//! The namespace is flat: names must not be empty, contain path separators,
//! or be a dot component. All backends must validate through here.

use crate::traits::{StorageError, StorageResult};

/// Validate an object name for a flat namespace.
pub fn validate_object_name(name: &str) -> StorageResult<()> {
    if name.is_empty() {
        return Err(StorageError::InvalidName(
            "Object name must not be empty".to_string(),
        ));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(StorageError::InvalidName(format!(
            "Object name must not contain path separators: {}",
            name
        )));
    }
    if name == "." || name == ".." {
        return Err(StorageError::InvalidName(format!(
            "Object name must not be a dot component: {}",
            name
        )));
    }
    Ok(())
}
