//! Shared object name validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject object names that could escape the bucket or address a "directory".
///
/// All backends call this before touching the store so that a name accepted
/// by one backend is accepted by every other.
pub fn validate_object_name(object_name: &str) -> StorageResult<()> {
    if object_name.is_empty() {
        return Err(StorageError::InvalidKey(
            "Object name cannot be empty".to_string(),
        ));
    }

    if object_name.contains("..") || object_name.starts_with('/') || object_name.contains('\\')
    {
        return Err(StorageError::InvalidKey(format!(
            "Object name contains invalid characters: {}",
            object_name
        )));
    }

    if object_name.ends_with('/') {
        return Err(StorageError::InvalidKey(format!(
            "Object name cannot end with '/': {}",
            object_name
        )));
    }

    Ok(())
}
