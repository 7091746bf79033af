use crate::error::{NotesError, Result};

/// Abstract interface for the durable string-keyed, string-valued medium.
///
/// This trait handles the "how" of storage (filesystem vs memory), while
/// [`crate::persisted::Persisted`] handles the "what" (decode, fallback,
/// write-back). All methods take `&self`; implementations needing mutation
/// use interior mutability since marknotes is single-threaded.
pub trait StorageBackend {
    /// Read the string stored under `key`.
    /// Returns Ok(None) if nothing is stored there.
    /// Returns Err only when the medium itself cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    /// MUST be atomic so a failed write leaves the previous value intact.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// All keys currently holding a value, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Keys double as file names on disk, so they are restricted to a safe alphabet.
pub fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(NotesError::Api(format!("Invalid storage key: '{}'", key)))
    }
}

/// Fails with [`NotesError::StorageQuotaExceeded`] when writing `value_len`
/// bytes under `key` would push total usage past `limit`.
///
/// `used_by_others` is the byte count of every other key. A `limit` of zero
/// means unlimited.
pub fn ensure_within_quota(key: &str, value_len: u64, used_by_others: u64, limit: u64) -> Result<()> {
    if limit == 0 {
        return Ok(());
    }
    let needed = used_by_others + value_len;
    if needed > limit {
        return Err(NotesError::StorageQuotaExceeded {
            key: key.to_string(),
            needed,
            limit,
        });
    }
    Ok(())
}
