use super::backend::{StorageBackend, ensure_within_quota, validate_key};
use crate::error::{NotesError, Result};
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since marknotes is single-threaded.
/// This avoids the overhead of `RwLock` while still allowing the
/// `StorageBackend` trait to use `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<BTreeMap<String, String>>,
    quota_bytes: Cell<u64>,
    simulate_write_error: Cell<bool>,
    writes: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, bypassing quota and error simulation.
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Limit total stored bytes. Zero means unlimited.
    pub fn with_quota(self, bytes: u64) -> Self {
        self.quota_bytes.set(bytes);
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Raw stored string, for assertions.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        validate_key(key)?;
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        validate_key(key)?;
        if self.simulate_write_error.get() {
            return Err(NotesError::StorageUnavailable(
                "Simulated write error".to_string(),
            ));
        }

        let used_by_others: u64 = self
            .items
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len() as u64)
            .sum();
        ensure_within_quota(key, value.len() as u64, used_by_others, self.quota_bytes.get())?;

        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.items.borrow().keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_and_set() {
        let backend = MemBackend::new();
        assert_eq!(backend.get_item("NOTES").unwrap(), None);

        backend.set_item("NOTES", "[]").unwrap();
        assert_eq!(backend.get_item("NOTES").unwrap(), Some("[]".to_string()));
        assert_eq!(backend.keys().unwrap(), vec!["NOTES"]);

        backend.set_item("NOTES", "[1]").unwrap();
        assert_eq!(backend.raw("NOTES").as_deref(), Some("[1]"));
    }

    #[test]
    fn simulated_write_error_keeps_previous_value() {
        let backend = MemBackend::new().with_item("TAGS", "[]");
        backend.set_simulate_write_error(true);

        let err = backend.set_item("TAGS", "[1]").unwrap_err();
        assert!(err.is_storage_failure());
        assert_eq!(backend.raw("TAGS").as_deref(), Some("[]"));
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn quota_replacing_a_key_only_counts_the_new_value() {
        let backend = MemBackend::new().with_quota(10);
        backend.set_item("A", "12345").unwrap();
        backend.set_item("A", "1234567890").unwrap();

        let err = backend.set_item("B", "x").unwrap_err();
        assert!(matches!(err, NotesError::StorageQuotaExceeded { .. }));
    }
}
