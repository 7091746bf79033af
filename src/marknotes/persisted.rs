//! # Persisted Values
//!
//! [`Persisted<T>`] mirrors one in-memory value into a [`StorageBackend`] key.
//!
//! - **Load**: read the key once. Absent means "use the initial value";
//!   present means JSON-decode it. Text that does not decode is treated like
//!   an absent key: the initial value is used and the decode error is kept as
//!   a recoverable warning (see [`Persisted::take_load_warning`]).
//! - **Read**: [`Persisted::get`] is a plain borrow, no I/O.
//! - **Write**: [`Persisted::set`] and [`Persisted::update`] replace the value
//!   in memory first, then write the serialized value back. Every write goes
//!   to the backend; nothing is batched. When the write fails the error is
//!   returned, but the in-memory value stays replaced: memory is the source
//!   of truth for the rest of the session.
//!
//! Each replacement bumps [`Persisted::revision`], which lets derived views
//! detect change without comparing contents.

use crate::error::{NotesError, Result};
use crate::store::backend::StorageBackend;
use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug)]
pub struct Persisted<T> {
    key: String,
    value: T,
    revision: u64,
    load_warning: Option<NotesError>,
}

impl<T> Persisted<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Load `key`, falling back to `initial` when nothing usable is stored.
    pub fn load<B: StorageBackend>(backend: &B, key: &str, initial: T) -> Result<Self> {
        Self::load_with(backend, key, || initial)
    }

    /// Like [`Persisted::load`], but the default is only built when needed.
    pub fn load_with<B, F>(backend: &B, key: &str, initial: F) -> Result<Self>
    where
        B: StorageBackend,
        F: FnOnce() -> T,
    {
        let stored = backend.get_item(key)?;

        let (value, load_warning) = match stored {
            None => {
                tracing::debug!(key, "no stored value, using initial value");
                (initial(), None)
            }
            Some(text) => match serde_json::from_str(&text) {
                Ok(value) => {
                    tracing::debug!(key, bytes = text.len(), "loaded stored value");
                    (value, None)
                }
                Err(source) => {
                    tracing::warn!(key, error = %source, "stored value is malformed, using initial value");
                    let warning = NotesError::MalformedData {
                        key: key.to_string(),
                        source,
                    };
                    (initial(), Some(warning))
                }
            },
        };

        Ok(Self {
            key: key.to_string(),
            value,
            revision: 0,
            load_warning,
        })
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Bumped every time the in-memory value is replaced.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The decode error hit during load, if any. Returns it only once.
    pub fn take_load_warning(&mut self) -> Option<NotesError> {
        self.load_warning.take()
    }

    /// Replace the value and write it back.
    pub fn set<B: StorageBackend>(&mut self, backend: &B, value: T) -> Result<()> {
        self.value = value;
        self.revision += 1;
        self.write_back(backend)
    }

    /// Replace the value with a function of the previous one and write it back.
    pub fn update<B, F>(&mut self, backend: &B, f: F) -> Result<()>
    where
        B: StorageBackend,
        F: FnOnce(&T) -> T,
    {
        let next = f(&self.value);
        self.set(backend, next)
    }

    /// Write the current value without changing it.
    pub fn write_back<B: StorageBackend>(&self, backend: &B) -> Result<()> {
        let text = serde_json::to_string(&self.value)?;
        backend.set_item(&self.key, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawNote, Tag};
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn absent_key_uses_initial_value() {
        let backend = MemBackend::new();
        let p: Persisted<Vec<Tag>> = Persisted::load(&backend, "TAGS", Vec::new()).unwrap();
        assert!(p.get().is_empty());
        assert_eq!(p.revision(), 0);
    }

    #[test]
    fn producer_only_runs_when_key_is_absent() {
        let backend = MemBackend::new().with_item("TAGS", r#"[{"id":"t","label":"x"}]"#);
        let p: Persisted<Vec<Tag>> = Persisted::load_with(&backend, "TAGS", || {
            panic!("producer must not run when a value is stored")
        })
        .unwrap();
        assert_eq!(p.get()[0].label, "x");
    }

    #[test]
    fn loading_does_not_write() {
        let backend = MemBackend::new();
        let _p: Persisted<Vec<Tag>> = Persisted::load(&backend, "TAGS", Vec::new()).unwrap();
        assert_eq!(backend.write_count(), 0);
    }

    #[test]
    fn malformed_text_falls_back_with_warning() {
        let backend = MemBackend::new().with_item("NOTES", "{not json");
        let mut p: Persisted<Vec<RawNote>> =
            Persisted::load(&backend, "NOTES", Vec::new()).unwrap();

        assert!(p.get().is_empty());
        let warning = p.take_load_warning().unwrap();
        assert!(matches!(warning, NotesError::MalformedData { ref key, .. } if key == "NOTES"));
        assert!(p.take_load_warning().is_none());
    }

    #[test]
    fn wrong_shape_counts_as_malformed() {
        let backend = MemBackend::new().with_item("TAGS", r#"{"id":"t"}"#);
        let mut p: Persisted<Vec<Tag>> = Persisted::load(&backend, "TAGS", Vec::new()).unwrap();
        assert!(p.take_load_warning().is_some());
    }

    #[test]
    fn set_writes_back_every_time() {
        let backend = MemBackend::new();
        let mut p: Persisted<Vec<Tag>> = Persisted::load(&backend, "TAGS", Vec::new()).unwrap();

        p.set(&backend, vec![Tag::new("a")]).unwrap();
        p.set(&backend, p.get().clone()).unwrap();

        assert_eq!(backend.write_count(), 2);
        assert_eq!(p.revision(), 2);
        let stored: Vec<Tag> = serde_json::from_str(&backend.raw("TAGS").unwrap()).unwrap();
        assert_eq!(&stored, p.get());
    }

    #[test]
    fn update_sees_previous_value() {
        let backend = MemBackend::new();
        let mut p: Persisted<Vec<u32>> = Persisted::load(&backend, "NUMS", vec![1]).unwrap();

        p.update(&backend, |prev| prev.iter().map(|n| n + 1).collect())
            .unwrap();
        p.update(&backend, |prev| {
            let mut next = prev.clone();
            next.push(10);
            next
        })
        .unwrap();

        assert_eq!(p.get(), &vec![2, 10]);
    }

    #[test]
    fn failed_write_keeps_memory_value() {
        let backend = MemBackend::new();
        let mut p: Persisted<Vec<u32>> = Persisted::load(&backend, "NUMS", vec![]).unwrap();
        backend.set_simulate_write_error(true);

        let err = p.set(&backend, vec![7]).unwrap_err();
        assert!(err.is_storage_failure());
        assert_eq!(p.get(), &vec![7]);
        assert_eq!(backend.raw("NUMS"), None);
    }

    #[test]
    fn reload_round_trips() {
        let backend = MemBackend::new();
        let mut p: Persisted<Vec<RawNote>> =
            Persisted::load(&backend, "NOTES", Vec::new()).unwrap();
        let notes = vec![
            RawNote {
                id: "1".into(),
                title: "A".into(),
                markdown: "*a*".into(),
                tag_ids: vec!["x".into(), "y".into()],
            },
            RawNote {
                id: "2".into(),
                title: "B".into(),
                markdown: String::new(),
                tag_ids: vec![],
            },
        ];
        p.set(&backend, notes.clone()).unwrap();

        let reloaded: Persisted<Vec<RawNote>> =
            Persisted::load(&backend, "NOTES", Vec::new()).unwrap();
        assert_eq!(reloaded.get(), &notes);
    }
}
