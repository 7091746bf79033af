use super::backend::StorageBackend;
use crate::error::{NotesError, Result};
use crate::model::{NOTES_KEY, RawNote, TAGS_KEY, Tag};
use crate::persisted::Persisted;

/// The two persisted collections over one backend.
///
/// Each collection is owned by its own [`Persisted`] and only changes
/// through [`NoteStore::update_notes`] / [`NoteStore::update_tags`], which
/// write the affected key back immediately.
pub struct NoteStore<B: StorageBackend> {
    backend: B,
    notes: Persisted<Vec<RawNote>>,
    tags: Persisted<Vec<Tag>>,
}

impl<B: StorageBackend> NoteStore<B> {
    /// Load both collections, each defaulting to empty.
    pub fn open(backend: B) -> Result<Self> {
        let notes = Persisted::load_with(&backend, NOTES_KEY, Vec::new)?;
        let tags = Persisted::load_with(&backend, TAGS_KEY, Vec::new)?;
        Ok(Self {
            backend,
            notes,
            tags,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn notes(&self) -> &[RawNote] {
        self.notes.get()
    }

    pub fn tags(&self) -> &[Tag] {
        self.tags.get()
    }

    pub fn notes_revision(&self) -> u64 {
        self.notes.revision()
    }

    pub fn tags_revision(&self) -> u64 {
        self.tags.revision()
    }

    pub fn update_notes<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&Vec<RawNote>) -> Vec<RawNote>,
    {
        self.notes.update(&self.backend, f)
    }

    pub fn update_tags<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&Vec<Tag>) -> Vec<Tag>,
    {
        self.tags.update(&self.backend, f)
    }

    /// Decode problems hit while loading, drained on first call.
    pub fn take_load_warnings(&mut self) -> Vec<NotesError> {
        [self.notes.take_load_warning(), self.tags.take_load_warning()]
            .into_iter()
            .flatten()
            .collect()
    }
}
