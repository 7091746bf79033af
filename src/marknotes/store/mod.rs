//! # Storage Layer
//!
//! Storage is split in two:
//!
//! - [`backend::StorageBackend`]: a durable string-keyed, string-valued
//!   medium. It knows nothing about notes.
//! - [`note_store::NoteStore`]: the `NOTES` and `TAGS` collections, each a
//!   [`crate::persisted::Persisted`] value mirrored into the backend.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production storage, one JSON file per key
//!   written atomically (tmp file + rename), with an optional byte quota.
//! - [`mem_backend::MemBackend`]: in-memory storage for testing, with write
//!   error and quota simulation.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── config.json         # NotesConfig
//! └── storage/
//!     ├── NOTES.json      # JSON array of RawNote
//!     └── TAGS.json       # JSON array of Tag
//! ```

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod note_store;

pub use backend::StorageBackend;
pub use note_store::NoteStore;
