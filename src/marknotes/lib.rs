//! # Marknotes Architecture
//!
//! Marknotes is a **UI-agnostic note library**: notes written in Markdown,
//! labelled with tags, kept in a local key-value store. The bundled CLI is
//! one client; a browser or TUI front end would drive the same API.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, cli/)                               │
//! │  - Parses arguments, renders output, runs the editor        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Owns the NoteStore and the memoized note view            │
//! │  - Normalizes inputs (id prefixes, tag labels)              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs) and views (view.rs, routes.rs)    │
//! │  - Pure business logic over Rust types                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence (persisted.rs, store/)                         │
//! │  - Persisted<T>: in-memory value mirrored into one key      │
//! │  - StorageBackend: FsBackend (production), MemBackend (test)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data
//!
//! Two keys are stored: `NOTES` (JSON array of [`model::RawNote`]) and
//! `TAGS` (JSON array of [`model::Tag`]). Notes reference tags by id. The
//! [`model::Note`] view with resolved tags is derived on demand by
//! [`view::build_notes_with_tags`] and never stored, so deleting a tag simply
//! makes it disappear from the notes that referenced it.
//!
//! ## Errors
//!
//! Every fallible call returns [`error::Result`]. Malformed stored data is
//! recovered from at load time (see [`persisted`]); storage write failures
//! leave the change in memory and come back as warnings on the command
//! result.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic for each operation
//! - [`persisted`]: the load-or-default, write-on-change value adapter
//! - [`store`]: storage backends and the two-collection `NoteStore`
//! - [`view`]: note/tag join, filtering and memoization
//! - [`routes`]: navigable locations and redirect rules
//! - [`model`]: `Tag`, `RawNote`, `Note`, `NoteData`
//! - [`markdown`]: HTML and plain-text rendering of note bodies
//! - [`editor`]: external editor integration for the note form
//! - [`config`]: configuration management
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod markdown;
pub mod model;
pub mod persisted;
pub mod routes;
pub mod store;
pub mod view;
