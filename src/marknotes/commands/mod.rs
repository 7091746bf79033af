//! # Command Layer
//!
//! Business logic for every operation, one module per command. Commands take
//! a [`NoteStore`](crate::store::NoteStore) (or an already computed note view)
//! and plain Rust arguments, and return a [`CmdResult`]. They never print.
//!
//! Mutating commands go through `NoteStore::update_notes` /
//! `NoteStore::update_tags`, so every change is written back to storage as
//! part of the command.

use crate::config::NotesConfig;
use crate::model::{Note, Tag};

pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod list;
pub mod tags;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_notes: Vec<Note>,
    pub listed_notes: Vec<Note>,
    pub affected_tags: Vec<Tag>,
    pub listed_tags: Vec<Tag>,
    pub config: Option<NotesConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_notes(mut self, notes: Vec<Note>) -> Self {
        self.listed_notes = notes;
        self
    }

    pub fn with_listed_tags(mut self, tags: Vec<Tag>) -> Self {
        self.listed_tags = tags;
        self
    }

    pub fn with_config(mut self, config: NotesConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
