//! Core data types.
//!
//! Two collections are persisted: [`RawNote`]s and [`Tag`]s. Notes reference
//! tags by id only; the resolved [`Note`] form is computed at view time by
//! [`crate::view`] and never stored.
//!
//! Field names serialize as `id`, `title`, `markdown`, `tagIds` and `label`,
//! so a data directory can be filled from a browser-local-storage dump of the
//! `NOTES` and `TAGS` keys without conversion.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage key holding the JSON array of [`RawNote`]s.
pub const NOTES_KEY: &str = "NOTES";

/// Storage key holding the JSON array of [`Tag`]s.
pub const TAGS_KEY: &str = "TAGS";

/// Generates a fresh random identifier (UUID v4, hyphenated).
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub label: String,
}

impl Tag {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            label: label.into(),
        }
    }
}

/// A note as it is persisted: tags are referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNote {
    pub id: String,
    pub title: String,
    pub markdown: String,
    pub tag_ids: Vec<String>,
}

impl RawNote {
    /// Builds a new note with a fresh id from form data.
    pub fn from_data(data: &NoteData) -> Self {
        Self {
            id: new_id(),
            title: data.title.clone(),
            markdown: data.markdown.clone(),
            tag_ids: data.tag_ids(),
        }
    }

    /// Replaces every field but the id with the given form data.
    pub fn apply(&mut self, data: &NoteData) {
        self.title = data.title.clone();
        self.markdown = data.markdown.clone();
        self.tag_ids = data.tag_ids();
    }
}

/// A note as it is displayed: tag ids resolved against the tag collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub id: String,
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

impl Note {
    pub fn has_tag(&self, id: &str) -> bool {
        self.tags.iter().any(|t| t.id == id)
    }
}

/// Payload of the create and edit forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteData {
    pub title: String,
    pub markdown: String,
    pub tags: Vec<Tag>,
}

impl NoteData {
    pub fn new(title: impl Into<String>, markdown: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            markdown: markdown.into(),
            tags,
        }
    }

    pub fn tag_ids(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_note_uses_browser_field_names() {
        let note = RawNote {
            id: "n1".into(),
            title: "Plan".into(),
            markdown: "# Plan".into(),
            tag_ids: vec!["t1".into()],
        };
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["tagIds"][0], "t1");
        assert!(json.get("tag_ids").is_none());
    }

    #[test]
    fn parses_local_storage_dump() {
        let raw = r#"[{"id":"a","title":"T","markdown":"body","tagIds":["x","y"]}]"#;
        let notes: Vec<RawNote> = serde_json::from_str(raw).unwrap();
        assert_eq!(notes[0].tag_ids, vec!["x", "y"]);
    }

    #[test]
    fn apply_preserves_id() {
        let tag = Tag::new("work");
        let mut note = RawNote::from_data(&NoteData::new("Old", "old", vec![]));
        let id = note.id.clone();

        note.apply(&NoteData::new("New", "new", vec![tag.clone()]));
        assert_eq!(note.id, id);
        assert_eq!(note.title, "New");
        assert_eq!(note.tag_ids, vec![tag.id]);
    }

    #[test]
    fn generated_ids_are_unique() {
        assert_ne!(Tag::new("a").id, Tag::new("a").id);
    }
}
