//! # Derived Views
//!
//! The [`Note`] view joins each [`RawNote`] to the tags it references. It is
//! a pure function of the two collections and is never persisted.
//!
//! Resolved tags follow the order of the tag collection, not the order of
//! `tagIds`. Ids with no matching tag (for example after the tag was
//! deleted) are dropped silently.

use crate::model::{Note, RawNote, Tag};

/// Join notes to their tags.
pub fn build_notes_with_tags(notes: &[RawNote], tags: &[Tag]) -> Vec<Note> {
    notes
        .iter()
        .map(|note| Note {
            id: note.id.clone(),
            title: note.title.clone(),
            markdown: note.markdown.clone(),
            tags: tags
                .iter()
                .filter(|tag| note.tag_ids.contains(&tag.id))
                .cloned()
                .collect(),
        })
        .collect()
}

/// The list view query: a title substring and a set of required tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub title: String,
    pub tags: Vec<Tag>,
}

impl NoteFilter {
    pub fn new(title: impl Into<String>, tags: Vec<Tag>) -> Self {
        Self {
            title: title.into(),
            tags,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.tags.is_empty()
    }

    /// Title contains the query (case-insensitive) and every filter tag is on the note.
    pub fn matches(&self, note: &Note) -> bool {
        let title_ok = self.title.is_empty()
            || note
                .title
                .to_lowercase()
                .contains(&self.title.to_lowercase());
        let tags_ok = self.tags.iter().all(|tag| note.has_tag(&tag.id));
        title_ok && tags_ok
    }
}

pub fn filter_notes(notes: &[Note], title_query: &str, tag_filter: &[Tag]) -> Vec<Note> {
    let filter = NoteFilter::new(title_query, tag_filter.to_vec());
    notes
        .iter()
        .filter(|note| filter.matches(note))
        .cloned()
        .collect()
}

/// Memoizes [`build_notes_with_tags`] on the revisions of its two inputs.
#[derive(Debug, Default)]
pub struct ViewCache {
    cached: Option<((u64, u64), Vec<Note>)>,
}

impl ViewCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the joined view, recomputing only when a revision changed.
    pub fn notes_with_tags(
        &mut self,
        notes: &[RawNote],
        notes_revision: u64,
        tags: &[Tag],
        tags_revision: u64,
    ) -> &[Note] {
        let key = (notes_revision, tags_revision);
        let stale = !matches!(&self.cached, Some((k, _)) if *k == key);
        if stale {
            tracing::debug!(notes_revision, tags_revision, "recomputing note view");
            self.cached = Some((key, build_notes_with_tags(notes, tags)));
        }
        match &self.cached {
            Some((_, view)) => view,
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(id: &str, label: &str) -> Tag {
        Tag {
            id: id.into(),
            label: label.into(),
        }
    }

    fn raw(id: &str, title: &str, tag_ids: &[&str]) -> RawNote {
        RawNote {
            id: id.into(),
            title: title.into(),
            markdown: String::new(),
            tag_ids: tag_ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn titles(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn resolves_tags_in_tag_collection_order() {
        let tags = vec![tag("a", "A"), tag("b", "B"), tag("c", "C")];
        let notes = vec![raw("1", "One", &["c", "a"])];

        let view = build_notes_with_tags(&notes, &tags);
        let ids: Vec<&str> = view[0].tags.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn drops_dangling_tag_ids() {
        let tags = vec![tag("a", "A")];
        let notes = vec![raw("1", "One", &["a", "gone"])];

        let view = build_notes_with_tags(&notes, &tags);
        assert_eq!(view[0].tags, vec![tag("a", "A")]);
    }

    #[test]
    fn build_does_not_touch_inputs() {
        let tags = vec![tag("a", "A")];
        let notes = vec![raw("1", "One", &["a", "gone"])];
        let _ = build_notes_with_tags(&notes, &tags);
        assert_eq!(notes[0].tag_ids, vec!["a", "gone"]);
    }

    fn sample() -> (Tag, Tag, Vec<Note>) {
        let a = tag("a", "A");
        let b = tag("b", "B");
        let notes = build_notes_with_tags(
            &[
                raw("1", "Groceries", &["a"]),
                raw("2", "Grocery List", &["b"]),
                raw("3", "Todo", &["a", "b"]),
            ],
            &[a.clone(), b.clone()],
        );
        (a, b, notes)
    }

    #[test]
    fn title_filter_is_case_insensitive_substring() {
        let (_, _, notes) = sample();
        let result = filter_notes(&notes, "grocer", &[]);
        assert_eq!(titles(&result), vec!["Groceries", "Grocery List"]);
    }

    #[test]
    fn single_tag_filter() {
        let (a, _, notes) = sample();
        let result = filter_notes(&notes, "", &[a]);
        assert_eq!(titles(&result), vec!["Groceries", "Todo"]);
    }

    #[test]
    fn tag_filter_requires_every_tag() {
        let (a, b, notes) = sample();
        let result = filter_notes(&notes, "", &[a, b]);
        assert_eq!(titles(&result), vec!["Todo"]);
    }

    #[test]
    fn title_and_tags_are_conjunctive() {
        let (_, b, notes) = sample();
        let result = filter_notes(&notes, "GROC", &[b]);
        assert_eq!(titles(&result), vec!["Grocery List"]);
    }

    #[test]
    fn tag_filter_matches_by_id_not_label() {
        let (_, _, notes) = sample();
        let impostor = tag("zzz", "A");
        assert!(filter_notes(&notes, "", &[impostor]).is_empty());
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let (_, _, notes) = sample();
        assert_eq!(filter_notes(&notes, "", &[]).len(), 3);
        assert!(NoteFilter::default().is_empty());
    }

    #[test]
    fn cache_recomputes_on_revision_change() {
        let mut cache = ViewCache::new();
        let tags = vec![tag("a", "A")];
        let notes = vec![raw("1", "One", &["a"])];

        assert_eq!(cache.notes_with_tags(&notes, 0, &tags, 0).len(), 1);

        // Same revisions: the cached value is returned even if inputs differ.
        assert_eq!(cache.notes_with_tags(&[], 0, &tags, 0).len(), 1);

        // Bumped revision: recomputed.
        assert!(cache.notes_with_tags(&[], 1, &tags, 0).is_empty());

        let renamed = vec![tag("a", "Renamed")];
        let view = cache.notes_with_tags(&notes, 2, &renamed, 1);
        assert_eq!(view, build_notes_with_tags(&notes, &renamed).as_slice());
    }
}
