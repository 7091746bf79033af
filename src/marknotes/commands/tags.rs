//! Tag management commands.
//!
//! - `list_tags`: the tag collection as stored
//! - `create_tag`: append a tag with a fresh id
//! - `update_tag`: change a tag's label
//! - `delete_tag`: remove a tag; notes keep their (now dangling) ids
//! - `resolve_labels`: map form labels to tags, creating missing ones
//!
//! Tags are referenced from notes by id only, so renaming never touches
//! notes and deleting leaves dangling ids that the view drops.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::Tag;
use crate::store::{NoteStore, StorageBackend};

use super::helpers::{absorb_write_failure, find_tag_by_label};

fn clean_label(label: &str) -> Result<String> {
    let label = label.trim();
    if label.is_empty() {
        return Err(NotesError::Api("Tag label cannot be empty".into()));
    }
    Ok(label.to_string())
}

pub fn list_tags<B: StorageBackend>(store: &NoteStore<B>) -> Result<CmdResult> {
    let tags = store.tags().to_vec();
    let mut result = CmdResult::default();

    if tags.is_empty() {
        result.add_message(CmdMessage::info("No tags defined"));
    }

    Ok(result.with_listed_tags(tags))
}

/// Append a new tag. Labels are not required to be unique.
pub fn create_tag<B: StorageBackend>(store: &mut NoteStore<B>, label: &str) -> Result<CmdResult> {
    let tag = Tag::new(clean_label(label)?);
    let mut result = CmdResult::default();

    let new_tag = tag.clone();
    let outcome = store.update_tags(move |prev| {
        let mut next = prev.clone();
        next.push(new_tag);
        next
    });
    absorb_write_failure(outcome, &mut result)?;

    result.add_message(CmdMessage::success(format!("Created tag '{}'", tag.label)));
    result.affected_tags.push(tag);
    Ok(result)
}

/// Change the label of the tag with `id`.
///
/// An unknown id is reported as [`NotesError::TagNotFound`] and nothing is
/// written.
pub fn update_tag<B: StorageBackend>(
    store: &mut NoteStore<B>,
    id: &str,
    label: &str,
) -> Result<CmdResult> {
    let label = clean_label(label)?;
    let old = store
        .tags()
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .ok_or_else(|| NotesError::TagNotFound(id.to_string()))?;

    let mut result = CmdResult::default();
    let outcome = store.update_tags(|prev| {
        prev.iter()
            .map(|tag| {
                if tag.id == id {
                    Tag {
                        id: tag.id.clone(),
                        label: label.clone(),
                    }
                } else {
                    tag.clone()
                }
            })
            .collect()
    });
    absorb_write_failure(outcome, &mut result)?;

    result.add_message(CmdMessage::success(format!(
        "Renamed tag '{}' to '{}'",
        old.label, label
    )));
    result.affected_tags.push(Tag { id: old.id, label });
    Ok(result)
}

/// Remove the tag with `id`. Absent ids are a no-op.
///
/// Notes referencing the tag are left as they are.
pub fn delete_tag<B: StorageBackend>(store: &mut NoteStore<B>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let Some(tag) = store.tags().iter().find(|t| t.id == id).cloned() else {
        result.add_message(CmdMessage::info(format!(
            "No tag with id {}, nothing deleted",
            id
        )));
        return Ok(result);
    };

    let outcome = store.update_tags(|prev| prev.iter().filter(|t| t.id != id).cloned().collect());
    absorb_write_failure(outcome, &mut result)?;

    result.add_message(CmdMessage::success(format!("Deleted tag '{}'", tag.label)));
    result.affected_tags.push(tag);
    Ok(result)
}

/// Map labels to tags, creating a tag for each label not seen before.
///
/// Matching is trimmed and case-insensitive. Repeated labels resolve to the
/// same tag. Creation messages are appended to `result`.
pub fn resolve_labels<B, S>(
    store: &mut NoteStore<B>,
    labels: &[S],
    result: &mut CmdResult,
) -> Result<Vec<Tag>>
where
    B: StorageBackend,
    S: AsRef<str>,
{
    let labels = labels
        .iter()
        .map(|label| clean_label(label.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    let mut resolved: Vec<Tag> = Vec::new();
    for label in labels {
        let existing = find_tag_by_label(store.tags(), &label).cloned();
        let tag = match existing {
            Some(existing) => existing,
            None => {
                let created = create_tag(store, &label)?;
                result.messages.extend(created.messages);
                created
                    .affected_tags
                    .into_iter()
                    .next()
                    .ok_or_else(|| NotesError::Api(format!("Could not create tag '{}'", label)))?
            }
        };
        if !resolved.iter().any(|t| t.id == tag.id) {
            resolved.push(tag);
        }
    }
    Ok(resolved)
}
