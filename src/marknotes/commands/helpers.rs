use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::{RawNote, Tag};

/// Resolve a user-supplied id (full or unambiguous prefix) among `ids`.
///
/// An exact match always wins over prefix matches.
fn resolve_id<'a, I>(ids: I, input: &str) -> std::result::Result<String, Option<NotesError>>
where
    I: IntoIterator<Item = &'a str>,
{
    let input = input.trim();
    if input.is_empty() {
        return Err(None);
    }

    let mut matches = Vec::new();
    for id in ids {
        if id == input {
            return Ok(id.to_string());
        }
        if id.starts_with(input) {
            matches.push(id);
        }
    }

    match matches.as_slice() {
        [only] => Ok(only.to_string()),
        [] => Err(None),
        _ => Err(Some(NotesError::AmbiguousId(input.to_string()))),
    }
}

pub fn resolve_note_id(notes: &[RawNote], input: &str) -> Result<String> {
    resolve_id(notes.iter().map(|n| n.id.as_str()), input)
        .map_err(|e| e.unwrap_or_else(|| NotesError::NoteNotFound(input.to_string())))
}

pub fn resolve_tag_id(tags: &[Tag], input: &str) -> Result<String> {
    resolve_id(tags.iter().map(|t| t.id.as_str()), input)
        .map_err(|e| e.unwrap_or_else(|| NotesError::TagNotFound(input.to_string())))
}

/// Notes need a title with something other than whitespace in it.
pub fn ensure_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(NotesError::Api("Title cannot be empty".into()));
    }
    Ok(())
}

/// Labels compare trimmed and case-insensitively.
pub fn same_label(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub fn find_tag_by_label<'a>(tags: &'a [Tag], label: &str) -> Option<&'a Tag> {
    tags.iter().find(|t| same_label(&t.label, label))
}

/// Look up existing tags by label, failing on the first unknown one.
pub fn tags_by_labels<S: AsRef<str>>(tags: &[Tag], labels: &[S]) -> Result<Vec<Tag>> {
    labels
        .iter()
        .map(|label| {
            find_tag_by_label(tags, label.as_ref())
                .cloned()
                .ok_or_else(|| NotesError::TagNotFound(label.as_ref().to_string()))
        })
        .collect()
}

/// Storage write failures do not undo an operation: the change stays in
/// memory and the failure is reported as a warning on the result.
pub fn absorb_write_failure(outcome: Result<()>, result: &mut CmdResult) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.is_storage_failure() => {
            tracing::warn!(error = %e, "change kept in memory but not saved");
            result.add_message(CmdMessage::warning(format!(
                "Change kept for this session but not saved: {}",
                e
            )));
            Ok(())
        }
        Err(e) => Err(e),
    }
}
