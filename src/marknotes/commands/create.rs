use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{NoteData, RawNote};
use crate::store::{NoteStore, StorageBackend};
use crate::view::build_notes_with_tags;

use super::helpers::{absorb_write_failure, ensure_title};

/// Append a new note built from `data`, with a fresh id.
pub fn run<B: StorageBackend>(store: &mut NoteStore<B>, data: NoteData) -> Result<CmdResult> {
    ensure_title(&data.title)?;

    let note = RawNote::from_data(&data);
    let mut result = CmdResult::default();

    let new_note = note.clone();
    let outcome = store.update_notes(move |prev| {
        let mut next = prev.clone();
        next.push(new_note);
        next
    });
    absorb_write_failure(outcome, &mut result)?;

    tracing::debug!(id = %note.id, "created note");
    result.add_message(CmdMessage::success(format!(
        "Note created ({}): {}",
        short_id(&note.id),
        note.title
    )));
    result.affected_notes = build_notes_with_tags(&[note], store.tags());
    Ok(result)
}

/// The first eight characters of an id, enough to address it in practice.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
