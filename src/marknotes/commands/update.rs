use crate::commands::{CmdMessage, CmdResult};
use crate::error::{NotesError, Result};
use crate::model::NoteData;
use crate::store::{NoteStore, StorageBackend};
use crate::view::build_notes_with_tags;

use super::create::short_id;
use super::helpers::{absorb_write_failure, ensure_title};

/// Replace title, body and tags of the note with `id`, keeping the id.
///
/// An unknown id is reported as [`NotesError::NoteNotFound`]; the collection
/// is not touched and nothing is written.
pub fn run<B: StorageBackend>(
    store: &mut NoteStore<B>,
    id: &str,
    data: NoteData,
) -> Result<CmdResult> {
    if !store.notes().iter().any(|n| n.id == id) {
        return Err(NotesError::NoteNotFound(id.to_string()));
    }
    ensure_title(&data.title)?;

    let mut result = CmdResult::default();
    let outcome = store.update_notes(|prev| {
        prev.iter()
            .map(|note| {
                let mut note = note.clone();
                if note.id == id {
                    note.apply(&data);
                }
                note
            })
            .collect()
    });
    absorb_write_failure(outcome, &mut result)?;

    let updated: Vec<_> = store
        .notes()
        .iter()
        .filter(|n| n.id == id)
        .cloned()
        .collect();
    result.affected_notes = build_notes_with_tags(&updated, store.tags());
    result.add_message(CmdMessage::success(format!(
        "Note updated ({}): {}",
        short_id(id),
        data.title
    )));
    Ok(result)
}
