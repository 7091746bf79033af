use crate::commands::CmdResult;
use crate::error::{NotesError, Result};
use crate::model::Note;

/// Find one note in the view by its full id.
pub fn run(notes: &[Note], id: &str) -> Result<CmdResult> {
    let note = notes
        .iter()
        .find(|n| n.id == id)
        .cloned()
        .ok_or_else(|| NotesError::NoteNotFound(id.to_string()))?;
    Ok(CmdResult::default().with_listed_notes(vec![note]))
}
