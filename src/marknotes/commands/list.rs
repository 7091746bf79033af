use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Note;
use crate::view::NoteFilter;

pub fn run(notes: &[Note], filter: &NoteFilter) -> Result<CmdResult> {
    let listed: Vec<Note> = notes.iter().filter(|n| filter.matches(n)).cloned().collect();

    let mut result = CmdResult::default();
    if listed.is_empty() {
        let message = if notes.is_empty() {
            "No notes yet."
        } else {
            "No notes match the filter."
        };
        result.add_message(CmdMessage::info(message));
    }
    Ok(result.with_listed_notes(listed))
}
