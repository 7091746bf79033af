use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{NoteStore, StorageBackend};
use crate::view::build_notes_with_tags;

use super::create::short_id;
use super::helpers::absorb_write_failure;

/// Remove the note with `id`. Deleting an absent note is a no-op.
pub fn run<B: StorageBackend>(store: &mut NoteStore<B>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let removed: Vec<_> = store
        .notes()
        .iter()
        .filter(|n| n.id == id)
        .cloned()
        .collect();
    if removed.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No note with id {}, nothing deleted",
            id
        )));
        return Ok(result);
    }

    let outcome = store.update_notes(|prev| prev.iter().filter(|n| n.id != id).cloned().collect());
    absorb_write_failure(outcome, &mut result)?;

    for note in &removed {
        result.add_message(CmdMessage::success(format!(
            "Note deleted ({}): {}",
            short_id(&note.id),
            note.title
        )));
    }
    result.affected_notes = build_notes_with_tags(&removed, store.tags());
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::create;
    use crate::model::NoteData;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn removes_matching_note() {
        let mut store = NoteStore::open(MemBackend::new()).unwrap();
        create::run(&mut store, NoteData::new("A", "", vec![])).unwrap();
        create::run(&mut store, NoteData::new("B", "", vec![])).unwrap();
        let id = store.notes()[0].id.clone();

        let result = run(&mut store, &id).unwrap();
        assert_eq!(result.affected_notes[0].title, "A");
        assert_eq!(store.notes().len(), 1);
        assert_eq!(store.notes()[0].title, "B");
    }

    #[test]
    fn deleting_twice_is_idempotent() {
        let mut store = NoteStore::open(MemBackend::new()).unwrap();
        create::run(&mut store, NoteData::new("A", "", vec![])).unwrap();
        create::run(&mut store, NoteData::new("B", "", vec![])).unwrap();
        let id = store.notes()[0].id.clone();

        run(&mut store, &id).unwrap();
        let once = store.notes().to_vec();
        let result = run(&mut store, &id).unwrap();

        assert_eq!(store.notes(), once.as_slice());
        assert!(result.affected_notes.is_empty());
    }
}
