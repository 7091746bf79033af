//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer and the single
//! entry point for UI clients.
//!
//! It:
//! - **Owns** the [`NoteStore`] and the memoized note view ([`ViewCache`])
//! - **Normalizes inputs** (id prefixes → full ids, labels → tags)
//! - **Dispatches** to `commands::*`
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business rules of its own.
//!
//! `NotesApi<B: StorageBackend>` is generic over the backend:
//! `NotesApi<FsBackend>` in production, `NotesApi<MemBackend>` in tests.

use crate::commands;
use crate::error::{NotesError, Result};
use crate::model::{Note, NoteData, Tag};
use crate::routes::Route;
use crate::store::{NoteStore, StorageBackend};
use crate::view::{NoteFilter, ViewCache};
use std::path::{Path, PathBuf};

pub struct NotesApi<B: StorageBackend> {
    store: NoteStore<B>,
    view: ViewCache,
    data_dir: PathBuf,
}

impl<B: StorageBackend> NotesApi<B> {
    pub fn new(store: NoteStore<B>, data_dir: PathBuf) -> Self {
        Self {
            store,
            view: ViewCache::new(),
            data_dir,
        }
    }

    /// Load both collections from `backend`.
    pub fn open(backend: B, data_dir: PathBuf) -> Result<Self> {
        Ok(Self::new(NoteStore::open(backend)?, data_dir))
    }

    pub fn store(&self) -> &NoteStore<B> {
        &self.store
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Messages for data that could not be decoded at load time.
    pub fn load_warnings(&mut self) -> Vec<commands::CmdMessage> {
        self.store
            .take_load_warnings()
            .into_iter()
            .map(|e| commands::CmdMessage::warning(format!("{}; starting from empty", e)))
            .collect()
    }

    /// The current note view, recomputed only when notes or tags changed.
    pub fn notes(&mut self) -> &[Note] {
        self.view.notes_with_tags(
            self.store.notes(),
            self.store.notes_revision(),
            self.store.tags(),
            self.store.tags_revision(),
        )
    }

    pub fn tags(&self) -> &[Tag] {
        self.store.tags()
    }

    pub fn resolve_note_id(&self, input: &str) -> Result<String> {
        commands::helpers::resolve_note_id(self.store.notes(), input)
    }

    pub fn resolve_tag_id(&self, input: &str) -> Result<String> {
        commands::helpers::resolve_tag_id(self.store.tags(), input)
    }

    /// Existing tags for the given labels; unknown labels are an error.
    pub fn tags_by_labels<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<Tag>> {
        commands::helpers::tags_by_labels(self.store.tags(), labels)
    }

    pub fn list_notes(&mut self, filter: &NoteFilter) -> Result<commands::CmdResult> {
        let notes = self.notes();
        commands::list::run(notes, filter)
    }

    /// List notes, selecting filter tags by label.
    pub fn search_notes<S: AsRef<str>>(
        &mut self,
        title: &str,
        tag_labels: &[S],
    ) -> Result<commands::CmdResult> {
        let tags = self.tags_by_labels(tag_labels)?;
        self.list_notes(&NoteFilter::new(title, tags))
    }

    pub fn view_note(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_note_id(id)?;
        commands::view::run(self.notes(), &id)
    }

    pub fn create_note(&mut self, data: NoteData) -> Result<commands::CmdResult> {
        commands::create::run(&mut self.store, data)
    }

    /// Create a note from labels, creating tags that do not exist yet.
    pub fn create_note_with_labels<S: AsRef<str>>(
        &mut self,
        title: &str,
        markdown: &str,
        labels: &[S],
    ) -> Result<commands::CmdResult> {
        commands::helpers::ensure_title(title)?;
        let mut result = commands::CmdResult::default();
        let tags = commands::tags::resolve_labels(&mut self.store, labels, &mut result)?;
        let created = commands::create::run(&mut self.store, NoteData::new(title, markdown, tags))?;
        Ok(merge(result, created))
    }

    pub fn update_note(&mut self, id: &str, data: NoteData) -> Result<commands::CmdResult> {
        let id = self.resolve_note_id(id)?;
        commands::update::run(&mut self.store, &id, data)
    }

    /// Update a note from labels, creating tags that do not exist yet.
    pub fn update_note_with_labels<S: AsRef<str>>(
        &mut self,
        id: &str,
        title: &str,
        markdown: &str,
        labels: &[S],
    ) -> Result<commands::CmdResult> {
        let id = self.resolve_note_id(id)?;
        commands::helpers::ensure_title(title)?;
        let mut result = commands::CmdResult::default();
        let tags = commands::tags::resolve_labels(&mut self.store, labels, &mut result)?;
        let updated =
            commands::update::run(&mut self.store, &id, NoteData::new(title, markdown, tags))?;
        Ok(merge(result, updated))
    }

    /// Unknown ids fall through to the command, which treats them as a no-op.
    pub fn delete_note(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = match self.resolve_note_id(id) {
            Ok(full) => full,
            Err(NotesError::NoteNotFound(_)) => id.to_string(),
            Err(e) => return Err(e),
        };
        commands::delete::run(&mut self.store, &id)
    }

    pub fn list_tags(&self) -> Result<commands::CmdResult> {
        commands::tags::list_tags(&self.store)
    }

    pub fn create_tag(&mut self, label: &str) -> Result<commands::CmdResult> {
        commands::tags::create_tag(&mut self.store, label)
    }

    pub fn update_tag(&mut self, id: &str, label: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_tag_id(id)?;
        commands::tags::update_tag(&mut self.store, &id, label)
    }

    pub fn delete_tag(&mut self, id: &str) -> Result<commands::CmdResult> {
        let id = match self.resolve_tag_id(id) {
            Ok(full) => full,
            Err(NotesError::TagNotFound(_)) => id.to_string(),
            Err(e) => return Err(e),
        };
        commands::tags::delete_tag(&mut self.store, &id)
    }

    /// Parse `path` and resolve it against the current notes.
    ///
    /// Id segments may be prefixes; they are expanded to full ids before
    /// the redirect check. Ambiguous prefixes are an error.
    pub fn route(&mut self, path: &str) -> Result<Route> {
        let route = match Route::parse(path) {
            Route::Note(id) => match self.resolve_note_id(&id) {
                Ok(full) => Route::Note(full),
                Err(NotesError::NoteNotFound(_)) => Route::Note(id),
                Err(e) => return Err(e),
            },
            Route::Edit(id) => match self.resolve_note_id(&id) {
                Ok(full) => Route::Edit(full),
                Err(NotesError::NoteNotFound(_)) => Route::Edit(id),
                Err(e) => return Err(e),
            },
            other => other,
        };
        Ok(route.resolve(self.notes()))
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

fn merge(mut first: commands::CmdResult, second: commands::CmdResult) -> commands::CmdResult {
    first.messages.extend(second.messages);
    first.affected_notes.extend(second.affected_notes);
    first.affected_tags.extend(second.affected_tags);
    first.listed_notes.extend(second.listed_notes);
    first
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NOTES_KEY, TAGS_KEY};
    use crate::store::mem_backend::MemBackend;

    fn api() -> NotesApi<MemBackend> {
        NotesApi::open(MemBackend::new(), PathBuf::from("/nonexistent")).unwrap()
    }

    #[test]
    fn create_with_labels_creates_missing_tags() {
        let mut api = api();
        let result = api
            .create_note_with_labels("Plan", "body", &["work", "ideas"])
            .unwrap();

        assert_eq!(api.tags().len(), 2);
        assert_eq!(result.affected_notes[0].tags.len(), 2);
        assert!(result.messages.iter().any(|m| m.content.contains("'ideas'")));
    }

    #[test]
    fn view_follows_mutations() {
        let mut api = api();
        api.create_note_with_labels("Plan", "", &["work"]).unwrap();
        assert_eq!(api.notes()[0].tags.len(), 1);

        let tag_id = api.tags()[0].id.clone();
        api.delete_tag(&tag_id).unwrap();
        assert!(api.notes()[0].tags.is_empty());
        assert_eq!(api.notes()[0].title, "Plan");
    }

    #[test]
    fn cached_view_equals_fresh_build() {
        let mut api = api();
        api.create_note_with_labels("A", "", &["x", "y"]).unwrap();
        api.create_note_with_labels("B", "", &["y"]).unwrap();
        let y = api.tags()[1].id.clone();
        api.update_tag(&y, "why").unwrap();

        let fresh = crate::view::build_notes_with_tags(api.store().notes(), api.store().tags());
        assert_eq!(api.notes(), fresh.as_slice());
    }

    #[test]
    fn search_selects_tags_by_label() {
        let mut api = api();
        api.create_note_with_labels("Groceries", "", &["a"]).unwrap();
        api.create_note_with_labels("Grocery List", "", &["b"]).unwrap();
        api.create_note_with_labels("Todo", "", &["a", "b"]).unwrap();

        let both = api.search_notes("", &["A", "b"]).unwrap();
        assert_eq!(both.listed_notes.len(), 1);
        assert_eq!(both.listed_notes[0].title, "Todo");

        let by_title = api.search_notes::<&str>("grocer", &[]).unwrap();
        assert_eq!(by_title.listed_notes.len(), 2);

        assert!(api.search_notes("", &["missing"]).is_err());
    }

    #[test]
    fn operations_accept_id_prefixes() {
        let mut api = api();
        api.create_note_with_labels::<&str>("Only", "", &[]).unwrap();
        let id = api.store().notes()[0].id.clone();

        let viewed = api.view_note(&id[..6]).unwrap();
        assert_eq!(viewed.listed_notes[0].id, id);

        api.delete_note(&id[..6]).unwrap();
        assert!(api.store().notes().is_empty());
    }

    #[test]
    fn update_unknown_note_is_not_found() {
        let mut api = api();
        let err = api
            .update_note("missing", NoteData::new("X", "", vec![]))
            .unwrap_err();
        assert!(matches!(err, NotesError::NoteNotFound(_)));
        assert!(api.store().backend().raw(NOTES_KEY).is_none());
    }

    #[test]
    fn routes_resolve_against_notes() {
        let mut api = api();
        api.create_note_with_labels::<&str>("Only", "", &[]).unwrap();
        let id = api.store().notes()[0].id.clone();

        assert_eq!(api.route("/").unwrap(), Route::List);
        assert_eq!(api.route("/new").unwrap(), Route::New);
        assert_eq!(api.route(&format!("/{}", id)).unwrap(), Route::Note(id.clone()));
        assert_eq!(
            api.route(&format!("/{}/edit", &id[..8])).unwrap(),
            Route::Edit(id.clone())
        );
        assert_eq!(api.route("/nope").unwrap(), Route::List);
        assert_eq!(api.route("/x/y/z").unwrap(), Route::List);
    }

    #[test]
    fn load_warnings_surface_malformed_data() {
        let backend = MemBackend::new()
            .with_item(NOTES_KEY, "[{broken")
            .with_item(TAGS_KEY, "[]");
        let mut api = NotesApi::open(backend, PathBuf::from("/nonexistent")).unwrap();

        let warnings = api.load_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].content.contains("NOTES"));
        assert!(api.notes().is_empty());
    }

    #[test]
    fn deleting_twice_is_a_no_op() {
        let mut api = api();
        api.create_note_with_labels("Once", "", &["t"]).unwrap();
        let note_id = api.store().notes()[0].id.clone();
        let tag_id = api.tags()[0].id.clone();

        api.delete_note(&note_id).unwrap();
        let again = api.delete_note(&note_id).unwrap();
        assert!(again.affected_notes.is_empty());
        assert_eq!(again.messages[0].level, MessageLevel::Info);

        api.delete_tag(&tag_id).unwrap();
        let again = api.delete_tag(&tag_id).unwrap();
        assert!(again.affected_tags.is_empty());
        assert_eq!(again.messages[0].level, MessageLevel::Info);
    }

    #[test]
    fn deleting_by_ambiguous_prefix_is_an_error() {
        let backend = MemBackend::new().with_item(
            NOTES_KEY,
            r#"[{"id":"abc1","title":"A","markdown":"","tagIds":[]},
                {"id":"abc2","title":"B","markdown":"","tagIds":[]}]"#,
        );
        let mut api = NotesApi::open(backend, PathBuf::from("/nonexistent")).unwrap();

        let err = api.delete_note("abc").unwrap_err();
        assert!(matches!(err, NotesError::AmbiguousId(_)));
        assert_eq!(api.store().notes().len(), 2);
    }

    #[test]
    fn blank_title_creates_no_tags() {
        let mut api = api();
        let err = api
            .create_note_with_labels("  ", "body", &["orphan"])
            .unwrap_err();

        assert!(matches!(err, NotesError::Api(_)));
        assert!(api.tags().is_empty());
        assert!(api.store().backend().raw(TAGS_KEY).is_none());
    }

    #[test]
    fn blank_title_on_update_creates_no_tags() {
        let mut api = api();
        api.create_note_with_labels::<&str>("Keep", "", &[]).unwrap();
        let id = api.store().notes()[0].id.clone();

        let err = api
            .update_note_with_labels(&id, "", "body", &["orphan"])
            .unwrap_err();
        assert!(matches!(err, NotesError::Api(_)));
        assert!(api.tags().is_empty());

        let err = api
            .update_note_with_labels("missing", "Title", "", &["orphan"])
            .unwrap_err();
        assert!(matches!(err, NotesError::NoteNotFound(_)));
        assert!(api.tags().is_empty());
    }
}
