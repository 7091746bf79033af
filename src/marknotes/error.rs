use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("Tag not found: {0}")]
    TagNotFound(String),

    #[error("Ambiguous id '{0}': matches more than one entry")]
    AmbiguousId(String),

    #[error("Malformed data stored under '{key}': {source}")]
    MalformedData {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Storage quota exceeded writing '{key}': {needed} bytes needed, limit is {limit}")]
    StorageQuotaExceeded { key: String, needed: u64, limit: u64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl NotesError {
    /// Whether the error is a storage write problem the session can survive.
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            NotesError::StorageUnavailable(_) | NotesError::StorageQuotaExceeded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, NotesError>;
