//! Navigable locations.
//!
//! | path         | route                 |
//! |--------------|-----------------------|
//! | `/`          | [`Route::List`]       |
//! | `/new`       | [`Route::New`]        |
//! | `/:id`       | [`Route::Note`]       |
//! | `/:id/edit`  | [`Route::Edit`]       |
//! | anything else| redirect to `/`       |
//!
//! A note route whose id is not in the current view also redirects to `/`,
//! see [`Route::resolve`].

use crate::model::Note;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    List,
    New,
    Note(String),
    Edit(String),
}

impl Route {
    /// Parse a path. Unmatched paths map to [`Route::List`].
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .trim()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::List,
            ["new"] => Route::New,
            [id] => Route::Note(id.to_string()),
            [id, "edit"] => Route::Edit(id.to_string()),
            _ => Route::List,
        }
    }

    /// Redirect note routes whose id is not present in `notes` to the list.
    pub fn resolve(self, notes: &[Note]) -> Self {
        let missing = match &self {
            Route::Note(id) | Route::Edit(id) => !notes.iter().any(|n| &n.id == id),
            Route::List | Route::New => false,
        };
        if missing {
            tracing::debug!(route = %self, "note not found, redirecting to list");
            return Route::List;
        }
        self
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::List => write!(f, "/"),
            Route::New => write!(f, "/new"),
            Route::Note(id) => write!(f, "/{}", id),
            Route::Edit(id) => write!(f, "/{}/edit", id),
        }
    }
}
