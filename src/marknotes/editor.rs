use crate::error::{NotesError, Result};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use uuid::Uuid;

const TAGS_PREFIX: &str = "tags:";

/// The note form as an editor buffer.
///
/// Format:
/// ```text
/// Title
/// Tags: work, ideas
///
/// Markdown body...
/// ```
/// The tags line is optional when parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub tags: Vec<String>,
    pub markdown: String,
}

impl NoteForm {
    pub fn new(title: impl Into<String>, tags: Vec<String>, markdown: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tags,
            markdown: markdown.into(),
        }
    }

    pub fn to_buffer(&self) -> String {
        format!(
            "{}\nTags: {}\n\n{}",
            self.title,
            self.tags.join(", "),
            self.markdown
        )
    }

    pub fn from_buffer(buffer: &str) -> Self {
        let mut lines = buffer.lines().skip_while(|l| l.trim().is_empty()).peekable();

        let title = lines.next().map(|l| l.trim().to_string()).unwrap_or_default();

        let mut tags = Vec::new();
        if let Some(line) = lines.peek()
            && let Some(rest) = strip_prefix_ignore_case(line.trim(), TAGS_PREFIX)
        {
            tags = split_labels(rest);
            lines.next();
        }

        let body: Vec<&str> = lines.skip_while(|l| l.trim().is_empty()).collect();
        let markdown = body.join("\n").trim_end().to_string();

        Self {
            title,
            tags,
            markdown,
        }
    }
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// Comma-separated labels, trimmed, empties dropped.
pub fn split_labels(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Gets the editor command.
/// Checks the configured editor, then $VISUAL, then $EDITOR, then common editors.
pub fn get_editor(configured: Option<&str>) -> Result<String> {
    if let Some(editor) = configured
        && !editor.trim().is_empty()
    {
        return Ok(editor.to_string());
    }

    for var in ["VISUAL", "EDITOR"] {
        if let Ok(editor) = env::var(var)
            && !editor.trim().is_empty()
        {
            return Ok(editor);
        }
    }

    for fallback in &["vim", "vi", "nano"] {
        if Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
        {
            return Ok((*fallback).to_string());
        }
    }

    Err(NotesError::Api(
        "No editor found. Set $EDITOR or `marknotes config editor <cmd>`.".to_string(),
    ))
}

/// Opens a file in the editor and waits for it to close.
/// Returns the contents of the file after editing.
pub fn open_in_editor<P: AsRef<Path>>(editor: &str, file_path: P) -> Result<String> {
    let path = file_path.as_ref();
    let mut parts = editor.split_whitespace();
    let program = parts
        .next()
        .ok_or_else(|| NotesError::Api("Editor command is empty".to_string()))?;

    tracing::debug!(editor, path = %path.display(), "launching editor");
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| NotesError::Api(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(NotesError::Api(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    fs::read_to_string(path).map_err(NotesError::Io)
}

/// Opens the editor on a temporary Markdown file holding `initial` and
/// returns the edited form.
pub fn edit_form(initial: &NoteForm, editor: &str) -> Result<NoteForm> {
    let temp_file = env::temp_dir().join(format!("marknotes-{}.md", Uuid::new_v4()));
    fs::write(&temp_file, initial.to_buffer()).map_err(NotesError::Io)?;

    let edited = open_in_editor(editor, &temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(NoteForm::from_buffer(&edited?))
}
