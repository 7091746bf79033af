use super::print::{print_config, print_full_note, print_messages, print_notes, print_tags};
use crate::args::{Cli, Commands, TagCommands};
use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use marknotes::api::{ConfigAction, NotesApi};
use marknotes::config::NotesConfig;
use marknotes::editor::{NoteForm, edit_form, get_editor};
use marknotes::error::{NotesError, Result};
use marknotes::model::Note;
use marknotes::routes::Route;
use marknotes::store::fs_backend::FsBackend;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const STORAGE_DIR: &str = "storage";

struct AppContext {
    api: NotesApi<FsBackend>,
    config: NotesConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mut ctx = init_context(&cli)?;
    print_messages(&ctx.api.load_warnings());

    match cli.command {
        Some(Commands::List { title, tags }) => handle_list(&mut ctx, title, tags),
        Some(Commands::New {
            title,
            body,
            tags,
            no_editor,
        }) => handle_new(&mut ctx, title, body, tags, no_editor),
        Some(Commands::View { id, html }) => handle_view(&mut ctx, &id, html),
        Some(Commands::Edit {
            id,
            title,
            body,
            tags,
            clear_tags,
            no_editor,
        }) => {
            let fields = EditFields {
                title,
                body,
                tags,
                clear_tags,
                no_editor,
            };
            handle_edit(&mut ctx, &id, fields)
        }
        Some(Commands::Delete { id }) => handle_delete(&mut ctx, &id),
        Some(Commands::Tags(cmd)) => handle_tags(&mut ctx, cmd),
        Some(Commands::Open { path }) => handle_open(&mut ctx, &path),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&mut ctx, None, Vec::new()),
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("MARKNOTES_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "marknotes=debug"
        } else {
            "marknotes=warn"
        })
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => default_data_dir()?,
    };

    let config = NotesConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "unreadable config, using defaults");
        NotesConfig::default()
    });

    let backend = FsBackend::new(data_dir.join(STORAGE_DIR)).with_quota(config.quota_bytes);
    tracing::debug!(dir = %data_dir.display(), "opening store");
    let api = NotesApi::open(backend, data_dir)?;

    Ok(AppContext { api, config })
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "marknotes", "marknotes")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            NotesError::Api("Could not determine a data directory; pass --data-dir".into())
        })
}

fn editor_for(ctx: &AppContext) -> Result<String> {
    get_editor(ctx.config.editor.as_deref())
}

fn handle_list(ctx: &mut AppContext, title: Option<String>, tags: Vec<String>) -> Result<()> {
    let result = ctx.api.search_notes(title.as_deref().unwrap_or(""), &tags)?;
    print_notes(&result.listed_notes);
    print_messages(&result.messages);
    Ok(())
}

fn handle_new(
    ctx: &mut AppContext,
    title: Option<String>,
    body: Option<String>,
    tags: Vec<String>,
    no_editor: bool,
) -> Result<()> {
    let form = if no_editor || body.is_some() {
        NoteForm::new(title.unwrap_or_default(), tags, body.unwrap_or_default())
    } else {
        let initial = NoteForm::new(title.unwrap_or_default(), tags, "");
        edit_form(&initial, &editor_for(ctx)?)?
    };

    let result = ctx
        .api
        .create_note_with_labels(&form.title, &form.markdown, &form.tags)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &mut AppContext, id: &str, html: bool) -> Result<()> {
    let result = ctx.api.view_note(id)?;
    for note in &result.listed_notes {
        print_full_note(note, html);
    }
    print_messages(&result.messages);
    Ok(())
}

#[derive(Default)]
struct EditFields {
    title: Option<String>,
    body: Option<String>,
    tags: Vec<String>,
    clear_tags: bool,
    no_editor: bool,
}

impl EditFields {
    /// Any field given on the command line skips the editor.
    fn skip_editor(&self) -> bool {
        self.no_editor
            || self.clear_tags
            || self.title.is_some()
            || self.body.is_some()
            || !self.tags.is_empty()
    }

    fn apply_to(self, current: NoteForm) -> NoteForm {
        let tags = if self.clear_tags {
            Vec::new()
        } else if self.tags.is_empty() {
            current.tags
        } else {
            self.tags
        };
        NoteForm {
            title: self.title.unwrap_or(current.title),
            tags,
            markdown: self.body.unwrap_or(current.markdown),
        }
    }
}

fn form_for(note: &Note) -> NoteForm {
    NoteForm::new(
        note.title.clone(),
        note.tags.iter().map(|t| t.label.clone()).collect(),
        note.markdown.clone(),
    )
}

fn handle_edit(ctx: &mut AppContext, id: &str, fields: EditFields) -> Result<()> {
    let note = ctx
        .api
        .view_note(id)?
        .listed_notes
        .into_iter()
        .next()
        .ok_or_else(|| NotesError::NoteNotFound(id.to_string()))?;

    let current = form_for(&note);
    let edited = if fields.skip_editor() {
        fields.apply_to(current.clone())
    } else {
        edit_form(&current, &editor_for(ctx)?)?
    };

    if edited == current {
        println!("{}", "No changes.".dimmed());
        return Ok(());
    }

    let result =
        ctx.api
            .update_note_with_labels(&note.id, &edited.title, &edited.markdown, &edited.tags)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    let result = ctx.api.delete_note(id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_tags(ctx: &mut AppContext, cmd: TagCommands) -> Result<()> {
    let result = match cmd {
        TagCommands::List => {
            let result = ctx.api.list_tags()?;
            print_tags(&result.listed_tags);
            result
        }
        TagCommands::Add { label } => ctx.api.create_tag(&label)?,
        TagCommands::Rename { id, label } => ctx.api.update_tag(&id, &label)?,
        TagCommands::Delete { id } => ctx.api.delete_tag(&id)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_open(ctx: &mut AppContext, path: &str) -> Result<()> {
    match ctx.api.route(path)? {
        Route::List => handle_list(ctx, None, Vec::new()),
        Route::New => handle_new(ctx, None, None, Vec::new(), false),
        Route::Note(id) => handle_view(ctx, &id, false),
        Route::Edit(id) => handle_edit(ctx, &id, EditFields::default()),
    }
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = ctx.api.config(action)?;
    if show_all && let Some(config) = &result.config {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use marknotes::model::Tag;

    fn note() -> Note {
        Note {
            id: "n1".into(),
            title: "Plan".into(),
            markdown: "body".into(),
            tags: vec![Tag {
                id: "t1".into(),
                label: "work".into(),
            }],
        }
    }

    #[test]
    fn no_fields_opens_the_editor() {
        assert!(!EditFields::default().skip_editor());
    }

    #[test]
    fn given_fields_override_the_note() {
        let fields = EditFields {
            body: Some("new body".into()),
            ..Default::default()
        };
        assert!(fields.skip_editor());

        let edited = fields.apply_to(form_for(&note()));
        assert_eq!(edited.title, "Plan");
        assert_eq!(edited.markdown, "new body");
        assert_eq!(edited.tags, vec!["work"]);
    }

    #[test]
    fn clear_tags_empties_the_tag_list() {
        let fields = EditFields {
            clear_tags: true,
            ..Default::default()
        };
        let edited = fields.apply_to(form_for(&note()));
        assert!(edited.tags.is_empty());
    }

    #[test]
    fn tags_replace_existing_labels() {
        let fields = EditFields {
            tags: vec!["home".into(), "q3".into()],
            ..Default::default()
        };
        let edited = fields.apply_to(form_for(&note()));
        assert_eq!(edited.tags, vec!["home", "q3"]);
    }
}
