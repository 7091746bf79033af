use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "marknotes", version)]
#[command(about = "Markdown notes with tags, kept in a local store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the notes store and config
    #[arg(long, global = true, env = "MARKNOTES_HOME")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes, optionally filtered by title and tags
    #[command(alias = "ls")]
    List {
        /// Case-insensitive title substring
        #[arg(short, long)]
        title: Option<String>,

        /// Only notes carrying this tag (repeatable, all must match)
        #[arg(long = "tag", value_name = "LABEL")]
        tags: Vec<String>,
    },

    /// Create a new note
    #[command(alias = "n")]
    New {
        /// Title of the note (opens the editor if omitted)
        title: Option<String>,

        /// Markdown body of the note
        body: Option<String>,

        /// Tag label to attach; unknown labels are created (repeatable)
        #[arg(long = "tag", value_name = "LABEL")]
        tags: Vec<String>,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Show a note with its body rendered
    #[command(alias = "v")]
    View {
        /// Note id or unique id prefix
        id: String,

        /// Print the body as HTML instead of styled text
        #[arg(long)]
        html: bool,
    },

    /// Edit a note (in the editor unless fields are given)
    #[command(alias = "e")]
    Edit {
        /// Note id or unique id prefix
        id: String,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New Markdown body
        #[arg(long)]
        body: Option<String>,

        /// Replace the note's tags with these labels (repeatable)
        #[arg(long = "tag", value_name = "LABEL")]
        tags: Vec<String>,

        /// Remove every tag from the note
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        /// Skip opening the editor
        #[arg(long)]
        no_editor: bool,
    },

    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Note id or unique id prefix
        id: String,
    },

    /// Manage tags
    #[command(subcommand)]
    Tags(TagCommands),

    /// Open a location: /, /new, /<id>, /<id>/edit
    Open { path: String },

    /// Get or set configuration
    Config {
        /// Configuration key (editor, quota-bytes)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagCommands {
    /// List tags
    #[command(alias = "ls")]
    List,

    /// Create a tag
    Add { label: String },

    /// Change a tag's label
    Rename {
        /// Tag id or unique id prefix
        id: String,
        label: String,
    },

    /// Delete a tag (notes keep their text)
    #[command(alias = "rm")]
    Delete {
        /// Tag id or unique id prefix
        id: String,
    },
}
