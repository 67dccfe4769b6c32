// src/cli/args.rs
use crate::domain::Template;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Backend base URL, overriding config and environment
    #[arg(short, long, value_name = "URL", global = true)]
    pub backend: Option<String>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List folders
    Folders,

    /// Create a folder
    NewFolder {
        /// Folder name
        #[arg(value_name = "NAME")]
        name: String,

        /// Icon shown next to the folder name
        #[arg(long)]
        icon: Option<String>,
    },

    /// List notes, optionally scoped to a folder
    Notes {
        /// Folder ID; omit for unfiled notes
        #[arg(short, long, value_name = "FOLDER_ID")]
        folder: Option<String>,
    },

    /// Print a note
    Show {
        /// Note ID to show
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Open a note in the browser, styled with the configured theme
    View {
        /// Note ID to view
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Create a note, empty or from a template
    New {
        /// Template to start from (study, journal, todo)
        #[arg(short, long, value_name = "TEMPLATE")]
        template: Option<Template>,

        /// Title for the new note
        #[arg(long)]
        title: Option<String>,

        /// Folder ID to file the note under
        #[arg(short, long, value_name = "FOLDER_ID")]
        folder: Option<String>,
    },

    /// Delete a note
    Delete {
        /// Note ID to delete
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Search notes by meaning
    Search {
        /// What to look for
        #[arg(value_name = "QUERY")]
        query: String,

        /// Maximum number of results
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Generate writing ideas about a topic
    Ideas {
        #[arg(value_name = "TOPIC")]
        topic: String,
    },

    /// Export a note to PDF
    Export {
        /// Note ID to export
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// Directory to save into (defaults to config, then current directory)
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Transcribe audio from a URL
    Transcribe {
        #[arg(value_name = "AUDIO_URL")]
        audio_url: String,
    },

    /// Write a config file with default values
    InitConfig {
        /// Where to write (defaults to the user config directory)
        #[arg(long, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Interactive session: browse, edit and save notes
    Shell,
}
