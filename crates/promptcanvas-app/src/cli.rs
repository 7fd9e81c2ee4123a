//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "promptcanvas", version, about = "Edit, replay and generate PromptCanvas documents")]
pub struct Cli {
    /// Editor settings file (JSON). Missing keys keep their defaults.
    #[arg(long, global = true, env = "PROMPTCANVAS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print element counts and bounds of a document
    Info { document: PathBuf },

    /// Apply a recorded session of pointer and key events
    Replay {
        session: PathBuf,
        /// Start from this document instead of an empty canvas
        #[arg(long)]
        from: Option<PathBuf>,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate an image from a prompt and the selected images
    Generate {
        document: PathBuf,
        #[arg(short, long)]
        prompt: String,
        /// Element id to use as input (repeatable)
        #[arg(long = "select", value_name = "ID")]
        select: Vec<String>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage named documents in the local library
    Library {
        /// Library directory (defaults to the platform data dir)
        #[arg(long)]
        dir: Option<PathBuf>,
        #[command(subcommand)]
        action: LibraryCommand,
    },

    /// List keyboard shortcuts
    Shortcuts,
}

#[derive(Debug, Subcommand)]
pub enum LibraryCommand {
    List,
    Save { name: String, document: PathBuf },
    Open {
        name: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    Delete { name: String },
}
