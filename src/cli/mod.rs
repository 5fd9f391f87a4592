use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

pub mod commands;

#[derive(Parser)]
#[command(name = "copy2")]
#[command(version = "0.1.0")]
#[command(about = "Clipboard history with search, favorites and export/import", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv); COPY2_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive history browser with live clipboard capture
    Ui,
    /// Capture clipboard changes without a UI
    Watch {
        /// Poll the clipboard a single time and exit
        #[arg(long)]
        once: bool,
    },
    /// Record text as if it had been copied (reads stdin when TEXT is omitted)
    Add { text: Option<String> },
    /// List history items, oldest first
    List {
        /// List favorites instead of history
        #[arg(long)]
        favorites: bool,
    },
    /// Print one history item in full
    Show { position: usize },
    /// Find history items containing QUERY (case-insensitive)
    Search { query: String },
    /// Copy a history item to the clipboard
    Copy {
        position: usize,
        /// Reverse line order regardless of the saved setting
        #[arg(long)]
        reverse_lines: bool,
    },
    /// Join several items with newlines and copy the result
    Combine {
        #[arg(required = true)]
        positions: Vec<usize>,
    },
    /// Delete a history item
    Delete { position: usize },
    /// Toggle the favorite mark of a history item
    Fav { position: usize },
    /// Delete all history items (favorites are kept)
    Clear {
        /// Confirm clearing
        #[arg(long)]
        yes: bool,
    },
    /// Write history, favorites and settings to a JSON file
    Export { path: Option<PathBuf> },
    /// Merge history and favorites from an exported JSON file
    Import { path: PathBuf },
    /// Show or change settings
    Config {
        /// Number of items kept (5-500)
        #[arg(long)]
        max_history: Option<usize>,
        /// Clipboard poll interval in milliseconds (100-5000)
        #[arg(long)]
        poll_ms: Option<u64>,
        /// Keep history in memory only
        #[arg(long)]
        session_only: Option<bool>,
        /// Reverse line order when copying items
        #[arg(long)]
        reverse_lines: Option<bool>,
    },
    /// Show statistics about the history
    Stats,
    /// Show where data is stored
    Paths,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    commands::dispatch(cli)
}
