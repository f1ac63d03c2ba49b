//! Command-line interface definition

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Debug, Parser)]
#[command(name = "favreel", version, about = "Browse and manage your favorite videos")]
pub struct Cli {
    /// Use this config file instead of the default
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use this database file
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Open the favorites grid (default)
    Tui,

    /// Print favorites
    List {
        /// Page to start from
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Load every page from the first until the list is exhausted
        #[arg(short, long, conflicts_with = "page")]
        all: bool,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a favorite
    Add {
        /// Video code
        code: String,

        /// Display title
        title: String,

        /// Cover image URL
        #[arg(long)]
        cover: Option<String>,
    },

    /// Add favorites from a JSON array of {video_code, title, cover_url}
    Import {
        file: PathBuf,
    },

    /// Remove a favorite
    Remove {
        /// Video code
        code: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Show the effective configuration
    Config {
        /// Only print the config file path
        #[arg(long)]
        path: bool,
    },

    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}
