pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mikan")]
#[command(about = "A terminal anime catalog browser", long_about = None)]
pub struct Cli {
    /// Path to the favorites database
    #[arg(long, global = true)]
    pub db: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show a page of the top anime list
    Top {
        /// Page number to fetch
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Search the catalog
    Search {
        /// Search string
        query: String,

        /// Page number to fetch
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
    /// Manage favorites
    Fav {
        #[command(subcommand)]
        action: FavAction,
    },
    /// Launch the TUI (default)
    Tui,
}

#[derive(Subcommand)]
pub enum FavAction {
    /// List favorites
    List,
    /// Remove a favorite by id
    Remove {
        /// Anime id
        id: i64,
    },
}
