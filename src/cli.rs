use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "Discover recipes from the terminal", long_about = None)]
pub struct Cli {
    /// Backend origin, e.g. http://localhost:8000 (falls back to DISHCOVERY_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// Where preferences and favorites are kept (falls back to DISHCOVERY_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the backend is reachable
    Status,
    /// Show the recipe catalog
    Browse,
    /// Generate a recipe from a prompt using the saved preferences
    Generate {
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
    /// Show one recipe
    Show {
        id: String,
        /// Add or remove the recipe from favorites
        #[arg(long)]
        toggle_favorite: bool,
    },
    /// Show favorite recipes
    Favorites,
    /// Show or edit dietary and health preferences
    Preferences {
        /// Dietary option to toggle (repeatable)
        #[arg(long)]
        dietary: Vec<String>,
        /// Health option to toggle (repeatable)
        #[arg(long)]
        health: Vec<String>,
        /// Persist the toggled preferences
        #[arg(long)]
        save: bool,
    },
    /// Open a screen by path, e.g. /recipe/<id> or /favorites
    Open { path: String },
    /// Interactive session
    Shell,
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
