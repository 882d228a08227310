use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "wordmatch")]
#[command(about = "wordmatch - Typo-tolerant lookups against catalogs of names.")]
#[command(version = env!("VERSION"))]
pub struct Cli {
    /// Path to one or more config files (merged in order).
    #[arg(long, default_value = "config.toml", action = clap::ArgAction::Append)]
    pub config: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a sample config file.
    NewConfig {
        /// Output path for config file.
        #[arg(short, long, default_value = "config.toml")]
        path: PathBuf,
    },

    /// Print ranked suggestions for a query.
    Suggest {
        /// Catalog to search.
        #[arg(long)]
        catalog: String,

        /// Maximum number of suggestions (0 = catalog default).
        #[arg(long, default_value = "0")]
        max: usize,

        query: String,
    },

    /// Resolve a query to a single entry, a list of candidates or nothing.
    Lookup {
        /// Catalog to search.
        #[arg(long)]
        catalog: String,

        /// Maximum number of candidates (0 = catalog default).
        #[arg(long, default_value = "0")]
        max: usize,

        query: String,
    },

    /// Resolve a `,` or `+` separated list of names ("2 mint, sage").
    Resolve {
        /// Catalog to search.
        #[arg(long)]
        catalog: String,

        text: String,
    },

    /// Start the HTTP API server (default).
    Serve,
}
