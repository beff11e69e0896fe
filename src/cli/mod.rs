//! CLI module for Lese.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Lese - Retrieval-Augmented Study Assistant
///
/// A backend for answering study questions from pre-embedded lecture and
/// document corpora. The name "Lese" comes from the Norwegian word for "read."
#[derive(Parser, Debug)]
#[command(name = "lese")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Query the lecture transcript corpus
    Lecture {
        /// The query to answer
        query: String,
    },

    /// Query the document chunk corpus
    Document {
        /// The query to answer
        query: String,
    },

    /// Render a mind-map image from a JSON graph description
    Mindmap {
        /// Path to the mind-map JSON file
        input: String,

        /// Path of the SVG file to write
        output: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
