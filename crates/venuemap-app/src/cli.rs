//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "venuemap", version, about = "Render and inspect venue map templates")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where a template comes from.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Template JSON file, or a template id when --store is given.
    pub template: String,
    /// Directory of stored templates.
    #[arg(long)]
    pub store: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render a template and print the recorded draw commands.
    Render {
        #[command(flatten)]
        source: SourceArgs,
        /// Comma-separated area ids to highlight.
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
        /// JSON file with render options.
        #[arg(long)]
        options: Option<PathBuf>,
        /// Override the longest rendered side.
        #[arg(long)]
        max_size: Option<f64>,
        /// Do not draw area labels.
        #[arg(long)]
        no_labels: bool,
    },
    /// Summarize a template's areas and zones.
    Inspect {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Copy a template JSON file into a store.
    Import {
        file: PathBuf,
        #[arg(long)]
        store: PathBuf,
    },
    /// List template ids in a store.
    List {
        #[arg(long)]
        store: PathBuf,
    },
}
