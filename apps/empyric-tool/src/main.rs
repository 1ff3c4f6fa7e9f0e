//! Inspection tool for empyric container files.
//!
//! Provides commands for:
//! - Listing the group/dataset structure, flat or as a tree
//! - Finding datasets by name or attribute value
//! - Previewing the first rows of a dataset

mod format;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use empyric_core::{DatasetStore, StoreConfig, DEFAULT_CONTAINER_FILE};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Container file to inspect
    #[arg(long, global = true, default_value = DEFAULT_CONTAINER_FILE)]
    file: PathBuf,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every group and dataset with shape and attributes
    Structure,

    /// Print the container as an indented tree
    Tree,

    /// Find datasets with the given name
    Search {
        /// Dataset name to look for
        name: String,
    },

    /// Find datasets whose attribute equals a value
    Filter {
        /// Attribute key
        key: String,
        /// Value, compared against the attribute's rendered text
        value: String,
    },

    /// Show the first rows of a dataset
    Preview {
        /// Full dataset path, e.g. `geochem/basalts/samples`
        path: String,

        /// Number of rows to show
        #[arg(short, long, default_value_t = 5)]
        rows: usize,
    },
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let store = DatasetStore::new(StoreConfig::new(&cli.file));
    tracing::debug!(file = %cli.file.display(), format = ?cli.format, "inspecting container");
    let output = match cli.command {
        Commands::Structure => format::structure(&store.entries()?, cli.format)?,
        Commands::Tree => format::tree(&store.entries()?, cli.format)?,
        Commands::Search { name } => format::paths(&store.find_by_name(&name)?, cli.format)?,
        Commands::Filter { key, value } => {
            format::paths(&store.filter_by_attribute(&key, &value)?, cli.format)?
        }
        Commands::Preview { path, rows } => {
            format::preview(&path, &store.preview(&path, rows)?, cli.format)?
        }
    };
    println!("{}", output);
    Ok(())
}
