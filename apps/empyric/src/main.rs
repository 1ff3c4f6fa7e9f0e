//! Command-line front end for the empyric dataset store.
//!
//! ```text
//! empyric save  --group geochem --dataset samples --csv samples.csv
//! empyric load  --group geochem --dataset samples [--csv out.csv]
//! empyric query --group geochem --dataset samples --query "SiO2 > 50"
//! ```

mod csv_io;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use empyric_core::{DatasetStore, StoreConfig, DEFAULT_CONTAINER_FILE};
use tracing_subscriber::EnvFilter;

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Action to perform
    #[arg(value_enum)]
    action: Action,

    /// Container file
    #[arg(long, default_value = DEFAULT_CONTAINER_FILE)]
    file: PathBuf,

    /// Group path inside the container, e.g. `geochem/basalts`
    #[arg(long)]
    group: String,

    /// Dataset name within the group
    #[arg(long)]
    dataset: String,

    /// CSV file to import (save) or export to (load)
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Predicate for the query action, e.g. `SiO2 > 50`
    #[arg(long)]
    query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Action {
    Save,
    Load,
    Query,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    run(args)
}

fn run(args: Args) -> anyhow::Result<()> {
    let store = DatasetStore::new(StoreConfig::new(&args.file));
    tracing::debug!(file = %args.file.display(), action = ?args.action, "starting");

    match args.action {
        Action::Save => {
            let Some(csv_path) = args.csv else {
                println!("Error: --csv is required to save data.");
                return Ok(());
            };
            let table = csv_io::read_table(&csv_path)
                .with_context(|| format!("Failed to import {}", csv_path.display()))?;
            store.save(&table, &args.group, &args.dataset)?;
            println!(
                "Data saved to {} under {}/{}",
                args.file.display(),
                args.group,
                args.dataset
            );
        }
        Action::Load => {
            let table = store.load(&args.group, &args.dataset)?;
            match args.csv {
                Some(out) => {
                    csv_io::write_table(&table, &out)
                        .with_context(|| format!("Failed to export {}", out.display()))?;
                    println!("Data exported to {}", out.display());
                }
                None => println!("{}", table),
            }
        }
        Action::Query => {
            let Some(predicate) = args.query else {
                println!("Error: --query is required for querying.");
                return Ok(());
            };
            let result = store.query(&args.group, &args.dataset, &predicate)?;
            println!("{}", result);
        }
    }
    Ok(())
}
