mod commands;
mod transcript;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "reflux-router")]
#[command(version, about = "Reflux Router CLI - inspect route tables and replay navigations", long_about = None)]
struct Cli {
    /// Log route resolution details (equivalent to RUST_LOG=reflux_router=trace)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the routes defined in a route table
    Routes {
        /// Route table (TOML)
        table: PathBuf,
    },

    /// Resolve a path without applying any effect
    Resolve {
        /// Route table (TOML)
        table: PathBuf,

        /// Path to resolve
        path: String,
    },

    /// Initialize routing and navigate through a sequence of paths
    Navigate {
        /// Route table (TOML)
        table: PathBuf,

        /// Paths to navigate to, in order
        paths: Vec<String>,

        /// Location used for the initial navigation
        #[arg(short, long, default_value = "")]
        location: String,

        /// Do not record history entries
        #[arg(long)]
        no_history: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("reflux_router=trace")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Execute command
    match cli.command {
        Commands::Routes { table } => {
            commands::routes::execute(&table)?;
        }
        Commands::Resolve { table, path } => {
            commands::resolve::execute(&table, &path)?;
        }
        Commands::Navigate {
            table,
            paths,
            location,
            no_history,
        } => {
            commands::navigate::execute(&table, &location, &paths, !no_history)?;
        }
    }

    Ok(())
}
