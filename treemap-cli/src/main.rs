//! Treemap CLI - Command-line interface
//!
//! This binary plans the tree map headlessly: it runs the controller's load
//! sequence against the configured servers and prints the resulting camera
//! and layer stack.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::plan::PlanArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "treemap")]
#[command(version = treemap::VERSION)]
#[command(about = "Plan and inspect the interactive tree map", long_about = None)]
struct Cli {
    /// Config file to use instead of ~/.treemap/config.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print debug-level logs to stdout
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the map headlessly and print its camera and layers
    Plan(PlanArgs),

    /// Print the cluster radius for a zoom level, or the whole table
    Radius {
        /// Zoom level; fractional zooms yield 0
        #[arg(long)]
        zoom: Option<f64>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli).await {
        e.exit();
    }
}

async fn dispatch(cli: Cli) -> Result<(), CliError> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Plan(args) => commands::plan::run(args, config_path, cli.verbose).await,
        Commands::Radius { zoom } => {
            commands::radius::run(zoom);
            Ok(())
        }
        Commands::Config { command } => commands::config::run(command, config_path),
    }
}
