//! Configuration inspection CLI commands.
//!
//! Provides `config path` and `config show`.

use std::path::Path;

use clap::Subcommand;
use treemap::config::{config_file_path, MapConfig};

use crate::error::CliError;
use crate::runner::load_config;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Show the configuration file merged over the defaults
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands, config_path: Option<&Path>) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            let path = config_path
                .map(Path::to_path_buf)
                .unwrap_or_else(config_file_path);
            println!("{}", path.display());
            Ok(())
        }
        ConfigCommands::Show => run_show(config_path),
    }
}

fn run_show(config_path: Option<&Path>) -> Result<(), CliError> {
    let file = load_config(config_path)?;
    let config = MapConfig::merge(MapConfig::default(), file.map);

    println!("[map]");
    println!("min_zoom = {}", config.min_zoom);
    println!("max_zoom = {}", config.max_zoom);
    println!("center_lat = {}", config.initial_center.lat);
    println!("center_lng = {}", config.initial_center.lng);
    println!("width = {}", config.width);
    println!("height = {}", config.height);
    println!("debug = {}", config.debug);
    println!("user_id = {}", config.user_id.as_deref().unwrap_or("(not set)"));
    println!();
    println!("[servers]");
    println!("tile_url = {}", or_unset(&config.tile_server_url));
    println!("api_url = {}", or_unset(&config.api_server_url));
    println!();
    println!("[logging]");
    println!("file = {}", file.log_file.display());

    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}
