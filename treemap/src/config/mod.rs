//! Configuration for the map controller.
//!
//! [`MapConfig`] is the resolved, immutable configuration a controller is
//! built with. Callers supply a partial [`MapOverrides`]; the two are
//! combined by the pure [`MapConfig::merge`]. Override sources can be
//! stacked with [`MapOverrides::or`], and [`ConfigFile`] reads them from
//! `~/.treemap/config.ini`.
//!
//! # Example
//!
//! ```
//! use treemap::config::{MapConfig, MapOverrides};
//!
//! let overrides = MapOverrides::new()
//!     .with_tile_server_url("https://tiles.example/")
//!     .with_user_id("42");
//! let config = MapConfig::merge(MapConfig::default(), overrides);
//!
//! assert_eq!(config.min_zoom, 2);
//! assert_eq!(config.user_id.as_deref(), Some("42"));
//! ```

mod defaults;
mod file;
mod map;
mod parser;

pub use defaults::*;
pub use file::{config_directory, config_file_path, ConfigFile, ConfigFileError};
pub use map::{MapConfig, MapOverrides};
