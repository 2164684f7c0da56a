//! Treemap - interactive tree map controller
//!
//! This library drives a slippy map of planted trees: satellite imagery as
//! the base, server-rendered tree tiles on top, and an invisible hit grid
//! that turns pointer movement into cluster highlights and click-to-zoom.
//!
//! Rendering is delegated to a map library behind the [`map::MapLibrary`]
//! capability trait. The crate ships a headless implementation used by the
//! CLI and the tests.
//!
//! # High-Level API
//!
//! ```ignore
//! use treemap::config::MapOverrides;
//! use treemap::controller::MapController;
//! use treemap::http::AsyncReqwestClient;
//! use treemap::map::HeadlessLibrary;
//!
//! let mut controller = MapController::builder()
//!     .library(HeadlessLibrary::new())
//!     .http_client(AsyncReqwestClient::new()?)
//!     .overrides(MapOverrides::new().with_user_id("42"))
//!     .build()?;
//!
//! controller.mount("map")?;
//! controller.process_pending().await?;
//! ```

pub mod cluster;
pub mod config;
pub mod controller;
pub mod error;
pub mod filter;
pub mod geo;
pub mod http;
pub mod logging;
pub mod map;
pub mod summary;
pub mod viewport;

pub use controller::{MapController, MapControllerBuilder};
pub use error::MapError;

/// Version of the treemap library and CLI.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
