//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`config`] - Configuration inspection (path, show)
//! - [`plan`] - Headless load of the map and its layer plan
//! - [`radius`] - Cluster radius table

pub mod config;
pub mod plan;
pub mod radius;
