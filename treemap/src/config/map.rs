//! Map controller configuration.

use super::defaults::*;
use crate::geo::LatLng;

/// Resolved configuration of a map controller.
///
/// Immutable once the controller is built. Produced by
/// [`MapConfig::merge`] from defaults and caller overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Minimum zoom level; the camera starts here
    pub min_zoom: u8,
    /// Maximum zoom level for every layer
    pub max_zoom: u8,
    /// Camera center before the initial viewport is known
    pub initial_center: LatLng,
    /// Base URL of the tile server, including the trailing slash
    pub tile_server_url: String,
    /// Base URL of the API server, including the trailing slash
    pub api_server_url: String,
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Adds the tile-coordinate overlay when set
    pub debug: bool,
    /// Restricts all data to one user's trees
    pub user_id: Option<String>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            initial_center: DEFAULT_INITIAL_CENTER,
            tile_server_url: String::new(),
            api_server_url: String::new(),
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            debug: DEFAULT_DEBUG,
            user_id: None,
        }
    }
}

impl MapConfig {
    /// Overlays `overrides` on `defaults`. Any value present in the
    /// overrides wins; nothing is merged below field level.
    pub fn merge(defaults: MapConfig, overrides: MapOverrides) -> MapConfig {
        MapConfig {
            min_zoom: overrides.min_zoom.unwrap_or(defaults.min_zoom),
            max_zoom: overrides.max_zoom.unwrap_or(defaults.max_zoom),
            initial_center: overrides.initial_center.unwrap_or(defaults.initial_center),
            tile_server_url: overrides.tile_server_url.unwrap_or(defaults.tile_server_url),
            api_server_url: overrides.api_server_url.unwrap_or(defaults.api_server_url),
            width: overrides.width.unwrap_or(defaults.width),
            height: overrides.height.unwrap_or(defaults.height),
            debug: overrides.debug.unwrap_or(defaults.debug),
            user_id: overrides.user_id.or(defaults.user_id),
        }
    }
}

/// Partial configuration supplied by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapOverrides {
    pub min_zoom: Option<u8>,
    pub max_zoom: Option<u8>,
    pub initial_center: Option<LatLng>,
    pub tile_server_url: Option<String>,
    pub api_server_url: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub debug: Option<bool>,
    pub user_id: Option<String>,
}

impl MapOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills every field not set here from `fallback`.
    ///
    /// Used to stack override sources: `cli.or(env).or(file)`.
    pub fn or(self, fallback: MapOverrides) -> MapOverrides {
        MapOverrides {
            min_zoom: self.min_zoom.or(fallback.min_zoom),
            max_zoom: self.max_zoom.or(fallback.max_zoom),
            initial_center: self.initial_center.or(fallback.initial_center),
            tile_server_url: self.tile_server_url.or(fallback.tile_server_url),
            api_server_url: self.api_server_url.or(fallback.api_server_url),
            width: self.width.or(fallback.width),
            height: self.height.or(fallback.height),
            debug: self.debug.or(fallback.debug),
            user_id: self.user_id.or(fallback.user_id),
        }
    }

    pub fn with_tile_server_url(mut self, url: impl Into<String>) -> Self {
        self.tile_server_url = Some(url.into());
        self
    }

    pub fn with_api_server_url(mut self, url: impl Into<String>) -> Self {
        self.api_server_url = Some(url.into());
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn with_zoom_bounds(mut self, min_zoom: u8, max_zoom: u8) -> Self {
        self.min_zoom = Some(min_zoom);
        self.max_zoom = Some(max_zoom);
        self
    }

    pub fn with_initial_center(mut self, center: LatLng) -> Self {
        self.initial_center = Some(center);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }
}
