//! Default values for all configuration settings.

use crate::geo::LatLng;

/// Lowest zoom level the map allows; also the initial zoom.
pub const DEFAULT_MIN_ZOOM: u8 = 2;

/// Highest zoom level the map allows.
pub const DEFAULT_MAX_ZOOM: u8 = 20;

/// Camera center before any data is known.
pub const DEFAULT_INITIAL_CENTER: LatLng = LatLng::new(20.0, 0.0);

/// Viewport size used for bounds fitting when the host does not report one.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 768;

/// Debug tile overlay is on unless turned off.
pub const DEFAULT_DEBUG: bool = true;

/// Config directory name under the user's home.
pub const CONFIG_DIR_NAME: &str = ".treemap";

/// Config file name inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "treemap.log";
