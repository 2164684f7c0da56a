//! Geographic primitives
//!
//! Positions, slippy-map tile addresses and camera viewports, plus the two
//! pieces of geometry the controller needs: decoding serialized point
//! geometries and fitting a viewport around a set of points.

mod bounds;
mod point;
mod types;

pub use bounds::{
    project, unproject, BoundsFitter, MercatorBoundsFitter, DEFAULT_FIT_MAX_ZOOM,
    DEFAULT_FIT_PADDING_PX, TILE_SIZE,
};
pub use point::parse_point;
pub use types::{GeometryError, LatLng, TileCoord, Viewport, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};
