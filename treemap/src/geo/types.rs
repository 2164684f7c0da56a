//! Geographic type definitions

use std::fmt;

use thiserror::Error;

/// Web Mercator valid latitude range
pub const MIN_LAT: f64 = -85.05112878;
pub const MAX_LAT: f64 = 85.05112878;

/// Valid longitude range
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// A geographic position in degrees.
///
/// Field order follows the map convention `(lat, lng)`. Wire geometries use
/// the GeoJSON order `[lng, lat]` and are swapped on parse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a position, rejecting non-finite coordinates and anything
    /// beyond ±90° latitude / ±180° longitude.
    pub fn try_new(lat: f64, lng: f64) -> Result<Self, GeometryError> {
        if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
            return Err(GeometryError::OutOfRange { lat, lng });
        }
        Ok(Self::new(lat, lng))
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Slippy-map tile address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileCoord {
    /// Zoom level
    pub z: u8,
    /// Column, 0 at west
    pub x: u32,
    /// Row, 0 at north
    pub y: u32,
}

impl TileCoord {
    pub const fn new(z: u8, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.z, self.x, self.y)
    }
}

impl std::str::FromStr for TileCoord {
    type Err = GeometryError;

    /// Parses the `z/x/y` form used in tile URLs.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || GeometryError::Malformed(format!("expected z/x/y, got '{}'", s));
        let mut parts = s.trim().split('/');
        let z = parts.next().and_then(|p| p.parse().ok()).ok_or_else(malformed)?;
        let x = parts.next().and_then(|p| p.parse().ok()).ok_or_else(malformed)?;
        let y = parts.next().and_then(|p| p.parse().ok()).ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }
        Ok(Self { z, x, y })
    }
}

/// Camera state: a center coordinate plus a zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: f64,
}

impl Viewport {
    pub const fn new(center: LatLng, zoom: f64) -> Self {
        Self { center, zoom }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ zoom {}", self.center, self.zoom)
    }
}

/// Errors that can occur while decoding serialized geometries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Text could not be parsed as a point geometry
    #[error("Malformed point geometry: {0}")]
    Malformed(String),

    /// Coordinates parsed but fall outside the valid range
    #[error("Coordinates out of range: lat {lat}, lng {lng}")]
    OutOfRange { lat: f64, lng: f64 },
}
