//! Viewport fitting for a set of points.

use std::f64::consts::PI;

use super::types::{LatLng, Viewport, MAX_LAT, MIN_LAT};

/// Tile edge length in pixels at every zoom level.
pub const TILE_SIZE: f64 = 256.0;

/// Default zoom cap used when all points collapse onto one spot.
pub const DEFAULT_FIT_MAX_ZOOM: u8 = 18;

/// Default margin kept between the framed points and the viewport edge.
pub const DEFAULT_FIT_PADDING_PX: f64 = 20.0;

/// Computes a viewport framing a set of points.
///
/// This is the seam for the bounds utility of the hosting map stack; the
/// controller only depends on this trait.
pub trait BoundsFitter: Send + Sync {
    /// Returns the viewport framing all `points` inside a `width`×`height`
    /// pixel viewport, or `None` when `points` is empty.
    fn fit(&self, points: &[LatLng], width: u32, height: u32) -> Option<Viewport>;
}

/// Web Mercator bounds fitter.
///
/// Projects the points to zoom-0 world pixels, picks the largest integer zoom
/// at which their bounding box fits the padded viewport, and centers on the
/// projected midpoint of the box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorBoundsFitter {
    max_zoom: u8,
    padding: f64,
}

impl MercatorBoundsFitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the zoom cap (also used for single-point input).
    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    /// Set the pixel margin kept on every side of the viewport.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    pub fn max_zoom(&self) -> u8 {
        self.max_zoom
    }
}

impl Default for MercatorBoundsFitter {
    fn default() -> Self {
        Self {
            max_zoom: DEFAULT_FIT_MAX_ZOOM,
            padding: DEFAULT_FIT_PADDING_PX,
        }
    }
}

impl BoundsFitter for MercatorBoundsFitter {
    fn fit(&self, points: &[LatLng], width: u32, height: u32) -> Option<Viewport> {
        let (first, rest) = points.split_first()?;

        let (x0, y0) = project(first);
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (x0, x0, y0, y0);
        for point in rest {
            let (x, y) = project(point);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }

        let center = unproject((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);

        let avail_w = (width as f64 - 2.0 * self.padding).max(1.0);
        let avail_h = (height as f64 - 2.0 * self.padding).max(1.0);
        let span_x = max_x - min_x;
        let span_y = max_y - min_y;

        let max_zoom = self.max_zoom as f64;
        let zoom = if span_x <= f64::EPSILON && span_y <= f64::EPSILON {
            max_zoom
        } else {
            // World pixels double per zoom level
            let scale_x = if span_x > 0.0 { avail_w / span_x } else { f64::INFINITY };
            let scale_y = if span_y > 0.0 { avail_h / span_y } else { f64::INFINITY };
            scale_x.min(scale_y).log2().floor().clamp(0.0, max_zoom)
        };

        Some(Viewport::new(center, zoom))
    }
}

/// Projects a position to Web Mercator world pixels at zoom 0.
pub fn project(point: &LatLng) -> (f64, f64) {
    let lat = point.lat.clamp(MIN_LAT, MAX_LAT);
    let x = (point.lng + 180.0) / 360.0 * TILE_SIZE;
    let lat_rad = lat * PI / 180.0;
    let y = (1.0 - lat_rad.tan().asinh() / PI) / 2.0 * TILE_SIZE;
    (x, y)
}

/// Inverse of [`project`].
pub fn unproject(x: f64, y: f64) -> LatLng {
    let lng = x / TILE_SIZE * 360.0 - 180.0;
    let lat_rad = (PI * (1.0 - 2.0 * y / TILE_SIZE)).sinh().atan();
    LatLng::new(lat_rad * 180.0 / PI, lng)
}
