//! Capability interface of the map-rendering library.
//!
//! The controller never draws anything itself. It describes layers as
//! [`LayerSpec`] values and hands them to a [`MapCanvas`], and it learns
//! about loads, hovers and clicks through [`MapEvent`]s pushed into an
//! [`EventSink`]. Any rendering stack (a browser map via bindings, a native
//! widget, the [`HeadlessLibrary`]) plugs in by implementing [`MapLibrary`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  create_canvas  ┌──────────────┐
//! │ MapController│────────────────►│  MapLibrary  │
//! │              │                 └──────┬───────┘
//! │              │  add/remove layer      │
//! │              │  set_view / fly_to ┌───▼───────┐
//! │              │───────────────────►│ MapCanvas │
//! │              │◄───────────────────│           │
//! └──────────────┘     MapEvent       └───────────┘
//! ```

mod event;
mod headless;
mod layer;

pub use event::{ClickData, EventSink, EventStream, GridCell, HighlightData, MapEvent};
pub use headless::{CameraMove, HeadlessCanvas, HeadlessLibrary};
pub use layer::{
    debug_tile, DebugRenderer, DebugTile, LayerId, LayerKind, LayerSpec, MarkerIcon, TileSource,
    HIGHLIGHT_CLASS,
};

use crate::error::MapError;
use crate::geo::LatLng;

/// Options a canvas is created with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasOptions {
    pub min_zoom: u8,
    pub center: LatLng,
}

/// Entry point of a map-rendering library.
pub trait MapLibrary {
    /// Canvas type produced by this library.
    type Canvas: MapCanvas;

    /// Creates a canvas bound to `target` (a container identifier).
    ///
    /// The canvas reports events through `events` for as long as it lives.
    fn create_canvas(
        &self,
        target: &str,
        options: CanvasOptions,
        events: EventSink,
    ) -> Result<Self::Canvas, MapError>;
}

/// A live map: camera plus layer set.
pub trait MapCanvas {
    /// Adds a layer and returns its handle.
    fn add_layer(&mut self, layer: LayerSpec) -> LayerId;

    /// Removes a layer. Returns `false` if it was not on the canvas.
    fn remove_layer(&mut self, id: LayerId) -> bool;

    fn has_layer(&self, id: LayerId) -> bool;

    /// Moves the camera without animation.
    fn set_view(&mut self, center: LatLng, zoom: f64);

    /// Starts an animated camera flight and returns immediately.
    fn fly_to(&mut self, center: LatLng, zoom: f64);

    fn zoom(&self) -> f64;

    fn center(&self) -> LatLng;

    /// Cancels any camera animation in progress.
    fn stop_animation(&mut self) {}
}
