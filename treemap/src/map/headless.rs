//! Render-free map library.
//!
//! [`HeadlessLibrary`] satisfies the capability interface without drawing
//! anything. Its canvas records the layer set, the current view and every
//! camera move, which makes it suitable for tests and for planning a map
//! from the command line.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use super::event::{EventSink, MapEvent};
use super::layer::{LayerId, LayerKind, LayerSpec};
use super::{CanvasOptions, MapCanvas, MapLibrary};
use crate::error::MapError;
use crate::geo::{LatLng, Viewport};

/// How the camera got to a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraMove {
    /// Jump without animation
    Set(Viewport),
    /// Animated flight
    Fly(Viewport),
}

impl CameraMove {
    pub fn viewport(&self) -> Viewport {
        match self {
            Self::Set(v) | Self::Fly(v) => *v,
        }
    }
}

/// Factory for [`HeadlessCanvas`].
#[derive(Debug, Clone, Copy)]
pub struct HeadlessLibrary {
    auto_ready: bool,
}

impl HeadlessLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether satellite layers report [`MapEvent::LayerLoaded`] as soon as
    /// they are added. On by default.
    pub fn with_auto_ready(mut self, auto_ready: bool) -> Self {
        self.auto_ready = auto_ready;
        self
    }
}

impl Default for HeadlessLibrary {
    fn default() -> Self {
        Self { auto_ready: true }
    }
}

impl MapLibrary for HeadlessLibrary {
    type Canvas = HeadlessCanvas;

    fn create_canvas(
        &self,
        target: &str,
        options: CanvasOptions,
        events: EventSink,
    ) -> Result<HeadlessCanvas, MapError> {
        if target.trim().is_empty() {
            return Err(MapError::Canvas("map container not found".to_string()));
        }

        debug!(target = target, "Headless canvas created");
        Ok(HeadlessCanvas {
            target: target.to_string(),
            options,
            events,
            auto_ready: self.auto_ready,
            next_id: 1,
            layers: BTreeMap::new(),
            view: Viewport::new(options.center, options.min_zoom as f64),
            moves: Vec::new(),
            animations_stopped: 0,
        })
    }
}

/// Canvas that keeps state in memory.
#[derive(Debug)]
pub struct HeadlessCanvas {
    target: String,
    options: CanvasOptions,
    events: EventSink,
    auto_ready: bool,
    next_id: u64,
    layers: BTreeMap<LayerId, LayerSpec>,
    view: Viewport,
    moves: Vec<CameraMove>,
    animations_stopped: usize,
}

impl HeadlessCanvas {
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn options(&self) -> CanvasOptions {
        self.options
    }

    /// Current view.
    pub fn view(&self) -> Viewport {
        self.view
    }

    /// Every camera move in order.
    pub fn moves(&self) -> &[CameraMove] {
        &self.moves
    }

    /// Layers in the order they were added.
    pub fn layers(&self) -> impl Iterator<Item = (LayerId, &LayerSpec)> {
        self.layers.iter().map(|(id, spec)| (*id, spec))
    }

    pub fn layer(&self, id: LayerId) -> Option<&LayerSpec> {
        self.layers.get(&id)
    }

    /// Layers of one kind, in the order they were added.
    pub fn layers_of(&self, kind: LayerKind) -> Vec<(LayerId, &LayerSpec)> {
        self.layers().filter(|(_, spec)| spec.kind() == kind).collect()
    }

    pub fn count(&self, kind: LayerKind) -> usize {
        self.layers.values().filter(|spec| spec.kind() == kind).count()
    }

    pub fn animations_stopped(&self) -> usize {
        self.animations_stopped
    }

    /// Pushes an event as if it came from the canvas.
    pub fn emit(&self, event: MapEvent) {
        if self.events.send(event).is_err() {
            debug!("Event receiver dropped, event discarded");
        }
    }
}

impl MapCanvas for HeadlessCanvas {
    fn add_layer(&mut self, layer: LayerSpec) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;

        trace!(layer = %id, kind = %layer.kind(), "Layer added");
        let ready = self.auto_ready && layer.kind() == LayerKind::Satellite;
        self.layers.insert(id, layer);

        if ready {
            self.emit(MapEvent::LayerLoaded(id));
        }
        id
    }

    fn remove_layer(&mut self, id: LayerId) -> bool {
        let removed = self.layers.remove(&id).is_some();
        trace!(layer = %id, removed, "Layer removed");
        removed
    }

    fn has_layer(&self, id: LayerId) -> bool {
        self.layers.contains_key(&id)
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.view = Viewport::new(center, zoom);
        self.moves.push(CameraMove::Set(self.view));
    }

    fn fly_to(&mut self, center: LatLng, zoom: f64) {
        // Flights land immediately without a render loop
        self.view = Viewport::new(center, zoom);
        self.moves.push(CameraMove::Fly(self.view));
    }

    fn zoom(&self) -> f64 {
        self.view.zoom
    }

    fn center(&self) -> LatLng {
        self.view.center
    }

    fn stop_animation(&mut self) {
        self.animations_stopped += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::debug_tile;
    use tokio::sync::mpsc;

    fn canvas(auto_ready: bool) -> (HeadlessCanvas, mpsc::UnboundedReceiver<MapEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let options = CanvasOptions {
            min_zoom: 2,
            center: LatLng::new(20.0, 0.0),
        };
        let canvas = HeadlessLibrary::new()
            .with_auto_ready(auto_ready)
            .create_canvas("map", options, tx)
            .unwrap();
        (canvas, rx)
    }

    #[test]
    fn test_empty_target_is_rejected() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let options = CanvasOptions {
            min_zoom: 2,
            center: LatLng::new(0.0, 0.0),
        };
        let result = HeadlessLibrary::new().create_canvas("  ", options, tx);
        assert!(matches!(result, Err(MapError::Canvas(_))));
    }

    #[test]
    fn test_initial_view_from_options() {
        let (canvas, _rx) = canvas(true);
        assert_eq!(canvas.view(), Viewport::new(LatLng::new(20.0, 0.0), 2.0));
        assert!(canvas.moves().is_empty());
    }

    #[test]
    fn test_satellite_layer_reports_loaded() {
        let (mut canvas, mut rx) = canvas(true);

        let id = canvas.add_layer(LayerSpec::Satellite { max_zoom: 20 });

        assert_eq!(rx.try_recv().unwrap(), MapEvent::LayerLoaded(id));
    }

    #[test]
    fn test_auto_ready_off_stays_silent() {
        let (mut canvas, mut rx) = canvas(false);

        canvas.add_layer(LayerSpec::Satellite { max_zoom: 20 });

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_add_remove_has_layer() {
        let (mut canvas, _rx) = canvas(true);

        let id = canvas.add_layer(LayerSpec::Debug { render: debug_tile });
        assert!(canvas.has_layer(id));
        assert_eq!(canvas.count(LayerKind::Debug), 1);

        assert!(canvas.remove_layer(id));
        assert!(!canvas.has_layer(id));
        assert!(!canvas.remove_layer(id));
    }

    #[test]
    fn test_camera_moves_recorded() {
        let (mut canvas, _rx) = canvas(true);

        canvas.set_view(LatLng::new(1.0, 1.0), 3.0);
        canvas.fly_to(LatLng::new(2.0, 2.0), 5.0);

        assert_eq!(canvas.zoom(), 5.0);
        assert_eq!(canvas.center(), LatLng::new(2.0, 2.0));
        assert!(matches!(canvas.moves()[0], CameraMove::Set(_)));
        assert!(matches!(canvas.moves()[1], CameraMove::Fly(_)));
    }
}
