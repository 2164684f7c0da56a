//! Map controller.
//!
//! The controller composes three layers on one canvas: satellite imagery at
//! the bottom, server-rendered tree tiles above it, and an invisible hit grid
//! on top that turns pointer movement into hover and click events. It also
//! owns the camera policy: where the map opens and where a click flies to.
//!
//! # Lifecycle
//!
//! 1. **Build**: [`MapController::builder`] merges overrides over defaults
//!    and fails if no map library was supplied
//! 2. **Mount**: [`MapController::mount`] creates the canvas, adds the base
//!    layer (and the debug overlay) and sets the default view
//! 3. **Load**: once the base layer reports it loaded, the initial viewport
//!    is fetched and flown to, the load callback fires, and the tile and
//!    grid layers are added
//! 4. **Interact**: grid hover/click events highlight markers and move the
//!    camera
//! 5. **Teardown**: [`MapController::teardown`] cancels pending work and
//!    removes every layer
//!
//! # Example
//!
//! ```ignore
//! use treemap::controller::MapController;
//! use treemap::config::MapOverrides;
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
//! controller.run().await?;
//! ```

mod interaction;
mod layers;

pub use interaction::CLICK_ZOOM_STEP;

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use crate::config::{MapConfig, MapOverrides};
use crate::error::MapError;
use crate::filter::FilterSet;
use crate::geo::{BoundsFitter, MercatorBoundsFitter};
use crate::http::{AsyncHttpClient, Requester};
use crate::map::{EventSink, EventStream, LayerId, MapCanvas, MapEvent, MapLibrary};
use crate::viewport::ViewportInitializer;

/// Callback fired once the initial camera move has been issued.
pub type LoadCallback = Box<dyn FnOnce()>;

/// Handles of the layers the controller manages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerSet {
    pub base: Option<LayerId>,
    pub tile: Option<LayerId>,
    pub grid: Option<LayerId>,
    pub debug: Option<LayerId>,
}

impl LayerSet {
    fn take_all(&mut self) -> [Option<LayerId>; 4] {
        [
            self.grid.take(),
            self.tile.take(),
            self.debug.take(),
            self.base.take(),
        ]
    }
}

/// Interactive map controller.
///
/// Single-threaded: all methods run on the event loop that owns the
/// controller. The only suspension point is the initial summary request.
pub struct MapController<L: MapLibrary, C> {
    config: MapConfig,
    library: L,
    initializer: ViewportInitializer<C>,
    canvas: Option<L::Canvas>,
    target: Option<String>,
    layers: LayerSet,
    /// Highlight marker currently on the canvas
    highlight: Option<LayerId>,
    base_ready_handled: bool,
    on_load: Option<LoadCallback>,
    events_tx: EventSink,
    events_rx: Option<EventStream>,
    /// Cancelled on teardown; bounds every pending operation
    lifetime: CancellationToken,
}

impl<L: MapLibrary, C: AsyncHttpClient> MapController<L, C> {
    pub fn builder() -> MapControllerBuilder<L, C> {
        MapControllerBuilder::new()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Filters derived from the configuration.
    pub fn filters(&self) -> FilterSet {
        FilterSet::from_config(&self.config)
    }

    /// Query-string fragment shared by every server request.
    pub fn filter_parameters(&self) -> String {
        self.filters().to_query()
    }

    pub fn canvas(&self) -> Option<&L::Canvas> {
        self.canvas.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn layers(&self) -> LayerSet {
        self.layers
    }

    /// Handle of the highlight marker, if one is shown.
    pub fn highlight(&self) -> Option<LayerId> {
        self.highlight
    }

    /// Whether the data-dependent tile and grid layers have been added.
    pub fn data_layers_loaded(&self) -> bool {
        self.layers.tile.is_some() && self.layers.grid.is_some()
    }

    /// Sender for feeding events into the controller.
    pub fn event_sink(&self) -> EventSink {
        self.events_tx.clone()
    }

    /// Token cancelled when the controller is torn down. Cancelling it from
    /// outside stops [`MapController::run`] and discards any in-flight
    /// initial-view request.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.lifetime.clone()
    }

    /// Handles one event from the canvas.
    pub async fn handle_event(&mut self, event: MapEvent) -> Result<(), MapError> {
        match event {
            MapEvent::LayerLoaded(id) if self.layers.base == Some(id) => {
                self.on_base_layer_ready().await
            }
            MapEvent::GridHover { layer, cell } if self.layers.grid == Some(layer) => {
                self.on_grid_hover(&cell)
            }
            MapEvent::GridHoverEnd { layer } if self.layers.grid == Some(layer) => {
                self.unhighlight_marker();
                Ok(())
            }
            MapEvent::GridClick { layer, cell } if self.layers.grid == Some(layer) => {
                match cell {
                    Some(cell) => self.click_marker(&cell.click()),
                    None => Ok(()),
                }
            }
            other => {
                trace!(event = ?other, "Ignoring event from unmanaged layer");
                Ok(())
            }
        }
    }

    /// Handles every event already queued, without waiting for more.
    ///
    /// Returns the number of events handled.
    pub async fn process_pending(&mut self) -> Result<usize, MapError> {
        let mut events = self.take_events()?;
        let mut handled = 0;

        while let Ok(event) = events.try_recv() {
            self.dispatch(event).await;
            handled += 1;
        }

        self.events_rx = Some(events);
        Ok(handled)
    }

    /// Runs the event loop until the controller is shut down.
    pub async fn run(&mut self) -> Result<(), MapError> {
        let mut events = self.take_events()?;
        let lifetime = self.lifetime.clone();
        info!("Map event loop started");

        loop {
            let event = tokio::select! {
                biased;
                _ = lifetime.cancelled() => break,
                event = events.recv() => event,
            };

            match event {
                Some(event) => self.dispatch(event).await,
                None => break,
            }
        }

        self.events_rx = Some(events);
        info!("Map event loop stopped");
        Ok(())
    }

    /// Cancels pending work, removes every managed layer and detaches the
    /// canvas, which is handed back to the caller.
    ///
    /// The controller cannot be mounted again afterwards.
    pub fn teardown(&mut self) -> Option<L::Canvas> {
        self.lifetime.cancel();

        let mut canvas = self.canvas.take()?;
        canvas.stop_animation();

        let mut removed = 0;
        let highlight = self.highlight.take();
        for id in std::iter::once(highlight)
            .chain(self.layers.take_all())
            .flatten()
        {
            if canvas.has_layer(id) && canvas.remove_layer(id) {
                removed += 1;
            }
        }

        if let Some(events) = self.events_rx.as_mut() {
            while events.try_recv().is_ok() {}
        }

        info!(
            target = self.target.as_deref().unwrap_or_default(),
            layers_removed = removed,
            "Map controller torn down"
        );
        Some(canvas)
    }

    async fn dispatch(&mut self, event: MapEvent) {
        if let Err(e) = self.handle_event(event).await {
            warn!(error = %e, "Map event handling failed");
        }
    }

    fn take_events(&mut self) -> Result<EventStream, MapError> {
        if self.lifetime.is_cancelled() {
            return Err(MapError::TornDown);
        }
        self.events_rx
            .take()
            .ok_or_else(|| MapError::Config("event stream is already being consumed".to_string()))
    }

    fn canvas_mut(&mut self) -> Result<&mut L::Canvas, MapError> {
        self.canvas.as_mut().ok_or(MapError::NotMounted)
    }
}

impl<L: MapLibrary, C> Drop for MapController<L, C> {
    fn drop(&mut self) {
        self.lifetime.cancel();
    }
}

/// Builder for [`MapController`].
pub struct MapControllerBuilder<L, C> {
    library: Option<L>,
    client: Option<C>,
    defaults: MapConfig,
    overrides: MapOverrides,
    fitter: Arc<dyn BoundsFitter>,
    on_load: Option<LoadCallback>,
}

impl<L: MapLibrary, C: AsyncHttpClient> MapControllerBuilder<L, C> {
    pub fn new() -> Self {
        Self {
            library: None,
            client: None,
            defaults: MapConfig::default(),
            overrides: MapOverrides::default(),
            fitter: Arc::new(MercatorBoundsFitter::default()),
            on_load: None,
        }
    }

    /// Map-rendering library the canvas is created with. Required.
    pub fn library(mut self, library: L) -> Self {
        self.library = Some(library);
        self
    }

    /// HTTP client for API requests. Required.
    pub fn http_client(mut self, client: C) -> Self {
        self.client = Some(client);
        self
    }

    /// Base configuration the overrides are merged onto.
    pub fn defaults(mut self, defaults: MapConfig) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn overrides(mut self, overrides: MapOverrides) -> Self {
        self.overrides = overrides;
        self
    }

    /// Replaces the bounds utility used for the initial viewport.
    pub fn bounds_fitter(mut self, fitter: Arc<dyn BoundsFitter>) -> Self {
        self.fitter = fitter;
        self
    }

    /// Callback fired once, after the initial camera move is issued and
    /// before the data layers load.
    pub fn on_load(mut self, callback: impl FnOnce() + 'static) -> Self {
        self.on_load = Some(Box::new(callback));
        self
    }

    pub fn build(self) -> Result<MapController<L, C>, MapError> {
        let library = self
            .library
            .ok_or_else(|| MapError::Config("map library handle is required".to_string()))?;
        let client = self
            .client
            .ok_or_else(|| MapError::Config("HTTP client is required".to_string()))?;

        let config = MapConfig::merge(self.defaults, self.overrides);
        debug!(config = ?config, "Map controller configured");

        let initializer = ViewportInitializer::new(
            Requester::new(client),
            self.fitter,
            config.api_server_url.clone(),
            config.width,
            config.height,
        );
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        Ok(MapController {
            config,
            library,
            initializer,
            canvas: None,
            target: None,
            layers: LayerSet::default(),
            highlight: None,
            base_ready_handled: false,
            on_load: self.on_load,
            events_tx,
            events_rx: Some(events_rx),
            lifetime: CancellationToken::new(),
        })
    }
}

impl<L: MapLibrary, C: AsyncHttpClient> Default for MapControllerBuilder<L, C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::http::MockAsyncHttpClient;
    use crate::map::HeadlessLibrary;

    pub(crate) type TestController = MapController<HeadlessLibrary, MockAsyncHttpClient>;

    pub(crate) fn controller(overrides: MapOverrides) -> TestController {
        MapController::builder()
            .library(HeadlessLibrary::new())
            .http_client(MockAsyncHttpClient::ok(r#"{"data":[]}"#))
            .overrides(overrides)
            .build()
            .unwrap()
    }

    #[test]
    fn test_missing_library_is_config_error() {
        let result = MapControllerBuilder::<HeadlessLibrary, MockAsyncHttpClient>::new()
            .http_client(MockAsyncHttpClient::ok("{}"))
            .build();
        assert!(matches!(result, Err(MapError::Config(msg)) if msg.contains("library")));
    }

    #[test]
    fn test_missing_client_is_config_error() {
        let result = MapControllerBuilder::<HeadlessLibrary, MockAsyncHttpClient>::new()
            .library(HeadlessLibrary::new())
            .build();
        assert!(matches!(result, Err(MapError::Config(_))));
    }

    #[test]
    fn test_build_merges_overrides() {
        let controller = controller(MapOverrides::new().with_user_id("42").with_debug(false));

        assert_eq!(controller.config().user_id.as_deref(), Some("42"));
        assert!(!controller.config().debug);
        assert_eq!(controller.config().min_zoom, 2);
        assert!(!controller.is_mounted());
    }

    #[test]
    fn test_filter_parameters() {
        assert_eq!(controller(MapOverrides::new()).filter_parameters(), "");
        assert_eq!(
            controller(MapOverrides::new().with_user_id("42")).filter_parameters(),
            "userid=42"
        );
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut controller = controller(MapOverrides::new());
        controller.mount("map").unwrap();
        controller.shutdown_token().cancel();

        // Cancelled before the loop starts: refuses to run
        assert!(matches!(controller.run().await, Err(MapError::TornDown)));
    }

    #[tokio::test]
    async fn test_run_processes_events_until_cancelled() {
        let mut controller = controller(MapOverrides::new());
        controller.mount("map").unwrap();
        let token = controller.shutdown_token();

        let stopper = tokio::spawn(async move {
            tokio::task::yield_now().await;
            token.cancel();
        });

        controller.run().await.unwrap();
        stopper.await.unwrap();

        assert!(controller.data_layers_loaded());
    }

    #[tokio::test]
    async fn test_teardown_removes_everything() {
        let mut controller = controller(MapOverrides::new());
        controller.mount("map").unwrap();
        controller.process_pending().await.unwrap();

        let canvas = controller.teardown().unwrap();

        assert_eq!(canvas.layers().count(), 0);
        assert_eq!(canvas.animations_stopped(), 1);
        assert!(!controller.is_mounted());
        assert_eq!(controller.layers(), LayerSet::default());
        assert!(matches!(controller.mount("map"), Err(MapError::TornDown)));
        assert!(controller.teardown().is_none());
    }
}
