//! Layer orchestration: mounting, the one-time load sequence and the
//! data-dependent tile layers.

use tracing::{debug, info, trace, warn};

use super::MapController;
use crate::error::MapError;
use crate::http::AsyncHttpClient;
use crate::map::{debug_tile, CanvasOptions, LayerSpec, MapCanvas, MapLibrary, TileSource};

impl<L: MapLibrary, C: AsyncHttpClient> MapController<L, C> {
    /// Creates the canvas inside `target` and adds the base layer.
    ///
    /// The debug overlay is added when enabled, and the camera starts at the
    /// configured center at minimum zoom. The tile and grid layers follow
    /// once the base layer reports that it loaded.
    ///
    /// # Errors
    ///
    /// - [`MapError::TornDown`] after [`MapController::teardown`]
    /// - [`MapError::AlreadyMounted`] when a canvas already exists
    /// - [`MapError::Canvas`] when the library cannot create the canvas
    pub fn mount(&mut self, target: &str) -> Result<(), MapError> {
        if self.lifetime.is_cancelled() {
            return Err(MapError::TornDown);
        }
        if let Some(existing) = &self.target {
            return Err(MapError::AlreadyMounted(existing.clone()));
        }

        let options = CanvasOptions {
            min_zoom: self.config.min_zoom,
            center: self.config.initial_center,
        };
        let mut canvas = self
            .library
            .create_canvas(target, options, self.events_tx.clone())?;

        let base = canvas.add_layer(LayerSpec::Satellite {
            max_zoom: self.config.max_zoom,
        });
        self.layers.base = Some(base);
        self.canvas = Some(canvas);
        self.target = Some(target.to_string());

        if self.config.debug {
            self.load_debug_layer()?;
        }

        let (center, zoom) = (self.config.initial_center, self.config.min_zoom as f64);
        self.canvas_mut()?.set_view(center, zoom);

        info!(
            target = target,
            base = %base,
            center = %center,
            zoom = zoom,
            "Map mounted"
        );
        Ok(())
    }

    /// Load sequence, run once when the base layer first reports loaded.
    ///
    /// Fetches the initial viewport (skipped without a user scope), flies
    /// to it, fires the load callback and adds the data layers. A failed
    /// summary request leaves the default view in place. If the controller
    /// is torn down while the request is in flight, the result is discarded
    /// and nothing further happens.
    pub(super) async fn on_base_layer_ready(&mut self) -> Result<(), MapError> {
        if self.base_ready_handled {
            trace!("Base layer reloaded, load sequence already ran");
            return Ok(());
        }
        self.base_ready_handled = true;
        debug!("Base layer loaded");

        let filters = self.filters();
        let lifetime = self.lifetime.clone();
        let view = tokio::select! {
            biased;
            _ = lifetime.cancelled() => {
                debug!("Controller torn down, initial view discarded");
                return Ok(());
            }
            result = self.initializer.initial_view(&filters) => result,
        };

        match view {
            Ok(Some(viewport)) => {
                info!(viewport = %viewport, "Flying to initial view");
                self.canvas_mut()?.fly_to(viewport.center, viewport.zoom);
            }
            Ok(None) => debug!("No initial view, keeping default"),
            Err(e) => warn!(error = %e, "Initial view request failed, keeping default"),
        }

        if let Some(callback) = self.on_load.take() {
            callback();
        }

        self.load_tile_server()
    }

    /// Adds the tree tile layer and the hit grid above it.
    ///
    /// URLs carry the filter parameters current at call time. Layers from a
    /// previous call are replaced.
    pub fn load_tile_server(&mut self) -> Result<(), MapError> {
        let filters = self.filters();
        let base_url = self.config.tile_server_url.clone();
        let (min_zoom, max_zoom) = (self.config.min_zoom, self.config.max_zoom);

        let tiles = TileSource::new(
            filters.apply_to(&format!("{}{{z}}/{{x}}/{{y}}.png", base_url)),
            min_zoom,
            max_zoom,
        );
        let grid = TileSource::new(
            filters.apply_to(&format!("{}{{z}}/{{x}}/{{y}}.grid.json", base_url)),
            min_zoom,
            max_zoom,
        );
        debug!(tiles = %tiles.url_template, grid = %grid.url_template, "Tile sources");

        let previous = [self.layers.tile.take(), self.layers.grid.take()];
        let canvas = self.canvas_mut()?;
        for id in previous.into_iter().flatten() {
            canvas.remove_layer(id);
        }

        let tile = canvas.add_layer(LayerSpec::Tiles(tiles));
        let grid = canvas.add_layer(LayerSpec::Grid(grid));
        self.layers.tile = Some(tile);
        self.layers.grid = Some(grid);

        info!(tiles = %tile, grid = %grid, "Tree layers loaded");
        Ok(())
    }

    /// Adds the tile-address overlay. No-op when it is already shown.
    pub fn load_debug_layer(&mut self) -> Result<(), MapError> {
        if self.layers.debug.is_some() {
            return Ok(());
        }

        let id = self
            .canvas_mut()?
            .add_layer(LayerSpec::Debug { render: debug_tile });
        self.layers.debug = Some(id);
        debug!(layer = %id, "Debug overlay loaded");
        Ok(())
    }
}
