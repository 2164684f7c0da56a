//! Hover and click handling on the hit grid.
//!
//! At most one highlight marker exists at any time. Hovering a new cell
//! replaces the previous marker, leaving the cell removes it, and a click
//! removes it before flying two zoom levels closer.

use tracing::{debug, warn};

use super::MapController;
use crate::error::MapError;
use crate::http::AsyncHttpClient;
use crate::map::{ClickData, GridCell, HighlightData, LayerId, LayerSpec, MapCanvas, MapLibrary, MarkerIcon};

/// Zoom levels a click moves in by.
pub const CLICK_ZOOM_STEP: f64 = 2.0;

impl<L: MapLibrary, C: AsyncHttpClient> MapController<L, C> {
    /// Shows the highlight marker for `data`, replacing any current one.
    pub fn highlight_marker(&mut self, data: HighlightData) -> Result<LayerId, MapError> {
        let previous = self.highlight.take();
        let canvas = self.canvas_mut()?;

        if let Some(previous) = previous.filter(|id| canvas.has_layer(*id)) {
            canvas.remove_layer(previous);
        }

        let id = canvas.add_layer(LayerSpec::Marker {
            position: data.position(),
            icon: MarkerIcon::cluster(data.count),
        });
        self.highlight = Some(id);

        debug!(layer = %id, count = data.count, "Highlight shown");
        Ok(id)
    }

    /// Removes the highlight marker.
    ///
    /// Logs a warning when there is none to remove. Never fails.
    pub fn unhighlight_marker(&mut self) {
        let highlight = self.highlight.take();
        let removed = match (highlight, self.canvas.as_mut()) {
            (Some(id), Some(canvas)) if canvas.has_layer(id) => canvas.remove_layer(id),
            _ => false,
        };

        if removed {
            debug!("Highlight removed");
        } else {
            warn!("No highlight marker to remove");
        }
    }

    /// Clears the highlight and flies toward the clicked cell.
    ///
    /// The destination is the cell's `zoom_to` point when present, else the
    /// cell itself. Zoom increases by [`CLICK_ZOOM_STEP`].
    pub fn click_marker(&mut self, data: &ClickData) -> Result<(), MapError> {
        self.unhighlight_marker();

        let target = data.target()?;
        let canvas = self.canvas_mut()?;
        let zoom = canvas.zoom() + CLICK_ZOOM_STEP;
        canvas.fly_to(target, zoom);

        debug!(target = %target, zoom = zoom, "Flying to clicked cell");
        Ok(())
    }

    pub(super) fn on_grid_hover(&mut self, cell: &GridCell) -> Result<(), MapError> {
        let data = cell.highlight()?;
        self.highlight_marker(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{controller, TestController};
    use super::*;
    use crate::config::MapOverrides;
    use crate::geo::{LatLng, Viewport};
    use crate::map::{CameraMove, GridCell, LayerKind, MapEvent};

    async fn loaded() -> TestController {
        let mut controller = controller(MapOverrides::new().with_debug(false));
        controller.mount("map").unwrap();
        controller.process_pending().await.unwrap();
        controller
    }

    fn grid(controller: &TestController) -> LayerId {
        controller.layers().grid.unwrap()
    }

    #[tokio::test]
    async fn test_hover_shows_single_marker() {
        let mut controller = loaded().await;
        let layer = grid(&controller);

        for (point, count) in [("POINT(2 1)", 5), ("POINT(4 3)", 1500)] {
            controller
                .handle_event(MapEvent::GridHover {
                    layer,
                    cell: GridCell::new(point, count),
                })
                .await
                .unwrap();
        }

        let canvas = controller.canvas().unwrap();
        let markers = canvas.layers_of(LayerKind::Marker);
        assert_eq!(markers.len(), 1);
        assert_eq!(Some(markers[0].0), controller.highlight());
        match markers[0].1 {
            LayerSpec::Marker { position, icon } => {
                assert_eq!(*position, LatLng::new(3.0, 4.0));
                assert_eq!(icon.label, "2K");
            }
            other => panic!("unexpected layer {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hover_end_removes_marker() {
        let mut controller = loaded().await;
        let layer = grid(&controller);

        controller
            .handle_event(MapEvent::GridHover {
                layer,
                cell: GridCell::new("POINT(2 1)", 5),
            })
            .await
            .unwrap();
        controller
            .handle_event(MapEvent::GridHoverEnd { layer })
            .await
            .unwrap();

        assert!(controller.highlight().is_none());
        assert_eq!(controller.canvas().unwrap().count(LayerKind::Marker), 0);
    }

    #[tokio::test]
    async fn test_hover_end_without_marker_is_harmless() {
        let mut controller = loaded().await;
        let layer = grid(&controller);

        controller
            .handle_event(MapEvent::GridHoverEnd { layer })
            .await
            .unwrap();
        controller.unhighlight_marker();

        assert!(controller.highlight().is_none());
    }

    #[tokio::test]
    async fn test_click_flies_two_levels_in() {
        let mut controller = loaded().await;
        let layer = grid(&controller);
        let zoom = controller.canvas().unwrap().zoom();

        controller
            .handle_event(MapEvent::GridHover {
                layer,
                cell: GridCell::new("POINT(2 1)", 5),
            })
            .await
            .unwrap();
        controller
            .handle_event(MapEvent::GridClick {
                layer,
                cell: Some(GridCell::new("POINT(2 1)", 5)),
            })
            .await
            .unwrap();

        let canvas = controller.canvas().unwrap();
        assert_eq!(
            canvas.moves().last(),
            Some(&CameraMove::Fly(Viewport::new(
                LatLng::new(1.0, 2.0),
                zoom + 2.0
            )))
        );
        assert_eq!(canvas.count(LayerKind::Marker), 0);
    }

    #[tokio::test]
    async fn test_click_prefers_zoom_to() {
        let mut controller = loaded().await;

        controller
            .click_marker(&GridCell::new("POINT(2 1)", 40).with_zoom_to("POINT(20 10)").click())
            .unwrap();

        let view = controller.canvas().unwrap().view();
        assert_eq!(view.center, LatLng::new(10.0, 20.0));
    }

    #[tokio::test]
    async fn test_click_on_empty_pixel_does_nothing() {
        let mut controller = loaded().await;
        let layer = grid(&controller);
        let moves = controller.canvas().unwrap().moves().len();

        controller
            .handle_event(MapEvent::GridClick { layer, cell: None })
            .await
            .unwrap();

        assert_eq!(controller.canvas().unwrap().moves().len(), moves);
    }

    #[tokio::test]
    async fn test_malformed_hover_is_an_error() {
        let mut controller = loaded().await;
        let layer = grid(&controller);

        let result = controller
            .handle_event(MapEvent::GridHover {
                layer,
                cell: GridCell::new("garbage", 1),
            })
            .await;

        assert!(matches!(result, Err(MapError::Geometry(_))));
        assert!(controller.highlight().is_none());
    }

    #[tokio::test]
    async fn test_events_from_other_layers_ignored() {
        let mut controller = loaded().await;

        controller
            .handle_event(MapEvent::GridHover {
                layer: LayerId(999),
                cell: GridCell::new("POINT(2 1)", 5),
            })
            .await
            .unwrap();

        assert!(controller.highlight().is_none());
    }

    #[test]
    fn test_highlight_requires_mount() {
        let mut controller = controller(MapOverrides::new());
        let data = HighlightData {
            lat: 1.0,
            lon: 2.0,
            count: 1,
        };
        assert_eq!(controller.highlight_marker(data), Err(MapError::NotMounted));
    }
}
