//! Events emitted by the map library and the payloads they carry.

use serde::Deserialize;
use tokio::sync::mpsc;

use super::layer::LayerId;
use crate::geo::{parse_point, GeometryError, LatLng};

/// Channel end the map library pushes events into.
pub type EventSink = mpsc::UnboundedSender<MapEvent>;

/// Receiving end owned by the controller.
pub type EventStream = mpsc::UnboundedReceiver<MapEvent>;

/// Something happened on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// A layer finished loading its first view
    LayerLoaded(LayerId),
    /// Click on a hit-grid layer; `cell` is `None` over empty pixels
    GridClick {
        layer: LayerId,
        cell: Option<GridCell>,
    },
    /// Pointer entered a hit-grid cell
    GridHover { layer: LayerId, cell: GridCell },
    /// Pointer left the hovered cell
    GridHoverEnd { layer: LayerId },
}

/// Per-cell payload served by the `.grid.json` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GridCell {
    /// Serialized point geometry of the cell's tree or cluster
    pub latlon: String,
    /// Number of trees behind the cell
    #[serde(default)]
    pub count: u64,
    /// Serialized point to drill into for nested clusters
    #[serde(default)]
    pub zoom_to: Option<String>,
}

impl GridCell {
    pub fn new(latlon: impl Into<String>, count: u64) -> Self {
        Self {
            latlon: latlon.into(),
            count,
            zoom_to: None,
        }
    }

    pub fn with_zoom_to(mut self, zoom_to: impl Into<String>) -> Self {
        self.zoom_to = Some(zoom_to.into());
        self
    }

    /// Decodes the cell into highlight data.
    pub fn highlight(&self) -> Result<HighlightData, GeometryError> {
        let position = parse_point(&self.latlon)?;
        Ok(HighlightData {
            lat: position.lat,
            lon: position.lng,
            count: self.count,
        })
    }

    pub fn click(&self) -> ClickData {
        ClickData {
            latlon: self.latlon.clone(),
            zoom_to: self.zoom_to.clone(),
        }
    }
}

/// Position and count of the marker shown while hovering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightData {
    pub lat: f64,
    pub lon: f64,
    pub count: u64,
}

impl HighlightData {
    pub fn position(&self) -> LatLng {
        LatLng::new(self.lat, self.lon)
    }
}

/// Payload of a click on the hit grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickData {
    pub latlon: String,
    pub zoom_to: Option<String>,
}

impl ClickData {
    /// Where the camera should fly: the nested-cluster target when present,
    /// otherwise the clicked position.
    pub fn target(&self) -> Result<LatLng, GeometryError> {
        match self.zoom_to.as_deref() {
            Some(zoom_to) => parse_point(zoom_to),
            None => parse_point(&self.latlon),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_cell_deserialize() {
        let cell: GridCell = serde_json::from_str(
            r#"{"latlon":"{\"type\":\"Point\",\"coordinates\":[2,1]}","count":5,"id":99}"#,
        )
        .unwrap();

        assert_eq!(cell.count, 5);
        assert!(cell.zoom_to.is_none());
        assert_eq!(
            cell.highlight().unwrap(),
            HighlightData {
                lat: 1.0,
                lon: 2.0,
                count: 5
            }
        );
    }

    #[test]
    fn test_click_target_prefers_zoom_to() {
        let click = GridCell::new("POINT(2 1)", 40)
            .with_zoom_to("POINT(20 10)")
            .click();
        assert_eq!(click.target().unwrap(), LatLng::new(10.0, 20.0));
    }

    #[test]
    fn test_click_target_falls_back_to_latlon() {
        let click = GridCell::new("POINT(2 1)", 1).click();
        assert_eq!(click.target().unwrap(), LatLng::new(1.0, 2.0));
    }

    #[test]
    fn test_malformed_latlon_fails_highlight() {
        let cell = GridCell::new("not a point", 3);
        assert!(cell.highlight().is_err());
        assert!(cell.click().target().is_err());
    }
}
