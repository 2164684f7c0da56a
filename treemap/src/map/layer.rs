//! Layer descriptions handed to the map library.

use std::fmt;

use crate::cluster::{format_cluster_text, ClusterSize};
use crate::geo::{LatLng, TileCoord};

/// Handle of a layer on a canvas, assigned by the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Renderer for the debug overlay: one visual per tile.
pub type DebugRenderer = fn(TileCoord) -> DebugTile;

/// A layer as data. The map library decides how to draw it.
#[derive(Debug, Clone)]
pub enum LayerSpec {
    /// Satellite base imagery
    Satellite { max_zoom: u8 },
    /// Server-rendered raster tiles
    Tiles(TileSource),
    /// Interactive hit-grid overlay; emits hover and click events
    Grid(TileSource),
    /// Custom per-tile overlay drawn by a pure renderer
    Debug { render: DebugRenderer },
    /// Single marker at a position
    Marker { position: LatLng, icon: MarkerIcon },
}

impl LayerSpec {
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Satellite { .. } => LayerKind::Satellite,
            Self::Tiles(_) => LayerKind::Tiles,
            Self::Grid(_) => LayerKind::Grid,
            Self::Debug { .. } => LayerKind::Debug,
            Self::Marker { .. } => LayerKind::Marker,
        }
    }

    /// Tile source of raster and grid layers.
    pub fn source(&self) -> Option<&TileSource> {
        match self {
            Self::Tiles(source) | Self::Grid(source) => Some(source),
            _ => None,
        }
    }
}

/// Discriminant of [`LayerSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Satellite,
    Tiles,
    Grid,
    Debug,
    Marker,
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Satellite => "satellite",
            Self::Tiles => "tiles",
            Self::Grid => "grid",
            Self::Debug => "debug",
            Self::Marker => "marker",
        };
        f.write_str(name)
    }
}

/// URL template plus zoom range of a tiled layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileSource {
    /// Template containing `{z}`, `{x}` and `{y}` placeholders
    pub url_template: String,
    pub min_zoom: u8,
    pub max_zoom: u8,
}

impl TileSource {
    pub fn new(url_template: impl Into<String>, min_zoom: u8, max_zoom: u8) -> Self {
        Self {
            url_template: url_template.into(),
            min_zoom,
            max_zoom,
        }
    }

    /// Resolves the template for one tile.
    pub fn url_for(&self, tile: TileCoord) -> String {
        self.url_template
            .replace("{z}", &tile.z.to_string())
            .replace("{x}", &tile.x.to_string())
            .replace("{y}", &tile.y.to_string())
    }

    pub fn covers_zoom(&self, zoom: u8) -> bool {
        (self.min_zoom..=self.max_zoom).contains(&zoom)
    }
}

/// CSS class of the highlight marker container.
pub const HIGHLIGHT_CLASS: &str = "cluster-highlight";

/// Icon of the highlight marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerIcon {
    pub class_name: String,
    pub label: String,
    pub size: ClusterSize,
}

impl MarkerIcon {
    /// Icon labelled with a cluster count.
    pub fn cluster(count: u64) -> Self {
        Self {
            class_name: HIGHLIGHT_CLASS.to_string(),
            label: format_cluster_text(count),
            size: ClusterSize::for_count(count),
        }
    }

    /// Markup of the marker box.
    pub fn html(&self) -> String {
        let size = self.size.css_class();
        let classes = if size.is_empty() {
            format!("{}-box", self.class_name)
        } else {
            format!("{}-box {}", self.class_name, size)
        };
        format!(r#"<div class="{}"><div>{}</div></div>"#, classes, self.label)
    }
}

/// Visual content of one debug tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugTile {
    pub label: String,
    pub outline: &'static str,
    pub font_weight: &'static str,
    pub font_size: &'static str,
    pub color: &'static str,
}

/// Renders the debug overlay for one tile: its `z/x/y` address inside a
/// green outline.
pub fn debug_tile(tile: TileCoord) -> DebugTile {
    DebugTile {
        label: tile.to_string(),
        outline: "1px solid green",
        font_weight: "bold",
        font_size: "14pt",
        color: "white",
    }
}
