//! Plan command - load the map headlessly and print what it would show.
//!
//! Runs the same load sequence a rendering host would: mount, base layer
//! ready, initial viewport (a real API request when a user scope is set),
//! then the data layers. The resulting camera and layer stack are printed.

use std::fmt::Write as _;
use std::path::Path;

use clap::Args;
use tracing::info;
use treemap::config::MapOverrides;
use treemap::geo::TileCoord;
use treemap::http::{AsyncHttpClient, AsyncReqwestClient};
use treemap::map::{HeadlessCanvas, HeadlessLibrary, LayerSpec};
use treemap::{MapController, MapError};

use crate::error::CliError;
use crate::runner::CliRunner;

/// Container name the headless canvas is mounted on.
const PLAN_TARGET: &str = "map";

/// Arguments for the plan command.
#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Restrict the map to one user's trees
    #[arg(long, env = "TREEMAP_USER_ID")]
    pub user_id: Option<String>,

    /// Tile server base URL (with trailing slash)
    #[arg(long, env = "TREEMAP_TILE_SERVER_URL")]
    pub tile_url: Option<String>,

    /// API server base URL (with trailing slash)
    #[arg(long, env = "TREEMAP_API_SERVER_URL")]
    pub api_url: Option<String>,

    /// Viewport width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Leave out the tile-coordinate overlay
    #[arg(long)]
    pub no_debug: bool,

    /// Also resolve the layer URLs for one tile, as z/x/y
    #[arg(long)]
    pub tile: Option<TileCoord>,
}

impl PlanArgs {
    /// Overrides given on the command line or through the environment.
    pub fn overrides(&self) -> MapOverrides {
        MapOverrides {
            user_id: self.user_id.clone(),
            tile_server_url: self.tile_url.clone(),
            api_server_url: self.api_url.clone(),
            width: self.width,
            height: self.height,
            debug: self.no_debug.then_some(false),
            ..MapOverrides::default()
        }
    }
}

/// Run the plan command.
pub async fn run(
    args: PlanArgs,
    config_path: Option<&Path>,
    verbose: bool,
) -> Result<(), CliError> {
    let runner = CliRunner::new(config_path, verbose)?;
    runner.log_startup("plan");

    let overrides = args.overrides().or(runner.config().map.clone());
    let client = AsyncReqwestClient::new().map_err(CliError::Http)?;

    let mut controller = MapController::builder()
        .library(HeadlessLibrary::new())
        .http_client(client)
        .overrides(overrides)
        .on_load(|| info!("Initial view settled"))
        .build()?;

    controller.mount(PLAN_TARGET)?;

    // Ctrl-C abandons the in-flight summary request
    let token = controller.shutdown_token();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            token.cancel();
        }
    });

    let handled = controller.process_pending().await?;
    interrupt.abort();
    info!(events = handled, "Load sequence processed");

    print!("{}", plan_output(&mut controller, args.tile)?);
    Ok(())
}

/// Renders the loaded map, then tears the controller down.
///
/// Teardown removes every managed layer, so the plan is taken first.
pub fn plan_output<C: AsyncHttpClient>(
    controller: &mut MapController<HeadlessLibrary, C>,
    tile: Option<TileCoord>,
) -> Result<String, CliError> {
    let filters = controller.filter_parameters();
    let canvas = controller.canvas().ok_or(MapError::NotMounted)?;
    let plan = render_plan(canvas, &filters, tile);

    controller.teardown();
    Ok(plan)
}

/// Formats the camera and layer stack of a loaded canvas.
pub fn render_plan(canvas: &HeadlessCanvas, filters: &str, tile: Option<TileCoord>) -> String {
    let mut out = String::new();
    let view = canvas.view();
    let filters = if filters.is_empty() { "(none)" } else { filters };

    let _ = writeln!(out, "Target:  {}", canvas.target());
    let _ = writeln!(out, "Camera:  {}", view);
    let _ = writeln!(out, "Filters: {}", filters);
    let _ = writeln!(out, "Moves:   {}", canvas.moves().len());
    let _ = writeln!(out);
    let _ = writeln!(out, "Layers (bottom to top):");

    for (id, spec) in canvas.layers() {
        let detail = match spec {
            LayerSpec::Satellite { max_zoom } => format!("max zoom {}", max_zoom),
            LayerSpec::Tiles(source) | LayerSpec::Grid(source) => format!(
                "{} (zoom {}-{})",
                source.url_template, source.min_zoom, source.max_zoom
            ),
            LayerSpec::Debug { .. } => "tile coordinates".to_string(),
            LayerSpec::Marker { position, icon } => format!("{} at {}", icon.label, position),
        };
        let (id, kind) = (id.to_string(), spec.kind().to_string());
        let _ = writeln!(out, "  {:<9} {:<10} {}", id, kind, detail);
    }

    if let Some(tile) = tile {
        let _ = writeln!(out);
        let _ = writeln!(out, "Tile {}:", tile);
        for (_, spec) in canvas.layers() {
            let kind = spec.kind().to_string();
            match spec {
                LayerSpec::Tiles(source) | LayerSpec::Grid(source) => {
                    if source.covers_zoom(tile.z) {
                        let _ = writeln!(out, "  {:<10} {}", kind, source.url_for(tile));
                    } else {
                        let _ = writeln!(out, "  {:<10} (outside zoom range)", kind);
                    }
                }
                LayerSpec::Debug { render } => {
                    let _ = writeln!(out, "  {:<10} {}", kind, render(tile).label);
                }
                _ => {}
            }
        }
    }

    out
}
