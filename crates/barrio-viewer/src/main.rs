//! Entry point for the dual-map boundary viewer.
//!
//! Runs the full pipeline headlessly against a [`LogSurface`]: load the
//! configured source, render the overview, and report the result. A real map
//! widget plugs in through the same [`RenderSurface`] trait.

use anyhow::{bail, Result};
use barrio_viewer::app::DualMapApp;
use barrio_viewer::data::SourceConfig;
use barrio_viewer::render::LogSurface;
use clap::Parser;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// `barrio_viewer` - synchronized overview/detail neighborhood maps.
///
/// Exactly one source must be configured: a bundled dataset document (or a
/// directory of them), a bundled pre-normalized dataset, or a remote query
/// endpoint.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a bundled boundary dataset (GeoJSON-like `data` list).
    #[arg(long, env = "BARRIO_DATASET")]
    dataset: Option<PathBuf>,

    /// Path to a bundled dataset already in coordinate-section shape.
    #[arg(long, env = "BARRIO_DATASET_PRENORMALIZED", conflicts_with = "dataset")]
    dataset_prenormalized: Option<PathBuf>,

    /// URL of the remote boundary query service.
    #[arg(
        long,
        env = "BARRIO_QUERY_ENDPOINT",
        conflicts_with_all = ["dataset", "dataset_prenormalized"]
    )]
    endpoint: Option<String>,

    /// How long to wait for the remote fetch before giving up.
    #[arg(long, env = "BARRIO_FETCH_WAIT_MS", default_value_t = 10_000)]
    fetch_wait_ms: u64,
}

impl Cli {
    fn source(&self) -> Result<SourceConfig> {
        match (&self.dataset, &self.dataset_prenormalized, &self.endpoint) {
            (Some(path), None, None) => Ok(SourceConfig::Static { path: path.clone() }),
            (None, Some(path), None) => Ok(SourceConfig::StaticPrenormalized { path: path.clone() }),
            (None, None, Some(endpoint)) => Ok(SourceConfig::Remote {
                endpoint: endpoint.clone(),
            }),
            _ => bail!(
                "exactly one of --dataset, --dataset-prenormalized or --endpoint is required"
            ),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging; default to "info" if RUST_LOG is unset.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut app = DualMapApp::new(cli.source()?);

    app.start_load();

    // Stand-in for the widget event loop: pump fetch completions until the
    // load cycle reaches a terminal state.
    let deadline = Instant::now() + Duration::from_millis(cli.fetch_wait_ms);
    while !app.load_state().is_terminal() {
        if Instant::now() >= deadline {
            log::warn!("Remote fetch still pending after {} ms", cli.fetch_wait_ms);
            break;
        }
        app.pump();
        std::thread::sleep(Duration::from_millis(25));
    }

    let mut overview = LogSurface::new("overview");
    let mut detail = LogSurface::new("detail");
    app.render_overview(&mut overview);
    app.render_detail(&mut detail);

    if let Some(features) = app.load_state().features() {
        log::info!("Viewer ready with {} renderable features", features.len());
    }

    Ok(())
}
