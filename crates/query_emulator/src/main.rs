//! Development emulator for the remote boundary query service.
//!
//! Serves the `getCoordinatesSections { geometryInFormatLatLong }` selection
//! from a bundled dataset file so the viewer's remote variant can be exercised
//! without the real collaborator.

use anyhow::{anyhow, Context};
use axum::{extract::State, routing::post, Json, Router};
use geobound::document::{CoordinateSection, DocumentData, SectionEnvelope};
use geobound::{parse_document, BoundaryDocument};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Debug)]
struct Config {
    listen: String,
    dataset: PathBuf,
}

impl Config {
    fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            listen: std::env::var("EMULATOR_LISTEN_ADDR")
                .unwrap_or_else(|_| "127.0.0.1:4000".into()),
            dataset: std::env::var("EMULATOR_DATASET_PATH")
                .map_err(|_| anyhow!("EMULATOR_DATASET_PATH required"))?
                .into(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    let cfg = Config::from_env()?;
    tracing::info!(config = ?cfg, "Starting boundary query emulator");

    let text = std::fs::read_to_string(&cfg.dataset)
        .with_context(|| format!("Failed to read dataset {:?}", cfg.dataset))?;
    let document = parse_document(&text)?;
    let envelope = sections_from_document(&document);
    tracing::info!(sections = envelope.sections.len(), "Dataset ready");

    let app = Router::new()
        .route("/graphql", post(serve_sections))
        .with_state(Arc::new(envelope));

    let listener = tokio::net::TcpListener::bind(&cfg.listen).await?;
    tracing::info!(addr = cfg.listen, "Query emulator listening");
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

/// Answers every query with the full section list in the `data` envelope the
/// viewer expects.
async fn serve_sections(State(envelope): State<Arc<SectionEnvelope>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "data": &*envelope }))
}

/// Converts whichever bundled shape was configured into the wire envelope.
/// Feature geometry is normalized first, then flattened back to `(lon, lat)`
/// pairs, matching what the real service returns.
fn sections_from_document(document: &BoundaryDocument) -> SectionEnvelope {
    match &document.data {
        DocumentData::Sections(envelope) => envelope.clone(),
        DocumentData::Features(raw) => {
            let sections = raw
                .iter()
                .enumerate()
                .filter_map(|(index, entry)| match entry.geometry.normalize() {
                    Ok(geometry) => Some(CoordinateSection {
                        pairs: geometry.points().iter().map(|p| p.to_lon_lat()).collect(),
                    }),
                    Err(err) => {
                        tracing::warn!(index, error = %err, "Skipping feature without usable geometry");
                        None
                    }
                })
                .collect();
            SectionEnvelope { sections }
        }
    }
}
