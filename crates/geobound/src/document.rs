//! Bundled boundary document parsing.
//!
//! A document carries a top-level `data` field in one of two shapes: an
//! ordered list of GeoJSON-like features, or a coordinate-section envelope as
//! returned by the remote query service. Both are described in the crate docs.

use crate::geometry::RawGeometry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to parse boundary document: {0}")]
pub struct DocumentError(#[from] serde_json::Error);

/// Top-level bundled document.
#[derive(Debug, Clone, Deserialize)]
pub struct BoundaryDocument {
    pub data: DocumentData,
}

/// The two accepted `data` payload shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DocumentData {
    Features(Vec<RawFeature>),
    Sections(SectionEnvelope),
}

/// One GeoJSON-like feature as stored in a bundled dataset. The `type` tag is
/// carried but not validated; only the geometry kind matters downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeature {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// `null` and absent properties both collapse to the empty mapping.
    #[serde(default)]
    pub properties: Option<crate::feature::FeatureProperties>,
    pub geometry: RawGeometry,
}

/// The `getCoordinatesSections` envelope, shared by the remote query response
/// and the pre-normalized bundled dataset shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionEnvelope {
    #[serde(rename = "getCoordinatesSections")]
    pub sections: Vec<CoordinateSection>,
}

/// One section: pre-flattened `(lon, lat)` pairs despite the field name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinateSection {
    #[serde(rename = "geometryInFormatLatLong")]
    pub pairs: Vec<[f64; 2]>,
}

pub fn parse_document(text: &str) -> Result<BoundaryDocument, DocumentError> {
    Ok(serde_json::from_str(text)?)
}
