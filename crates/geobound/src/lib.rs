//! Neighborhood boundary data model and coordinate normalization.
//!
//! - Parses bundled boundary documents: a top-level `data` field holding
//!   either GeoJSON-like features or pre-flattened coordinate sections.
//! - Normalizes every supported geometry into one canonical ordered
//!   `(lat, lng)` point sequence per feature, ready for rendering.
//! - Builds immutable [`Feature`] values with generated ids; a fresh value is
//!   constructed on every source load.
//!
//! Accepted document shapes (JSON):
//!
//! ```text
//! { "data": [ { "type": "Feature",
//!               "properties": { "BARRIO": ..., "COMUNA": ..., ... },
//!               "geometry": { "type": "Polygon" | "MultiPolygon",
//!                             "coordinates": [...] } }, ... ] }
//!
//! { "data": { "getCoordinatesSections": [
//!               { "geometryInFormatLatLong": [[lon, lat], ...] }, ... ] } }
//! ```
//!
//! GeoJSON-kind coordinates arrive in `(lon, lat)` order and are reversed
//! per pair during normalization; section pairs arrive in `(lon, lat)` order
//! as well and need the same per-pair reversal, but no flattening.

pub mod document;
pub mod feature;
pub mod geometry;

// Re-export the types nearly every consumer touches.
pub use self::document::{parse_document, BoundaryDocument, DocumentData, DocumentError};
pub use self::feature::{Feature, FeatureId, FeatureProperties};
pub use self::geometry::{Geometry, GeometryError, GeometryKind, LatLng};
