//! Geometry model and the `(lon, lat)` → `(lat, lng)` normalizer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A geographic point in `(lat, lng)` order, the only order the rendering
/// boundary ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a point from a `(lon, lat)` pair, reversing the pair order.
    #[inline]
    pub fn from_lon_lat(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[1],
            lng: pair[0],
        }
    }

    /// Converts back to a `(lon, lat)` pair. Reversing twice restores the
    /// original pair.
    #[inline]
    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

/// The three supported shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Polygon,
    MultiPolygon,
    /// Coordinates that already arrived flattened as `(lon, lat)` pairs, e.g.
    /// from the remote query source.
    PreNormalized,
}

#[derive(Debug, Error)]
pub enum GeometryError {
    /// Shape kind outside the three supported kinds. Fatal to that feature's
    /// rendering, non-fatal to the rest of the dataset.
    #[error("unsupported geometry kind '{0}'")]
    UnsupportedKind(String),
    /// Coordinates that do not decode at the nesting depth the kind implies.
    #[error("{kind:?} coordinates do not match the expected nesting: {detail}")]
    InvalidCoordinates { kind: GeometryKind, detail: String },
    /// Normalization produced no points; such a geometry is unrenderable.
    #[error("geometry has no coordinate pairs")]
    Empty,
}

/// A normalized geometry: an ordered, non-empty `(lat, lng)` point sequence.
///
/// Values only exist post-normalization, so the non-empty invariant holds by
/// construction. First and last point need not coincide; ring closure is not
/// enforced downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    kind: GeometryKind,
    points: Vec<LatLng>,
}

impl Geometry {
    fn from_points(kind: GeometryKind, points: Vec<LatLng>) -> Result<Self, GeometryError> {
        if points.is_empty() {
            return Err(GeometryError::Empty);
        }
        Ok(Self { kind, points })
    }

    /// Normalizes pre-flattened `(lon, lat)` pairs: per-pair reversal only,
    /// no flattening.
    pub fn pre_normalized(pairs: &[[f64; 2]]) -> Result<Self, GeometryError> {
        Self::from_points(
            GeometryKind::PreNormalized,
            pairs.iter().copied().map(LatLng::from_lon_lat).collect(),
        )
    }

    pub fn kind(&self) -> GeometryKind {
        self.kind
    }

    pub fn points(&self) -> &[LatLng] {
        &self.points
    }
}

/// Raw geometry as it appears in a GeoJSON-like document: a kind string plus
/// nested coordinate arrays in `(lon, lat)` order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGeometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: serde_json::Value,
}

impl RawGeometry {
    /// Normalizes into one canonical `(lat, lng)` sequence.
    ///
    /// - `Polygon`: ring nesting is flattened by exactly one level, then each
    ///   pair is reversed. Sequence order is preserved.
    /// - `MultiPolygon`: flattened by two levels (rings within polygons), then
    ///   the same per-pair reversal. All rings of a feature merge into one
    ///   renderable outline; hole and disjoint-region topology is not
    ///   preserved. Known lossy behavior, kept deliberately — see DESIGN.md.
    ///
    /// Pure: identical input always yields identical output ordering.
    pub fn normalize(&self) -> Result<Geometry, GeometryError> {
        match self.kind.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<[f64; 2]>> = self.decode(GeometryKind::Polygon)?;
                Geometry::from_points(
                    GeometryKind::Polygon,
                    rings
                        .into_iter()
                        .flatten()
                        .map(LatLng::from_lon_lat)
                        .collect(),
                )
            }
            "MultiPolygon" => {
                let polygons: Vec<Vec<Vec<[f64; 2]>>> = self.decode(GeometryKind::MultiPolygon)?;
                Geometry::from_points(
                    GeometryKind::MultiPolygon,
                    polygons
                        .into_iter()
                        .flatten()
                        .flatten()
                        .map(LatLng::from_lon_lat)
                        .collect(),
                )
            }
            other => Err(GeometryError::UnsupportedKind(other.to_string())),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(
        &self,
        kind: GeometryKind,
    ) -> Result<T, GeometryError> {
        serde_json::from_value(self.coordinates.clone()).map_err(|err| {
            GeometryError::InvalidCoordinates {
                kind,
                detail: err.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(kind: &str, coordinates: serde_json::Value) -> RawGeometry {
        RawGeometry {
            kind: kind.to_string(),
            coordinates,
        }
    }

    #[test]
    fn polygon_reverses_each_pair_preserving_sequence_order() {
        let geometry = raw("Polygon", json!([[[0, 0], [0, 1], [1, 1], [1, 0]]]))
            .normalize()
            .unwrap();

        assert_eq!(geometry.kind(), GeometryKind::Polygon);
        assert_eq!(
            geometry.points(),
            &[
                LatLng::new(0.0, 0.0),
                LatLng::new(1.0, 0.0),
                LatLng::new(1.0, 1.0),
                LatLng::new(0.0, 1.0),
            ]
        );
    }

    #[test]
    fn multipolygon_concatenates_all_rings() {
        let geometry = raw(
            "MultiPolygon",
            json!([[[[1, 2], [3, 4]]], [[[5, 6]], [[7, 8], [9, 10]]]]),
        )
        .normalize()
        .unwrap();

        // Total point count is the sum of all ring lengths, in ring order.
        assert_eq!(
            geometry.points(),
            &[
                LatLng::new(2.0, 1.0),
                LatLng::new(4.0, 3.0),
                LatLng::new(6.0, 5.0),
                LatLng::new(8.0, 7.0),
                LatLng::new(10.0, 9.0),
            ]
        );
    }

    #[test]
    fn pre_normalized_reverses_without_flattening() {
        let geometry = Geometry::pre_normalized(&[[10.0, 20.0]]).unwrap();

        assert_eq!(geometry.kind(), GeometryKind::PreNormalized);
        assert_eq!(geometry.points(), &[LatLng::new(20.0, 10.0)]);
    }

    #[test]
    fn pair_reversal_is_its_own_inverse() {
        let original = [3.5977, 18.4721];
        assert_eq!(LatLng::from_lon_lat(original).to_lon_lat(), original);
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = raw("Point", json!([1, 2])).normalize().unwrap_err();
        assert!(matches!(err, GeometryError::UnsupportedKind(kind) if kind == "Point"));
    }

    #[test]
    fn wrong_nesting_is_rejected() {
        let err = raw("Polygon", json!([[1, 2], [3, 4]])).normalize().unwrap_err();
        assert!(matches!(err, GeometryError::InvalidCoordinates { .. }));
    }

    #[test]
    fn empty_geometry_is_rejected() {
        let err = raw("Polygon", json!([])).normalize().unwrap_err();
        assert!(matches!(err, GeometryError::Empty));

        let err = Geometry::pre_normalized(&[]).unwrap_err();
        assert!(matches!(err, GeometryError::Empty));
    }
}
