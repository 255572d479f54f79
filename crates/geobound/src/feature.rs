//! Renderable map features: properties, generated ids, normalized geometry.

use crate::document::{CoordinateSection, RawFeature};
use crate::geometry::{Geometry, GeometryError};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque per-render-instance feature identity. Generated, never parsed from
/// a dataset, and not semantically meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FeatureId(Uuid);

impl FeatureId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Domain attributes of a neighborhood, deserialized from the dataset's
/// uppercase field names. All fields are optional; the remote source carries
/// none of them. Fields outside the known set are kept in `extra` so no
/// consumer silently loses information.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureProperties {
    #[serde(rename = "BARRIO", default)]
    pub name: Option<String>,
    #[serde(rename = "COMUNA", default)]
    pub district: Option<u32>,
    #[serde(rename = "PERIMETRO", default)]
    pub perimeter: Option<f64>,
    #[serde(rename = "AREA", default)]
    pub area: Option<f64>,
    #[serde(rename = "OBJETO", default)]
    pub category: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl FeatureProperties {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.district.is_none()
            && self.perimeter.is_none()
            && self.area.is_none()
            && self.category.is_none()
            && self.extra.is_empty()
    }
}

/// One renderable map entity. Immutable after construction; every source load
/// builds fresh values with fresh ids.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    id: FeatureId,
    properties: FeatureProperties,
    geometry: Geometry,
}

impl Feature {
    pub fn new(properties: FeatureProperties, geometry: Geometry) -> Self {
        Self {
            id: FeatureId::generate(),
            properties,
            geometry,
        }
    }

    /// Builds a feature from a bundled GeoJSON-like entry, normalizing its
    /// geometry. Fails per feature; the caller decides to drop or abort.
    pub fn from_raw(raw: &RawFeature) -> Result<Self, GeometryError> {
        let geometry = raw.geometry.normalize()?;
        Ok(Self::new(
            raw.properties.clone().unwrap_or_default(),
            geometry,
        ))
    }

    /// Builds a feature from one remote coordinate section: empty properties,
    /// pre-normalized geometry.
    pub fn from_section(section: &CoordinateSection) -> Result<Self, GeometryError> {
        Ok(Self::new(
            FeatureProperties::default(),
            Geometry::pre_normalized(&section.pairs)?,
        ))
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn properties(&self) -> &FeatureProperties {
        &self.properties
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometryKind, LatLng, RawGeometry};
    use serde_json::json;

    fn square() -> RawFeature {
        RawFeature {
            kind: Some("Feature".to_string()),
            properties: Some(FeatureProperties {
                name: Some("CHACARITA".to_string()),
                ..FeatureProperties::default()
            }),
            geometry: RawGeometry {
                kind: "Polygon".to_string(),
                coordinates: json!([[[0, 0], [0, 1], [1, 1], [1, 0]]]),
            },
        }
    }

    #[test]
    fn from_raw_normalizes_geometry() {
        let feature = Feature::from_raw(&square()).unwrap();

        assert_eq!(feature.properties().name.as_deref(), Some("CHACARITA"));
        assert_eq!(feature.geometry().kind(), GeometryKind::Polygon);
        assert_eq!(feature.geometry().points()[1], LatLng::new(1.0, 0.0));
    }

    #[test]
    fn ids_are_unique_per_construction() {
        let raw = square();
        let first = Feature::from_raw(&raw).unwrap();
        let second = Feature::from_raw(&raw).unwrap();
        assert_ne!(first.id(), second.id());
    }

    #[test]
    fn from_section_has_empty_properties_and_reversed_pairs() {
        let section = CoordinateSection {
            pairs: vec![[10.0, 20.0]],
        };
        let feature = Feature::from_section(&section).unwrap();

        assert!(feature.properties().is_empty());
        assert_eq!(feature.geometry().kind(), GeometryKind::PreNormalized);
        assert_eq!(feature.geometry().points(), &[LatLng::new(20.0, 10.0)]);
    }

    #[test]
    fn unsupported_geometry_fails_the_single_feature() {
        let mut raw = square();
        raw.geometry.kind = "GeometryCollection".to_string();
        assert!(Feature::from_raw(&raw).is_err());
    }
}
