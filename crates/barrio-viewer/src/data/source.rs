//! Feature Source Adapter: three source variants, one load contract.

use crate::net::FetchError;
use geobound::document::{CoordinateSection, DocumentData, RawFeature};
use geobound::{parse_document, DocumentError, Feature};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Where features come from. Every variant resolves to the same ordered
/// feature list; the coordinator stays variant-agnostic.
#[derive(Debug, Clone)]
pub enum SourceConfig {
    /// Bundled document whose `data` is a GeoJSON-like feature list.
    Static { path: PathBuf },
    /// Bundled document whose `data` already carries coordinate sections.
    StaticPrenormalized { path: PathBuf },
    /// Remote boundary query service, fetched asynchronously once per mount.
    Remote { endpoint: String },
}

impl SourceConfig {
    pub fn describe(&self) -> String {
        match self {
            Self::Static { path } => format!("bundled dataset {}", path.display()),
            Self::StaticPrenormalized { path } => {
                format!("bundled pre-normalized dataset {}", path.display())
            }
            Self::Remote { endpoint } => format!("remote query {endpoint}"),
        }
    }
}

/// Load lifecycle of one mount: `Idle -> Loading -> Loaded | Failed`, with
/// the terminal states final. The maps render the loading indicator in every
/// state except `Loaded`.
#[derive(Debug)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded(Vec<Feature>),
    Failed(SourceError),
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Loaded(_) | Self::Failed(_))
    }

    /// The renderable feature list, present only once loading succeeded.
    pub fn features(&self) -> Option<&[Feature]> {
        match self {
            Self::Loaded(features) => Some(features),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read dataset {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] DocumentError),
    /// The bundled document's `data` payload does not match the configured
    /// variant.
    #[error("dataset {path} does not hold the expected {expected} payload")]
    UnexpectedShape {
        path: PathBuf,
        expected: &'static str,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Synchronously loads a bundled dataset.
///
/// `path` may name one document or a directory; directories are walked for
/// `.json`/`.geojson` files, and their features are concatenated in path
/// order so repeated loads are deterministic.
pub fn load_static(path: &Path, prenormalized: bool) -> Result<Vec<Feature>, SourceError> {
    let mut features = Vec::new();

    for file in discover_documents(path)? {
        let text = fs::read_to_string(&file).map_err(|source| SourceError::Io {
            path: file.clone(),
            source,
        })?;
        let document = parse_document(&text)?;

        match (document.data, prenormalized) {
            (DocumentData::Features(raw), false) => {
                features.extend(features_from_raw(&raw));
            }
            (DocumentData::Sections(envelope), true) => {
                features.extend(features_from_sections(&envelope.sections));
            }
            (_, false) => {
                return Err(SourceError::UnexpectedShape {
                    path: file,
                    expected: "feature-list",
                })
            }
            (_, true) => {
                return Err(SourceError::UnexpectedShape {
                    path: file,
                    expected: "coordinate-section",
                })
            }
        }
    }

    Ok(features)
}

fn discover_documents(path: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| {
            matches!(
                e.path().extension().and_then(|s| s.to_str()),
                Some("json") | Some("geojson")
            )
        })
        .map(|e| e.path().to_path_buf())
        .collect();
    files.sort();

    if files.is_empty() {
        log::warn!("No dataset documents found in '{}'", path.display());
    }

    Ok(files)
}

/// Converts raw bundled features, dropping the ones whose geometry fails.
/// One bad feature never aborts the rest of the dataset.
pub fn features_from_raw(raw: &[RawFeature]) -> Vec<Feature> {
    raw.iter()
        .enumerate()
        .filter_map(|(index, entry)| match Feature::from_raw(entry) {
            Ok(feature) => Some(feature),
            Err(err) => {
                log::warn!("Dropping feature #{index}: {err}");
                None
            }
        })
        .collect()
}

/// Converts remote coordinate sections with the same per-feature isolation.
pub fn features_from_sections(sections: &[CoordinateSection]) -> Vec<Feature> {
    sections
        .iter()
        .enumerate()
        .filter_map(|(index, section)| match Feature::from_section(section) {
            Ok(feature) => Some(feature),
            Err(err) => {
                log::warn!("Dropping section #{index}: {err}");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FEATURES_DOC: &str = r#"{
        "data": [
            {
                "properties": { "BARRIO": "CHACARITA" },
                "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [0, 1]]] }
            },
            {
                "properties": { "BARRIO": "BROKEN" },
                "geometry": { "type": "Point", "coordinates": [1, 2] }
            },
            {
                "properties": { "BARRIO": "PALERMO" },
                "geometry": { "type": "MultiPolygon", "coordinates": [[[[2, 3]]]] }
            }
        ]
    }"#;

    const SECTIONS_DOC: &str = r#"{
        "data": { "getCoordinatesSections": [ { "geometryInFormatLatLong": [[10, 20]] } ] }
    }"#;

    fn write_doc(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn static_load_drops_bad_features_but_keeps_siblings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "barrios.json", FEATURES_DOC);

        let features = load_static(&path, false).unwrap();

        let names: Vec<_> = features
            .iter()
            .map(|f| f.properties().name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["CHACARITA", "PALERMO"]);
    }

    #[test]
    fn prenormalized_load_reads_section_documents() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "sections.json", SECTIONS_DOC);

        let features = load_static(&path, true).unwrap();
        assert_eq!(features.len(), 1);
        assert!(features[0].properties().is_empty());
    }

    #[test]
    fn shape_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_doc(dir.path(), "sections.json", SECTIONS_DOC);

        let err = load_static(&path, false).unwrap_err();
        assert!(matches!(err, SourceError::UnexpectedShape { .. }));
    }

    #[test]
    fn directory_load_concatenates_in_path_order() {
        let dir = tempfile::tempdir().unwrap();
        write_doc(
            dir.path(),
            "b.json",
            r#"{ "data": [ { "properties": { "BARRIO": "SECOND" },
                 "geometry": { "type": "Polygon", "coordinates": [[[0, 0]]] } } ] }"#,
        );
        write_doc(
            dir.path(),
            "a.geojson",
            r#"{ "data": [ { "properties": { "BARRIO": "FIRST" },
                 "geometry": { "type": "Polygon", "coordinates": [[[0, 0]]] } } ] }"#,
        );
        write_doc(dir.path(), "ignored.txt", "not a dataset");

        let features = load_static(dir.path(), false).unwrap();
        let names: Vec<_> = features
            .iter()
            .map(|f| f.properties().name.clone().unwrap())
            .collect();
        assert_eq!(names, vec!["FIRST", "SECOND"]);
    }

    #[test]
    fn load_state_exposes_features_only_when_loaded() {
        assert!(LoadState::Idle.features().is_none());
        assert!(LoadState::Loading.features().is_none());
        assert!(!LoadState::Loading.is_terminal());
        assert!(LoadState::Loaded(Vec::new()).is_terminal());
    }
}
