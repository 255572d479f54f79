//! Camera policy for the two map views.

use crate::selection::SelectionState;
use geobound::LatLng;

/// Home position over the dataset, used whenever nothing is selected.
pub const DEFAULT_CENTER: LatLng = LatLng::new(18.472113134457878, 3.597817222715871);

/// Fixed zoom of the overview map.
pub const OVERVIEW_ZOOM: f64 = 8.0;

/// Detail-map zoom while nothing is selected (overview-equivalent framing).
pub const DETAIL_DEFAULT_ZOOM: f64 = 10.0;

/// Detail-map zoom once a neighborhood is selected. Strictly greater than
/// [`DETAIL_DEFAULT_ZOOM`].
pub const DETAIL_SELECTED_ZOOM: f64 = 12.0;

/// A map view's center point and zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: LatLng,
    pub zoom: f64,
}

impl Camera {
    /// The overview map's fixed camera.
    pub fn overview() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: OVERVIEW_ZOOM,
        }
    }
}

/// Derives the detail-map camera from the current selection.
///
/// Pure function of its input; callers re-evaluate it on every render so no
/// stale camera state survives between renders.
pub fn camera_for_selection(selection: &SelectionState) -> Camera {
    match selection.selected_point() {
        Some(point) => Camera {
            center: point,
            zoom: DETAIL_SELECTED_ZOOM,
        },
        None => Camera {
            center: DEFAULT_CENTER,
            zoom: DETAIL_DEFAULT_ZOOM,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geobound::{Feature, FeatureProperties, Geometry};

    fn any_feature() -> Feature {
        Feature::new(
            FeatureProperties::default(),
            Geometry::pre_normalized(&[[0.0, 0.0]]).unwrap(),
        )
    }

    #[test]
    fn no_selection_uses_defaults() {
        let camera = camera_for_selection(&SelectionState::default());
        assert_eq!(camera.center, DEFAULT_CENTER);
        assert_eq!(camera.zoom, DETAIL_DEFAULT_ZOOM);
    }

    #[test]
    fn selection_centers_on_the_click_point_and_zooms_in() {
        let mut selection = SelectionState::default();
        selection.select(any_feature(), LatLng::new(5.0, 5.0));

        let camera = camera_for_selection(&selection);
        assert_eq!(camera.center, LatLng::new(5.0, 5.0));
        assert_eq!(camera.zoom, DETAIL_SELECTED_ZOOM);
    }

    #[test]
    fn selected_zoom_is_strictly_closer_than_default() {
        assert!(DETAIL_SELECTED_ZOOM > DETAIL_DEFAULT_ZOOM);
    }
}
