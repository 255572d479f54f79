//! Selection state: the user-chosen feature and its click location.

use geobound::{Feature, LatLng};

/// A selected feature together with the geographic point of the click that
/// selected it. The two always travel as a pair.
#[derive(Debug, Clone)]
pub struct Selected {
    pub feature: Feature,
    pub point: LatLng,
}

/// Single-writer selection state; the coordinator writes, both map views read.
///
/// The invariant "point is set iff feature is set" is structural: both live
/// inside one `Option`, and [`SelectionState::select`] replaces the whole pair
/// at once. There is no deselect operation; the initial state is the only
/// empty one.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: Option<Selected>,
}

impl SelectionState {
    /// Unconditionally overwrites the selection. Out-of-range points are
    /// accepted as opaque; the upstream click producer is trusted.
    pub fn select(&mut self, feature: Feature, point: LatLng) {
        self.selected = Some(Selected { feature, point });
    }

    pub fn selected(&self) -> Option<&Selected> {
        self.selected.as_ref()
    }

    pub fn selected_feature(&self) -> Option<&Feature> {
        self.selected.as_ref().map(|s| &s.feature)
    }

    pub fn selected_point(&self) -> Option<LatLng> {
        self.selected.as_ref().map(|s| s.point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geobound::{FeatureProperties, Geometry};

    fn feature(lng: f64) -> Feature {
        Feature::new(
            FeatureProperties::default(),
            Geometry::pre_normalized(&[[lng, 0.0]]).unwrap(),
        )
    }

    #[test]
    fn select_sets_both_fields_from_one_event() {
        let mut state = SelectionState::default();
        assert!(state.selected_feature().is_none());
        assert!(state.selected_point().is_none());

        let f = feature(1.0);
        state.select(f.clone(), LatLng::new(5.0, 5.0));

        assert_eq!(state.selected_feature().unwrap().id(), f.id());
        assert_eq!(state.selected_point(), Some(LatLng::new(5.0, 5.0)));
    }

    #[test]
    fn rapid_reselection_never_mixes_pairs() {
        let mut state = SelectionState::default();
        let f = feature(1.0);
        let g = feature(2.0);

        state.select(f, LatLng::new(5.0, 5.0));
        state.select(g.clone(), LatLng::new(6.0, 6.0));

        let selected = state.selected().unwrap();
        assert_eq!(selected.feature.id(), g.id());
        assert_eq!(selected.point, LatLng::new(6.0, 6.0));
    }
}
