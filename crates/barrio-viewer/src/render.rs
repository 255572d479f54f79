//! The rendering-capability boundary.
//!
//! The core never paints tiles or pixels; it hands the map-widget
//! collaborator ordered `(lat, lng)` outlines through [`RenderSurface`]. The
//! widget is expected to wire the click events of every painted polygon back
//! to [`crate::app::DualMapApp::handle_click`] using the carried feature id.

use crate::camera::Camera;
use geobound::{FeatureId, LatLng};

/// The single outline color in scope.
pub const OUTLINE_COLOR: &str = "purple";

/// Style descriptor for a painted polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct PathStyle {
    pub color: &'static str,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: OUTLINE_COLOR,
        }
    }
}

/// Everything the widget needs to paint one polygon and route its clicks.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonGraphic {
    pub feature: FeatureId,
    pub points: Vec<LatLng>,
    pub style: PathStyle,
    pub tooltip: Option<String>,
}

/// Capability offered by the map-widget collaborator.
pub trait RenderSurface {
    /// Positions the view before any polygons of this render pass.
    fn set_view(&mut self, camera: &Camera);

    /// Paints one polygon outline.
    fn polygon(&mut self, graphic: &PolygonGraphic);

    /// Shows the loading indicator in place of polygons.
    fn loading_indicator(&mut self);
}

/// Headless surface that narrates render passes to the log. Stands in for a
/// real widget in the demo binary and when debugging data problems.
pub struct LogSurface {
    label: &'static str,
}

impl LogSurface {
    pub fn new(label: &'static str) -> Self {
        Self { label }
    }
}

impl RenderSurface for LogSurface {
    fn set_view(&mut self, camera: &Camera) {
        log::info!(
            "[{}] view centered at ({:.6}, {:.6}) zoom {}",
            self.label,
            camera.center.lat,
            camera.center.lng,
            camera.zoom
        );
    }

    fn polygon(&mut self, graphic: &PolygonGraphic) {
        log::info!(
            "[{}] polygon {} ({}): {} points, color {}",
            self.label,
            graphic.feature,
            graphic.tooltip.as_deref().unwrap_or("unnamed"),
            graphic.points.len(),
            graphic.style.color
        );
    }

    fn loading_indicator(&mut self) {
        log::info!("[{}] loading…", self.label);
    }
}
