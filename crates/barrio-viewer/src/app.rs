use crate::{
    camera::{camera_for_selection, Camera},
    data::source::{self, LoadState, SourceConfig},
    net::{self, FetchOutcome},
    render::{PathStyle, PolygonGraphic, RenderSurface},
    selection::SelectionState,
};
use crossbeam_channel::{Receiver, TryRecvError};
use geobound::{Feature, FeatureId, LatLng};

/// Coordinates the overview and detail maps around one selection and one
/// load cycle.
///
/// Single-threaded by construction: clicks, renders and fetch completions are
/// all applied from the owning event thread. The only suspension point is the
/// remote fetch, which runs on its own thread and delivers its completion
/// through [`DualMapApp::pump`].
pub struct DualMapApp {
    config: SourceConfig,
    load: LoadState,
    /// Mount-cycle counter; fetch completions from an older cycle are stale.
    generation: u64,
    fetch_rx: Option<Receiver<FetchOutcome>>,
    selection: SelectionState,
    overview_camera: Camera,
}

impl DualMapApp {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            load: LoadState::Idle,
            generation: 0,
            fetch_rx: None,
            selection: SelectionState::default(),
            overview_camera: Camera::overview(),
        }
    }

    /// Starts the load cycle. Static variants resolve synchronously; the
    /// remote variant transitions to `Loading` and spawns its single fetch.
    ///
    /// Only the `Idle` state starts anything: `Loading` is entered at most
    /// once per mount, and terminal states stay terminal (no auto-retry).
    pub fn start_load(&mut self) {
        if !matches!(self.load, LoadState::Idle) {
            log::debug!("Ignoring start_load outside Idle");
            return;
        }

        log::info!("Loading features from {}", self.config.describe());

        match self.config.clone() {
            SourceConfig::Static { path } => {
                self.load = match source::load_static(&path, false) {
                    Ok(features) => LoadState::Loaded(features),
                    Err(err) => {
                        log::error!("Dataset load failed: {err}");
                        LoadState::Failed(err)
                    }
                };
            }
            SourceConfig::StaticPrenormalized { path } => {
                self.load = match source::load_static(&path, true) {
                    Ok(features) => LoadState::Loaded(features),
                    Err(err) => {
                        log::error!("Dataset load failed: {err}");
                        LoadState::Failed(err)
                    }
                };
            }
            SourceConfig::Remote { endpoint } => {
                let (tx, rx) = crossbeam_channel::bounded(1);
                net::spawn_fetch(endpoint, self.generation, tx);
                self.fetch_rx = Some(rx);
                self.load = LoadState::Loading;
            }
        }
    }

    /// Drains pending fetch completions. Call between events; all state
    /// writes happen here, on the calling thread.
    pub fn pump(&mut self) {
        let rx = match &self.fetch_rx {
            Some(rx) => rx.clone(),
            None => return,
        };

        loop {
            match rx.try_recv() {
                Ok(outcome) => self.apply_fetch_outcome(outcome),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.generation != self.generation {
            log::debug!(
                "Discarding stale fetch completion from generation {}",
                outcome.generation
            );
            return;
        }
        if !matches!(self.load, LoadState::Loading) {
            log::debug!("Discarding fetch completion outside Loading");
            return;
        }

        match outcome.result {
            Ok(envelope) => {
                let features = source::features_from_sections(&envelope.sections);
                log::info!("Loaded {} features from remote query", features.len());
                self.load = LoadState::Loaded(features);
            }
            Err(err) => {
                log::error!("Boundary fetch failed: {err}");
                self.load = LoadState::Failed(err.into());
            }
        }

        self.fetch_rx = None;
    }

    /// Tears down the current mount cycle: back to `Idle`, selection cleared,
    /// and any fetch still in flight orphaned so its completion cannot write
    /// into the new cycle.
    pub fn remount(&mut self) {
        self.generation += 1;
        self.fetch_rx = None;
        self.load = LoadState::Idle;
        self.selection = SelectionState::default();
    }

    /// Click capability handed to every rendered overview polygon. Rapid
    /// clicks simply overwrite each other; the last one before the next
    /// render wins.
    pub fn handle_click(&mut self, feature: FeatureId, point: LatLng) {
        let Some(clicked) = self.find_feature(feature) else {
            // A click from a polygon of a previous load cycle.
            log::debug!("Ignoring click on unknown feature {feature}");
            return;
        };
        self.selection.select(clicked, point);
    }

    fn find_feature(&self, id: FeatureId) -> Option<Feature> {
        self.load
            .features()
            .and_then(|features| features.iter().find(|f| f.id() == id))
            .cloned()
    }

    /// Renders every loaded polygon on the overview map, or the loading
    /// indicator while no feature list exists.
    pub fn render_overview(&self, surface: &mut dyn RenderSurface) {
        surface.set_view(&self.overview_camera);

        match self.load.features() {
            Some(features) => {
                for feature in features {
                    surface.polygon(&Self::graphic(feature));
                }
            }
            None => surface.loading_indicator(),
        }
    }

    /// Renders the detail map: camera derived fresh from the selection on
    /// every pass, plus the selected polygon when one exists.
    pub fn render_detail(&self, surface: &mut dyn RenderSurface) {
        let camera = camera_for_selection(&self.selection);
        surface.set_view(&camera);

        if let Some(selected) = self.selection.selected() {
            surface.polygon(&Self::graphic(&selected.feature));
        }
    }

    fn graphic(feature: &Feature) -> PolygonGraphic {
        PolygonGraphic {
            feature: feature.id(),
            points: feature.geometry().points().to_vec(),
            style: PathStyle::default(),
            tooltip: feature.properties().name.clone(),
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[cfg(test)]
    fn begin_remote_loading(&mut self) -> crossbeam_channel::Sender<FetchOutcome> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.fetch_rx = Some(rx);
        self.load = LoadState::Loading;
        tx
    }
}
