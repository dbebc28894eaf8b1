//! The interaction state machine.
//!
//! `MapWidget` owns the mode/viewer state together with the trail store and
//! the media catalog. All mutation goes through `handle_event`, which returns
//! the render commands the view layer has to apply. Nothing here touches the
//! DOM.

use catalog::{CatalogError, MediaCatalog};
use foundation::point::Point2D;
use runtime::{Clock, NoticeBoard};
use tracing::{debug, info, warn};
use trail::{TrailStorage, TrailStore};

use crate::command::*;
use crate::config::{Features, WidgetConfig};
use crate::event::{CopyTarget, Event, Key, PointerTarget};
use crate::state::{InteractionState, Mode, Viewer, next_index, prev_index};

pub const CATALOG_ERROR_MESSAGE: &str = "Could not load map points.";
pub const COPIED_LABEL: &str = "Copied";
pub const COPY_FAILED_LABEL: &str = "Copy Failed";

#[derive(Debug, Clone, PartialEq)]
enum CatalogState {
    Pending,
    Ready(MediaCatalog),
    Unavailable,
}

#[derive(Debug)]
pub struct MapWidget<S, C> {
    config: WidgetConfig,
    state: InteractionState,
    trail: TrailStore<S>,
    catalog: CatalogState,
    notices: NoticeBoard<CopyTarget>,
    clock: C,
}

impl<S: TrailStorage, C: Clock> MapWidget<S, C> {
    /// Loads the trail from `storage`; the catalog arrives later through
    /// `Event::CatalogLoaded` or `Event::CatalogFailed`.
    pub fn new(config: WidgetConfig, storage: S, clock: C) -> Self {
        let trail = TrailStore::load(storage);
        debug!("trail loaded with {} waypoints", trail.len());
        Self {
            config,
            state: InteractionState::default(),
            trail,
            catalog: CatalogState::Pending,
            notices: NoticeBoard::new(),
            clock,
        }
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn features(&self) -> Features {
        self.config.features()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn trail(&self) -> &TrailStore<S> {
        &self.trail
    }

    /// `None` until the manifest has loaded, and forever if it failed.
    pub fn catalog(&self) -> Option<&MediaCatalog> {
        match &self.catalog {
            CatalogState::Ready(catalog) => Some(catalog),
            CatalogState::Pending | CatalogState::Unavailable => None,
        }
    }

    /// When the host should send the next `Event::Tick`.
    pub fn next_notice_deadline(&self) -> Option<foundation::time::Millis> {
        self.notices.next_deadline()
    }

    /// Commands for the first paint, before the catalog resolves.
    pub fn initial_render(&self) -> Vec<RenderCommand> {
        vec![
            RenderCommand::Mode(self.mode_view()),
            RenderCommand::Trail(self.trail_view()),
        ]
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<RenderCommand> {
        match event {
            Event::CatalogLoaded(catalog) => self.on_catalog_loaded(catalog),
            Event::CatalogFailed(reason) => self.on_catalog_failed(&reason),

            Event::ToggleCalibration => self.toggle_mode(Mode::CalibratingTrail),
            Event::FinishCalibration => self.leave_mode(Mode::CalibratingTrail),
            Event::TogglePlacement => self.toggle_mode(Mode::PlacingMedia),
            Event::FinishPlacement => self.leave_mode(Mode::PlacingMedia),
            Event::ToggleTrailVisibility => {
                self.state.trail_visible = !self.state.trail_visible;
                vec![RenderCommand::Trail(self.trail_view())]
            }

            Event::MapPointer {
                client,
                container,
                target,
            } => {
                if target != PointerTarget::MapSurface {
                    return Vec::new();
                }
                let Some(position) = container.to_percent(client) else {
                    debug!("ignoring map click on a zero-sized container");
                    return Vec::new();
                };
                self.on_map_click(position.rounded())
            }
            Event::SelectMarker { id } => self.select(&id, false),
            Event::SelectListEntry { id } => self.select(&id, true),
            Event::SelectPlacementTarget { id } => self.select_placement_target(id),

            Event::UndoTrailPoint => {
                if !self.state.is_calibrating() || !self.trail.undo_last() {
                    return Vec::new();
                }
                vec![RenderCommand::Trail(self.trail_view())]
            }
            Event::ClearTrail => {
                if !self.state.is_calibrating() {
                    return Vec::new();
                }
                self.trail.clear();
                vec![RenderCommand::Trail(self.trail_view())]
            }
            Event::CopyRequested(target) => self.request_copy(target),
            Event::ClipboardResult { target, ok } => {
                let label = if ok { COPIED_LABEL } else { COPY_FAILED_LABEL };
                vec![self.post_copy_label(target, label)]
            }

            Event::ViewerNext => self.navigate(next_index),
            Event::ViewerPrev => self.navigate(prev_index),
            Event::ViewerClose => self.close_viewer(),
            Event::ViewerPointer { client, bounds } => {
                if !self.state.viewer.is_open() || bounds.contains(client) {
                    return Vec::new();
                }
                self.close_viewer()
            }
            Event::Key(key) => {
                if !self.state.viewer.is_open() {
                    return Vec::new();
                }
                match key {
                    Key::ArrowLeft => self.navigate(prev_index),
                    Key::ArrowRight => self.navigate(next_index),
                    Key::Escape => self.close_viewer(),
                    Key::Other => Vec::new(),
                }
            }

            Event::Tick => self.expire_notices(),
        }
    }

    fn on_catalog_loaded(&mut self, catalog: MediaCatalog) -> Vec<RenderCommand> {
        if !matches!(self.catalog, CatalogState::Pending) {
            debug!("ignoring repeated catalog load");
            return Vec::new();
        }
        info!("media catalog ready with {} points", catalog.len());
        self.catalog = CatalogState::Ready(catalog);
        vec![
            RenderCommand::Markers(self.marker_view()),
            RenderCommand::List {
                entries: self.list_view(),
            },
        ]
    }

    fn on_catalog_failed(&mut self, reason: &str) -> Vec<RenderCommand> {
        if !matches!(self.catalog, CatalogState::Pending) {
            return Vec::new();
        }
        warn!("media catalog unavailable: {reason}");
        self.catalog = CatalogState::Unavailable;
        vec![RenderCommand::ShowCatalogError {
            message: CATALOG_ERROR_MESSAGE.to_string(),
        }]
    }

    fn mode_available(&self, mode: Mode) -> bool {
        let features = self.features();
        match mode {
            Mode::Browse => true,
            Mode::CalibratingTrail => features.trail_authoring,
            Mode::PlacingMedia => features.placement_authoring,
        }
    }

    fn toggle_mode(&mut self, mode: Mode) -> Vec<RenderCommand> {
        if !self.mode_available(mode) {
            debug!("{mode:?} is not enabled in this build");
            return Vec::new();
        }
        self.state.toggle_mode(mode);
        debug!("mode is now {:?}", self.state.mode);
        self.mode_changed()
    }

    fn leave_mode(&mut self, mode: Mode) -> Vec<RenderCommand> {
        if self.state.mode != mode {
            return Vec::new();
        }
        self.state.mode = Mode::Browse;
        self.mode_changed()
    }

    fn mode_changed(&self) -> Vec<RenderCommand> {
        vec![
            RenderCommand::Mode(self.mode_view()),
            RenderCommand::Markers(self.marker_view()),
            RenderCommand::Trail(self.trail_view()),
        ]
    }

    fn on_map_click(&mut self, position: Point2D) -> Vec<RenderCommand> {
        match self.state.mode {
            Mode::Browse => Vec::new(),
            Mode::CalibratingTrail => {
                self.trail.append(position);
                vec![RenderCommand::Trail(self.trail_view())]
            }
            Mode::PlacingMedia => self.place_target_at(position),
        }
    }

    fn place_target_at(&mut self, position: Point2D) -> Vec<RenderCommand> {
        let Some(id) = self.state.placement_target.clone() else {
            debug!("placement click without a selected point");
            return Vec::new();
        };
        let CatalogState::Ready(catalog) = &mut self.catalog else {
            return Vec::new();
        };
        match catalog.set_position(&id, position) {
            Ok(stored) => {
                debug!("placed {id} at {:.2},{:.2}", stored.x, stored.y);
                vec![RenderCommand::Markers(self.marker_view())]
            }
            Err(CatalogError::NotFound(_)) => {
                debug!("ignoring placement for missing point {id}");
                Vec::new()
            }
            Err(err) => {
                warn!("placement failed: {err}");
                Vec::new()
            }
        }
    }

    fn select(&mut self, id: &str, from_list: bool) -> Vec<RenderCommand> {
        if self.state.is_authoring() {
            return Vec::new();
        }
        let Some(index) = self.catalog().and_then(|c| c.index_of(id)) else {
            debug!("ignoring selection of unknown point {id}");
            return Vec::new();
        };
        let mut out = self.open_viewer(index);
        if from_list {
            out.push(RenderCommand::ScrollMarkerIntoView { id: id.to_string() });
        }
        out
    }

    fn select_placement_target(&mut self, id: String) -> Vec<RenderCommand> {
        if !self.features().placement_authoring {
            return Vec::new();
        }
        if self.catalog().and_then(|c| c.find_by_id(&id)).is_none() {
            debug!("ignoring placement target {id}: not in catalog");
            return Vec::new();
        }
        self.state.placement_target = Some(id);
        vec![RenderCommand::Markers(self.marker_view())]
    }

    fn open_viewer(&mut self, index: usize) -> Vec<RenderCommand> {
        let Some(point) = self.catalog().and_then(|c| c.get(index)) else {
            return Vec::new();
        };
        let content = ViewerContent::for_point(index, point);
        self.state.viewer = Viewer::Open { index };
        vec![
            RenderCommand::Markers(self.marker_view()),
            RenderCommand::OpenViewer(content),
        ]
    }

    fn navigate(&mut self, step: fn(usize, usize) -> Option<usize>) -> Vec<RenderCommand> {
        let Viewer::Open { index } = self.state.viewer else {
            return Vec::new();
        };
        let len = self.catalog().map_or(0, MediaCatalog::len);
        match step(index, len) {
            Some(next) => self.open_viewer(next),
            None => Vec::new(),
        }
    }

    fn close_viewer(&mut self) -> Vec<RenderCommand> {
        let Viewer::Open { index } = self.state.viewer else {
            return Vec::new();
        };
        let pause_media = self
            .catalog()
            .and_then(|c| c.get(index))
            .is_some_and(|p| p.kind == catalog::MediaKind::Video);
        self.state.viewer = Viewer::Closed;
        vec![
            RenderCommand::CloseViewer { pause_media },
            RenderCommand::Markers(self.marker_view()),
        ]
    }

    fn request_copy(&mut self, target: CopyTarget) -> Vec<RenderCommand> {
        let payload = match target {
            CopyTarget::TrailData => {
                if !self.features().trail_authoring {
                    return Vec::new();
                }
                self.trail.export_snapshot().map_err(|e| e.to_string())
            }
            CopyTarget::Placements => {
                if !self.features().placement_authoring {
                    return Vec::new();
                }
                match self.catalog() {
                    Some(catalog) => catalog.export_placements().map_err(|e| e.to_string()),
                    None => Err("catalog not loaded".to_string()),
                }
            }
        };
        match payload {
            Ok(payload) => vec![RenderCommand::WriteClipboard { target, payload }],
            Err(err) => {
                debug!("nothing to copy for {target:?}: {err}");
                vec![self.post_copy_label(target, COPY_FAILED_LABEL)]
            }
        }
    }

    fn post_copy_label(&mut self, target: CopyTarget, label: &str) -> RenderCommand {
        let now = self.clock.now();
        self.notices
            .post(target, label, now, self.config.copy_label_ttl_ms);
        RenderCommand::CopyLabel {
            target,
            label: label.to_string(),
        }
    }

    fn expire_notices(&mut self) -> Vec<RenderCommand> {
        let now = self.clock.now();
        self.notices
            .expire(now)
            .into_iter()
            .map(|n| RenderCommand::CopyLabel {
                target: n.key,
                label: n.key.default_label().to_string(),
            })
            .collect()
    }

    fn mode_view(&self) -> ModeView {
        let features = self.features();
        let calibrating = self.state.is_calibrating();
        let placing = self.state.is_placing();
        ModeView {
            calibrating,
            placing,
            calibration_available: features.trail_authoring,
            placement_available: features.placement_authoring,
            calibrate_label: if calibrating {
                "Calibrating..."
            } else {
                "Calibrate Trail"
            },
            place_label: if placing { "Placing..." } else { "Place Points" },
        }
    }

    fn trail_view(&self) -> TrailView {
        let guide = if self.state.is_calibrating() {
            self.trail.waypoints().to_vec()
        } else {
            Vec::new()
        };
        TrailView {
            path: self.trail.path().to_svg(),
            visible: self.state.trail_visible,
            toggle_label: if self.state.trail_visible {
                "Hide Trail"
            } else {
                "Show Trail"
            },
            guide,
            guide_radius: GUIDE_DOT_RADIUS,
        }
    }

    fn marker_view(&self) -> MarkerLayerView {
        let active = self.state.viewer.index();
        let target = self
            .state
            .placement_target
            .as_deref()
            .filter(|_| self.state.is_placing());
        let markers = self
            .catalog()
            .map(|c| c.points())
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, p)| MarkerView {
                id: p.id.clone(),
                position: p.position,
                short_label: p.short_label.clone(),
                active: active == Some(i),
                placement_target: target == Some(p.id.as_str()),
            })
            .collect();
        MarkerLayerView {
            markers,
            calibrating: self.state.is_calibrating(),
            placing: self.state.is_placing(),
        }
    }

    fn list_view(&self) -> Vec<ListEntryView> {
        self.catalog()
            .map(|c| c.points())
            .unwrap_or_default()
            .iter()
            .map(|p| ListEntryView {
                id: p.id.clone(),
                title: p.title.clone(),
                meta: p.meta_line(),
            })
            .collect()
    }
}
