use catalog::MediaCatalog;
use foundation::bounds::Rect;
use foundation::point::Point2D;
use serde::{Deserialize, Serialize};

/// Keys the viewer reacts to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "ArrowLeft" | "Left" => Key::ArrowLeft,
            "ArrowRight" | "Right" => Key::ArrowRight,
            "Escape" | "Esc" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// What a pointer action on the map frame landed on.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerTarget {
    /// Base image, trail path, or a calibration guide dot.
    MapSurface,
    /// Calibration or placement panel controls.
    Panel,
    Other,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyTarget {
    TrailData,
    Placements,
}

impl CopyTarget {
    pub fn default_label(self) -> &'static str {
        match self {
            CopyTarget::TrailData => "Copy Path Data",
            CopyTarget::Placements => "Copy Placements",
        }
    }
}

/// Input to `MapWidget::handle_event`.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    CatalogLoaded(MediaCatalog),
    CatalogFailed(String),

    ToggleCalibration,
    FinishCalibration,
    TogglePlacement,
    FinishPlacement,
    ToggleTrailVisibility,

    /// Click on the map frame. `container` is the base map's client box.
    MapPointer {
        client: Point2D,
        container: Rect,
        target: PointerTarget,
    },
    SelectMarker {
        id: String,
    },
    SelectListEntry {
        id: String,
    },
    SelectPlacementTarget {
        id: String,
    },

    UndoTrailPoint,
    ClearTrail,
    CopyRequested(CopyTarget),
    ClipboardResult {
        target: CopyTarget,
        ok: bool,
    },

    ViewerNext,
    ViewerPrev,
    ViewerClose,
    /// Click delivered to the viewer dialog; `bounds` is its client box.
    ViewerPointer {
        client: Point2D,
        bounds: Rect,
    },
    Key(Key),

    /// Clock moved; expire transient labels.
    Tick,
}
