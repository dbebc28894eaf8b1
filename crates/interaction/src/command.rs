use catalog::{MediaKind, MediaPoint};
use foundation::point::Point2D;
use serde::Serialize;

use crate::event::CopyTarget;

/// Guide dot radius in percentage units.
pub const GUIDE_DOT_RADIUS: f64 = 0.55;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: String,
    pub position: Point2D,
    pub short_label: String,
    pub active: bool,
    pub placement_target: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLayerView {
    pub markers: Vec<MarkerView>,
    pub calibrating: bool,
    pub placing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEntryView {
    pub id: String,
    pub title: String,
    pub meta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrailView {
    /// SVG path data.
    pub path: String,
    pub visible: bool,
    pub toggle_label: &'static str,
    /// Waypoint dots, only while calibrating.
    pub guide: Vec<Point2D>,
    pub guide_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeView {
    pub calibrating: bool,
    pub placing: bool,
    pub calibration_available: bool,
    pub placement_available: bool,
    pub calibrate_label: &'static str,
    pub place_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaView {
    /// Lazy-loaded image.
    Photo { src: String, alt: String },
    /// Video with controls, `preload=metadata`.
    Video { src: String, poster: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewerContent {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub caption: String,
    pub meta: String,
    pub media: MediaView,
}

impl ViewerContent {
    pub fn for_point(index: usize, point: &MediaPoint) -> Self {
        let media = match point.kind {
            MediaKind::Photo => MediaView::Photo {
                src: point.src.clone(),
                alt: point.title.clone(),
            },
            MediaKind::Video => MediaView::Video {
                src: point.src.clone(),
                poster: point.poster.clone(),
            },
        };
        Self {
            index,
            id: point.id.clone(),
            title: point.title.clone(),
            caption: point.caption.clone(),
            meta: point.meta_line(),
            media,
        }
    }
}

/// Instructions for the view layer, emitted by `MapWidget::handle_event`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderCommand {
    Markers(MarkerLayerView),
    List { entries: Vec<ListEntryView> },
    Trail(TrailView),
    Mode(ModeView),
    OpenViewer(ViewerContent),
    /// `pause_media` is set when the closing subject is a video.
    CloseViewer { pause_media: bool },
    ScrollMarkerIntoView { id: String },
    ShowCatalogError { message: String },
    WriteClipboard { target: CopyTarget, payload: String },
    CopyLabel { target: CopyTarget, label: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_with_kind_tag() {
        let json = serde_json::to_string(&RenderCommand::CloseViewer { pause_media: true }).unwrap();
        assert_eq!(json, r#"{"kind":"close_viewer","pause_media":true}"#);

        let json = serde_json::to_string(&RenderCommand::CopyLabel {
            target: CopyTarget::TrailData,
            label: "Copied".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"copy_label","target":"trail_data","label":"Copied"}"#);
    }
}
