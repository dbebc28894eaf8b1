use foundation::point::Point2D;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Video,
    #[default]
    #[serde(other)]
    Photo,
}

impl MediaKind {
    pub fn label(self) -> &'static str {
        match self {
            MediaKind::Photo => "Photo",
            MediaKind::Video => "Video",
        }
    }
}

/// One catalog entry: a piece of media pinned to the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaPoint {
    pub id: String,
    pub position: Point2D,
    pub kind: MediaKind,
    pub src: String,
    /// Video thumbnail; only kept for `MediaKind::Video`.
    pub poster: Option<String>,
    pub title: String,
    pub caption: String,
    pub date: String,
    pub short_label: String,
}

impl MediaPoint {
    /// `"{date} • {Photo|Video}"`, shown in the list and the viewer.
    pub fn meta_line(&self) -> String {
        format!("{} • {}", self.date, self.kind.label())
    }
}

/// Manifest record as found in `media.json`.
///
/// Every field is optional and loosely typed: `null` or a value of the wrong
/// type falls back to the field default, numbers are accepted as ids and
/// numeric strings as coordinates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MediaRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub x: f64,
    #[serde(deserialize_with = "lenient_f64")]
    pub y: f64,
    #[serde(rename = "type", deserialize_with = "lenient_kind")]
    pub kind: MediaKind,
    #[serde(deserialize_with = "lenient_string")]
    pub src: String,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_opt_string"
    )]
    pub poster: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub caption: String,
    #[serde(deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(deserialize_with = "lenient_string")]
    pub short_label: String,
}

fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_opt_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let s = lenient_string(d)?;
    Ok((!s.trim().is_empty()).then_some(s))
}

fn lenient_f64<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or_default(),
        _ => 0.0,
    })
}

fn lenient_kind<'de, D: Deserializer<'de>>(d: D) -> Result<MediaKind, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::String(s) if s.trim().eq_ignore_ascii_case("video") => MediaKind::Video,
        _ => MediaKind::Photo,
    })
}

impl From<MediaRecord> for MediaPoint {
    fn from(r: MediaRecord) -> Self {
        let poster = match r.kind {
            MediaKind::Video => r.poster,
            MediaKind::Photo => None,
        };
        MediaPoint {
            id: r.id,
            position: Point2D::new(r.x, r.y).clamped(),
            kind: r.kind,
            src: r.src,
            poster,
            title: r.title,
            caption: r.caption,
            date: r.date,
            short_label: r.short_label,
        }
    }
}

/// Placement export entry: `{id, src, x, y}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub id: String,
    pub src: String,
    pub x: f64,
    pub y: f64,
}

impl From<&MediaPoint> for Placement {
    fn from(p: &MediaPoint) -> Self {
        Placement {
            id: p.id.clone(),
            src: p.src.clone(),
            x: p.position.x,
            y: p.position.y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn record_reads_camel_case_fields() {
        let raw = r#"{
            "id": "bridge",
            "x": 41.5,
            "y": 62,
            "type": "video",
            "src": "media/bridge.mp4",
            "poster": "media/bridge.jpg",
            "title": "Old Bridge",
            "caption": "Crossing at dusk",
            "date": "May 2024",
            "shortLabel": "Bridge"
        }"#;
        let point: MediaPoint = serde_json::from_str::<MediaRecord>(raw).unwrap().into();
        assert_eq!(point.id, "bridge");
        assert_eq!(point.position, Point2D::new(41.5, 62.0));
        assert_eq!(point.kind, MediaKind::Video);
        assert_eq!(point.poster.as_deref(), Some("media/bridge.jpg"));
        assert_eq!(point.short_label, "Bridge");
        assert_eq!(point.meta_line(), "May 2024 • Video");
    }

    #[test]
    fn sparse_record_degrades_to_defaults() {
        let point: MediaPoint = serde_json::from_str::<MediaRecord>(r#"{"id":"a"}"#)
            .unwrap()
            .into();
        assert_eq!(point.kind, MediaKind::Photo);
        assert_eq!(point.position, Point2D::new(0.0, 0.0));
        assert_eq!(point.title, "");
    }

    #[test]
    fn unknown_type_is_a_photo_and_drops_poster() {
        let point: MediaPoint =
            serde_json::from_str::<MediaRecord>(r#"{"id":"a","type":"panorama","poster":"p.jpg"}"#)
                .unwrap()
                .into();
        assert_eq!(point.kind, MediaKind::Photo);
        assert_eq!(point.poster, None);
    }

    #[test]
    fn null_and_mistyped_fields_fall_back() {
        let raw = r#"{"id":7,"x":"5","y":null,"type":null,"title":null,"caption":false,"poster":null}"#;
        let point: MediaPoint = serde_json::from_str::<MediaRecord>(raw).unwrap().into();
        assert_eq!(point.id, "7");
        assert_eq!(point.position, Point2D::new(5.0, 0.0));
        assert_eq!(point.kind, MediaKind::Photo);
        assert_eq!(point.title, "");
        assert_eq!(point.caption, "");
        assert_eq!(point.poster, None);
    }

    #[test]
    fn kind_round_trips_lowercase() {
        assert_eq!(serde_json::to_string(&MediaKind::Video).unwrap(), "\"video\"");
        let kind: MediaKind = serde_json::from_str("\"reel\"").unwrap();
        assert_eq!(kind, MediaKind::Photo);
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        let point: MediaPoint = serde_json::from_str::<MediaRecord>(r#"{"id":"a","x":-4,"y":104}"#)
            .unwrap()
            .into();
        assert_eq!(point.position, Point2D::new(0.0, 100.0));
    }
}
