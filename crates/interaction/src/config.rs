use serde::Deserialize;
use trail::DEFAULT_STORAGE_KEY;

pub const DEFAULT_MANIFEST_URL: &str = "data/media.json";
pub const DEFAULT_COPY_LABEL_TTL_MS: u64 = 1100;

/// Startup configuration, read once from the hosting page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WidgetConfig {
    pub manifest_url: String,
    pub storage_key: String,
    /// Calibration controls; always on in this build unless switched off.
    pub trail_authoring: bool,
    /// Placement controls stay hidden unless the host opts in.
    pub placement_authoring: bool,
    pub copy_label_ttl_ms: u64,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            trail_authoring: true,
            placement_authoring: false,
            copy_label_ttl_ms: DEFAULT_COPY_LABEL_TTL_MS,
        }
    }
}

/// Which authoring modes this build exposes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Features {
    pub trail_authoring: bool,
    pub placement_authoring: bool,
}

impl WidgetConfig {
    /// Reads overrides from a page query string such as `?place=1`.
    ///
    /// Recognized keys:
    /// - `place` / `placement`: enable placement authoring (bare key counts as on)
    /// - `calibrate`: `0`/`false`/`off` hides calibration
    /// - `manifest`: manifest URL
    pub fn from_query(query: &str) -> Self {
        let mut config = Self::default();
        let query = query.trim().trim_start_matches('?');
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match &*key {
                "place" | "placement" => {
                    if let Some(on) = parse_flag(&value) {
                        config.placement_authoring = on;
                    }
                }
                "calibrate" => {
                    if let Some(on) = parse_flag(&value) {
                        config.trail_authoring = on;
                    }
                }
                "manifest" if !value.trim().is_empty() => {
                    config.manifest_url = value.trim().to_string();
                }
                _ => {}
            }
        }
        config
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn features(&self) -> Features {
        Features {
            trail_authoring: self.trail_authoring,
            placement_authoring: self.placement_authoring,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "" | "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_query_is_default() {
        assert_eq!(WidgetConfig::from_query(""), WidgetConfig::default());
        assert_eq!(WidgetConfig::from_query("?"), WidgetConfig::default());
        assert!(!WidgetConfig::default().placement_authoring);
    }

    #[test]
    fn place_flag_enables_placement() {
        assert!(WidgetConfig::from_query("?place=1").placement_authoring);
        assert!(WidgetConfig::from_query("?place").placement_authoring);
        assert!(WidgetConfig::from_query("placement=true&x=2").placement_authoring);
        assert!(!WidgetConfig::from_query("?place=0").placement_authoring);
        assert!(!WidgetConfig::from_query("?place=maybe").placement_authoring);
    }

    #[test]
    fn calibrate_off_and_manifest_override() {
        let config = WidgetConfig::from_query("?calibrate=off&manifest=data%2Falt.json");
        assert!(!config.trail_authoring);
        assert_eq!(config.manifest_url, "data/alt.json");
    }

    #[test]
    fn json_config_fills_missing_fields() {
        let config = WidgetConfig::from_json(r#"{"placement_authoring":true}"#).unwrap();
        assert!(config.placement_authoring);
        assert_eq!(config.storage_key, "futurecreek_trail_points");
        assert_eq!(config.copy_label_ttl_ms, 1100);
    }
}
