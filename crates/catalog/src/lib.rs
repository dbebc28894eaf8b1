pub mod media;

pub use media::*;

use std::collections::HashSet;

use foundation::point::Point2D;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("media point not found: {0}")]
    NotFound(String),
    #[error("media catalog unavailable: {0}")]
    Unavailable(String),
    #[error("media manifest corrupt: {0}")]
    Corrupt(String),
    #[error("catalog export failed: {0}")]
    Io(String),
}

/// Ordered media points loaded once from the manifest.
///
/// Order is the manifest order and drives viewer prev/next navigation. The
/// shape is fixed after load; only positions change (placement authoring).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaCatalog {
    points: Vec<MediaPoint>,
}

impl MediaCatalog {
    /// Builds a catalog from manifest records, keeping the first record for
    /// any repeated id.
    pub fn from_records(records: Vec<MediaRecord>) -> Self {
        let mut seen: HashSet<String> = HashSet::with_capacity(records.len());
        let mut points = Vec::with_capacity(records.len());
        for record in records {
            if !seen.insert(record.id.clone()) {
                warn!("dropping media record with duplicate id {:?}", record.id);
                continue;
            }
            points.push(MediaPoint::from(record));
        }
        Self { points }
    }

    /// Parses a manifest body. The document must be a JSON array; elements
    /// that are not records at all are logged and skipped.
    pub fn from_manifest_json(raw: &str) -> Result<Self, CatalogError> {
        let values = serde_json::from_str::<Vec<serde_json::Value>>(raw)
            .map_err(|e| CatalogError::Corrupt(e.to_string()))?;
        let records = values
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| match serde_json::from_value::<MediaRecord>(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!("skipping manifest entry {i}: {err}");
                    None
                }
            })
            .collect();
        let catalog = Self::from_records(records);
        debug!("loaded {} media points", catalog.len());
        Ok(catalog)
    }

    pub fn points(&self) -> &[MediaPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MediaPoint> {
        self.points.get(index)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&MediaPoint> {
        self.points.iter().find(|p| p.id == id)
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.points.iter().position(|p| p.id == id)
    }

    /// Moves a point. The position is clamped into `[0, 100]` and rounded to
    /// 2 decimals before it is stored.
    pub fn set_position(&mut self, id: &str, position: Point2D) -> Result<Point2D, CatalogError> {
        let point = self
            .points
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))?;
        point.position = position.clamped().rounded();
        Ok(point.position)
    }

    pub fn placements(&self) -> Vec<Placement> {
        self.points.iter().map(Placement::from).collect()
    }

    /// JSON `[{id, src, x, y}, ...]` in catalog order.
    pub fn export_placements(&self) -> Result<String, CatalogError> {
        serde_json::to_string(&self.placements()).map_err(|e| CatalogError::Io(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MANIFEST: &str = r#"[
        {"id":"a","x":10,"y":20,"type":"photo","src":"a.jpg","title":"A","date":"June","shortLabel":"A"},
        {"id":"b","x":50,"y":50,"type":"video","src":"b.mp4","poster":"b.jpg","title":"B","date":"July","shortLabel":"B"},
        {"id":"a","x":90,"y":90,"src":"dup.jpg"}
    ]"#;

    #[test]
    fn manifest_keeps_order_and_first_of_duplicates() {
        let catalog = MediaCatalog::from_manifest_json(MANIFEST).unwrap();
        let ids: Vec<&str> = catalog.points().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(catalog.find_by_id("a").unwrap().src, "a.jpg");
        assert_eq!(catalog.index_of("b"), Some(1));
        assert_eq!(catalog.index_of("zzz"), None);
    }

    #[test]
    fn non_array_manifest_is_corrupt() {
        let err = MediaCatalog::from_manifest_json(r#"{"points":[]}"#).unwrap_err();
        assert!(matches!(err, CatalogError::Corrupt(_)));
        assert!(MediaCatalog::from_manifest_json("<html>").is_err());
    }

    #[test]
    fn null_fields_do_not_fail_the_manifest() {
        let raw = r#"[
            {"id":"a","x":10,"y":20,"title":null,"date":null},
            {"id":7,"x":"5","y":50,"title":"Seven"},
            {"id":"b","x":50,"y":50,"title":"B"}
        ]"#;
        let catalog = MediaCatalog::from_manifest_json(raw).unwrap();
        let ids: Vec<&str> = catalog.points().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "7", "b"]);
        assert_eq!(catalog.find_by_id("a").unwrap().title, "");
        assert_eq!(catalog.find_by_id("7").unwrap().position, Point2D::new(5.0, 50.0));
    }

    #[test]
    fn non_record_entries_are_skipped() {
        let raw = r#"[{"id":"a","x":1,"y":2}, 42, "junk", null, {"id":"b"}]"#;
        let catalog = MediaCatalog::from_manifest_json(raw).unwrap();
        let ids: Vec<&str> = catalog.points().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn set_position_clamps_and_rounds() {
        let mut catalog = MediaCatalog::from_manifest_json(MANIFEST).unwrap();
        let stored = catalog.set_position("b", Point2D::new(-3.0, 33.3333)).unwrap();
        assert_eq!(stored, Point2D::new(0.0, 33.33));
        assert_eq!(catalog.find_by_id("b").unwrap().position, stored);
    }

    #[test]
    fn set_position_on_missing_id_changes_nothing() {
        let mut catalog = MediaCatalog::from_manifest_json(MANIFEST).unwrap();
        let before = catalog.clone();
        let err = catalog.set_position("gone", Point2D::new(1.0, 1.0)).unwrap_err();
        assert_eq!(err, CatalogError::NotFound("gone".to_string()));
        assert_eq!(catalog, before);
    }

    #[test]
    fn placements_export_id_src_and_position() {
        let mut catalog = MediaCatalog::from_manifest_json(MANIFEST).unwrap();
        catalog.set_position("a", Point2D::new(12.5, 30.0)).unwrap();
        assert_eq!(
            catalog.export_placements().unwrap(),
            r#"[{"id":"a","src":"a.jpg","x":12.5,"y":30.0},{"id":"b","src":"b.mp4","x":50.0,"y":50.0}]"#
        );
    }
}
