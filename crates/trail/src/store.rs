use foundation::point::Point2D;
use geometry::{PathDescription, render_path};
use tracing::{debug, warn};

use crate::defaults::default_trail;
use crate::storage::{TrailError, TrailStorage};

/// Snapshots shorter than this are discarded in favour of the default trail.
pub const MIN_STORED_WAYPOINTS: usize = 2;

/// Owns the ordered trail waypoints.
///
/// The in-memory sequence is authoritative for the session. Every mutation is
/// followed by exactly one write attempt; write failures are logged and
/// dropped.
#[derive(Debug)]
pub struct TrailStore<S> {
    storage: S,
    waypoints: Vec<Point2D>,
}

impl<S: TrailStorage> TrailStore<S> {
    /// Loads the persisted snapshot, falling back to the built-in default.
    pub fn load(storage: S) -> Self {
        let waypoints = load_waypoints(&storage);
        Self { storage, waypoints }
    }

    pub fn waypoints(&self) -> &[Point2D] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn append(&mut self, point: Point2D) {
        self.waypoints.push(point);
        self.persist();
    }

    /// Removes the last waypoint. Returns `false` (and writes nothing) when
    /// the trail is already empty.
    pub fn undo_last(&mut self) -> bool {
        if self.waypoints.pop().is_none() {
            return false;
        }
        self.persist();
        true
    }

    pub fn clear(&mut self) {
        self.waypoints.clear();
        self.persist();
    }

    /// JSON `[[x, y], ...]`, the same form that is persisted.
    pub fn export_snapshot(&self) -> Result<String, TrailError> {
        serde_json::to_string(&self.waypoints).map_err(|e| TrailError::Io(e.to_string()))
    }

    pub fn path(&self) -> PathDescription {
        render_path(&self.waypoints)
    }

    fn persist(&mut self) {
        let raw = match self.export_snapshot() {
            Ok(raw) => raw,
            Err(err) => {
                warn!("trail snapshot encode failed: {err}");
                return;
            }
        };
        if let Err(err) = self.storage.write(&raw) {
            warn!("trail snapshot write failed: {err}");
        }
    }
}

fn load_waypoints(storage: &impl TrailStorage) -> Vec<Point2D> {
    match read_snapshot(storage) {
        Ok(Some(points)) => points,
        Ok(None) => default_trail(),
        Err(err) => {
            debug!("using default trail: {err}");
            default_trail()
        }
    }
}

fn read_snapshot(storage: &impl TrailStorage) -> Result<Option<Vec<Point2D>>, TrailError> {
    let Some(raw) = storage.read()? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let points = serde_json::from_str::<Vec<Point2D>>(&raw)
        .map_err(|e| TrailError::Corrupt(e.to_string()))?;
    if points.len() < MIN_STORED_WAYPOINTS {
        return Ok(None);
    }
    Ok(Some(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::DEFAULT_TRAIL;
    use crate::storage::InMemoryTrailStorage;
    use pretty_assertions::assert_eq;

    /// Storage that fails every read and write.
    #[derive(Debug, Default)]
    struct BrokenStorage {
        write_attempts: usize,
    }

    impl TrailStorage for BrokenStorage {
        fn read(&self) -> Result<Option<String>, TrailError> {
            Err(TrailError::Io("disabled".to_string()))
        }

        fn write(&mut self, _raw: &str) -> Result<(), TrailError> {
            self.write_attempts += 1;
            Err(TrailError::Io("quota exceeded".to_string()))
        }
    }

    fn store_with(raw: &str) -> TrailStore<InMemoryTrailStorage> {
        TrailStore::load(InMemoryTrailStorage::with_raw(raw))
    }

    #[test]
    fn absent_snapshot_loads_default() {
        let store = TrailStore::load(InMemoryTrailStorage::new());
        assert_eq!(store.waypoints(), &DEFAULT_TRAIL[..]);
    }

    #[test]
    fn invalid_snapshots_load_default() {
        for raw in ["{\"x\":1}", "42", "[]", "[[1,2]]", "not json", "[[1,2],[3]]", "   "] {
            let store = store_with(raw);
            assert_eq!(store.waypoints(), &DEFAULT_TRAIL[..], "snapshot {raw:?}");
        }
    }

    #[test]
    fn read_failure_loads_default() {
        let store = TrailStore::load(BrokenStorage::default());
        assert_eq!(store.len(), DEFAULT_TRAIL.len());
    }

    #[test]
    fn valid_snapshot_is_returned_exactly() {
        let store = store_with("[[1.5,2],[3,4.25],[99,0]]");
        assert_eq!(
            store.waypoints(),
            &[
                Point2D::new(1.5, 2.0),
                Point2D::new(3.0, 4.25),
                Point2D::new(99.0, 0.0),
            ]
        );
    }

    #[test]
    fn append_persists_once_per_call() {
        let mut store = store_with("[[1,1],[2,2]]");
        store.append(Point2D::new(3.0, 3.0));
        assert_eq!(store.storage().write_count(), 1);
        assert_eq!(store.storage().raw(), Some("[[1.0,1.0],[2.0,2.0],[3.0,3.0]]"));
    }

    #[test]
    fn undo_on_empty_is_a_noop() {
        let mut store = store_with("[[1,1],[2,2]]");
        store.clear();
        assert!(!store.undo_last());
        assert!(store.is_empty());
        // Only the clear wrote.
        assert_eq!(store.storage().write_count(), 1);
    }

    #[test]
    fn undo_removes_last() {
        let mut store = store_with("[[1,1],[2,2]]");
        assert!(store.undo_last());
        assert_eq!(store.waypoints(), &[Point2D::new(1.0, 1.0)]);
        assert_eq!(store.storage().raw(), Some("[[1.0,1.0]]"));
    }

    #[test]
    fn clear_twice_stays_empty() {
        let mut store = TrailStore::load(InMemoryTrailStorage::new());
        store.clear();
        assert!(store.is_empty());
        store.clear();
        assert!(store.is_empty());
        assert_eq!(store.storage().raw(), Some("[]"));
    }

    #[test]
    fn cleared_trail_reloads_as_default() {
        let mut store = TrailStore::load(InMemoryTrailStorage::new());
        store.clear();
        let reloaded = TrailStore::load(store.storage().clone());
        assert_eq!(reloaded.len(), DEFAULT_TRAIL.len());
    }

    #[test]
    fn write_failures_keep_memory_authoritative() {
        let mut store = TrailStore::load(BrokenStorage::default());
        store.clear();
        store.append(Point2D::new(10.0, 10.0));
        store.append(Point2D::new(20.0, 20.0));
        assert!(store.undo_last());
        assert_eq!(store.waypoints(), &[Point2D::new(10.0, 10.0)]);
        assert_eq!(store.storage().write_attempts, 4);
    }

    #[test]
    fn export_does_not_mutate() {
        let store = store_with("[[1,2],[3,4]]");
        assert_eq!(store.export_snapshot().unwrap(), "[[1.0,2.0],[3.0,4.0]]");
        assert_eq!(store.len(), 2);
        assert_eq!(store.storage().write_count(), 0);
    }

    #[test]
    fn path_follows_waypoints() {
        let store = store_with("[[0,0],[60,30]]");
        assert_eq!(store.path().to_svg(), "M0,0 C10,5 50,25 60,30");
    }
}
