use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrailError {
    #[error("browser storage unavailable")]
    StorageUnavailable,
    #[error("trail snapshot corrupt: {0}")]
    Corrupt(String),
    #[error("trail storage error: {0}")]
    Io(String),
}

/// Durable slot holding one serialized trail snapshot.
pub trait TrailStorage {
    fn read(&self) -> Result<Option<String>, TrailError>;
    fn write(&mut self, raw: &str) -> Result<(), TrailError>;
}

/// Process-lifetime storage; used when no durable backend exists and in tests.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTrailStorage {
    slot: Option<String>,
    writes: usize,
}

impl InMemoryTrailStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Some(raw.into()),
            writes: 0,
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl TrailStorage for InMemoryTrailStorage {
    fn read(&self) -> Result<Option<String>, TrailError> {
        Ok(self.slot.clone())
    }

    fn write(&mut self, raw: &str) -> Result<(), TrailError> {
        self.slot = Some(raw.to_string());
        self.writes += 1;
        Ok(())
    }
}

impl<T: TrailStorage + ?Sized> TrailStorage for Box<T> {
    fn read(&self) -> Result<Option<String>, TrailError> {
        (**self).read()
    }

    fn write(&mut self, raw: &str) -> Result<(), TrailError> {
        (**self).write(raw)
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_storage {
    use super::{TrailError, TrailStorage};

    #[derive(Debug)]
    pub struct LocalStorageTrailStorage {
        key: String,
    }

    impl LocalStorageTrailStorage {
        pub fn new(key: impl Into<String>) -> Result<Self, TrailError> {
            // Fails here when storage is disabled.
            window_local_storage()?;
            Ok(Self { key: key.into() })
        }
    }

    impl TrailStorage for LocalStorageTrailStorage {
        fn read(&self) -> Result<Option<String>, TrailError> {
            let storage = window_local_storage()?;
            storage
                .get_item(&self.key)
                .map_err(|e| TrailError::Io(format!("get_item failed: {:?}", e)))
        }

        fn write(&mut self, raw: &str) -> Result<(), TrailError> {
            let storage = window_local_storage()?;
            storage
                .set_item(&self.key, raw)
                .map_err(|e| TrailError::Io(format!("set_item failed: {:?}", e)))
        }
    }

    fn window_local_storage() -> Result<web_sys::Storage, TrailError> {
        let win = web_sys::window().ok_or(TrailError::StorageUnavailable)?;
        win.local_storage()
            .map_err(|e| TrailError::Io(format!("localStorage error: {:?}", e)))?
            .ok_or(TrailError::StorageUnavailable)
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_storage::LocalStorageTrailStorage;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug)]
pub struct LocalStorageTrailStorage;

#[cfg(not(target_arch = "wasm32"))]
impl LocalStorageTrailStorage {
    pub fn new(_key: impl Into<String>) -> Result<Self, TrailError> {
        Err(TrailError::StorageUnavailable)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TrailStorage for LocalStorageTrailStorage {
    fn read(&self) -> Result<Option<String>, TrailError> {
        Err(TrailError::StorageUnavailable)
    }

    fn write(&mut self, _raw: &str) -> Result<(), TrailError> {
        Err(TrailError::StorageUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_round_trips_raw_text() {
        let mut s = InMemoryTrailStorage::new();
        assert_eq!(s.read().unwrap(), None);
        s.write("[[1,2],[3,4]]").unwrap();
        assert_eq!(s.read().unwrap().as_deref(), Some("[[1,2],[3,4]]"));
        assert_eq!(s.write_count(), 1);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn local_storage_is_unavailable_off_wasm() {
        assert_eq!(
            LocalStorageTrailStorage::new("k").unwrap_err(),
            TrailError::StorageUnavailable
        );
    }
}
