//! Persistence gateway: saves and loads `SavedMatrixRecord`s by name in a flat key-value store.
//!
//! Last write wins; there is no locking, versioning or timestamp.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::record::SavedMatrixRecord;

/// A flat string key-value store, shaped like the browser's `localStorage`.
pub trait MatrixStore {
    fn get_item(&self, name: &str) -> Result<Option<String>, StoreError>;

    fn set_item(&mut self, name: &str, value: &str) -> Result<(), StoreError>;

    /// Names currently stored, sorted.
    fn names(&self) -> Result<Vec<String>, StoreError>;
}

/// Encodes `record` and writes it under `name`, overwriting any previous record.
pub fn save(
    store: &mut impl MatrixStore,
    name: &str,
    record: &SavedMatrixRecord,
) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::BlankName);
    }
    let text = record.encode().map_err(|err| StoreError::Storage {
        name: name.to_string(),
        reason: err.to_string(),
    })?;
    store.set_item(name, &text)?;
    log::info!("Matrix \"{}\" saved ({} bytes)", name, text.len());
    Ok(())
}

/// Reads and decodes the record stored under `name`.
pub fn load(store: &impl MatrixStore, name: &str) -> Result<SavedMatrixRecord, StoreError> {
    let text = store
        .get_item(name)?
        .ok_or_else(|| StoreError::NotFound(name.to_string()))?;
    let record = SavedMatrixRecord::decode(name, &text)?;
    log::info!("Matrix \"{}\" loaded (size {})", name, record.size);
    Ok(record)
}

/// In-process store. An optional quota bounds the total bytes of names and values,
/// standing in for the browser's storage limit.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: HashMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn used_bytes_without(&self, name: &str) -> usize {
        self.items
            .iter()
            .filter(|(key, _)| key.as_str() != name)
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }
}

impl MatrixStore for MemoryStore {
    fn get_item(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(name).cloned())
    }

    fn set_item(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(name) + name.len() + value.len();
            if needed > quota {
                log::warn!("Memory store quota exceeded: {} > {} bytes", needed, quota);
                return Err(StoreError::Storage {
                    name: name.to_string(),
                    reason: format!("storage might be full ({} of {} bytes)", needed, quota),
                });
            }
        }
        self.items.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn names(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.items.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

/// A JSON object file mapping names to encoded records. The whole file is rewritten on every save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<serde_json::Map<String, serde_json::Value>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(serde_json::Map::new());
            }
            Err(err) => return Err(StoreError::Backend(err.to_string())),
        };
        if text.trim().is_empty() {
            return Ok(serde_json::Map::new());
        }
        serde_json::from_str(&text).map_err(|err| {
            StoreError::Backend(format!(
                "{} is not a matrix store: {}",
                self.path.display(),
                err
            ))
        })
    }
}

impl MatrixStore for FileStore {
    fn get_item(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.get(name).map(|value| match value {
            serde_json::Value::String(text) => text.clone(),
            // Hand-edited files may hold the record inline; hand it over as text
            other => other.to_string(),
        }))
    }

    fn set_item(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        let storage_error = |reason: String| StoreError::Storage {
            name: name.to_string(),
            reason,
        };
        let mut items = self.read_all()?;
        items.insert(name.to_string(), serde_json::Value::String(value.to_string()));
        let text = serde_json::to_string_pretty(&items).map_err(|err| storage_error(err.to_string()))?;
        std::fs::write(&self.path, text).map_err(|err| storage_error(err.to_string()))
    }

    fn names(&self) -> Result<Vec<String>, StoreError> {
        let mut names: Vec<String> = self.read_all()?.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
pub use local_storage::LocalStorageStore;

#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
mod local_storage {
    use super::MatrixStore;
    use crate::error::StoreError;

    /// The browser's `window.localStorage`.
    pub struct LocalStorageStore {
        storage: web_sys::Storage,
    }

    impl LocalStorageStore {
        pub fn new() -> Result<Self, StoreError> {
            let window = web_sys::window()
                .ok_or_else(|| StoreError::Backend("no window available".to_string()))?;
            let storage = window
                .local_storage()
                .map_err(|err| StoreError::Backend(format!("{:?}", err)))?
                .ok_or_else(|| StoreError::Backend("localStorage is unavailable".to_string()))?;
            Ok(Self { storage })
        }
    }

    impl MatrixStore for LocalStorageStore {
        fn get_item(&self, name: &str) -> Result<Option<String>, StoreError> {
            self.storage
                .get_item(name)
                .map_err(|err| StoreError::Backend(format!("{:?}", err)))
        }

        fn set_item(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
            // Throws QuotaExceededError when the origin's storage is full
            self.storage
                .set_item(name, value)
                .map_err(|err| StoreError::Storage {
                    name: name.to_string(),
                    reason: format!("storage might be full ({:?})", err),
                })
        }

        fn names(&self) -> Result<Vec<String>, StoreError> {
            let length = self
                .storage
                .length()
                .map_err(|err| StoreError::Backend(format!("{:?}", err)))?;
            let mut names = Vec::with_capacity(length as usize);
            for index in 0..length {
                if let Ok(Some(key)) = self.storage.key(index) {
                    names.push(key);
                }
            }
            names.sort();
            Ok(names)
        }
    }
}

cfg_if::cfg_if! {
    if #[cfg(all(feature = "wasm", target_arch = "wasm32"))] {
        /// The store a fresh front end should use on this platform.
        pub type DefaultStore = LocalStorageStore;
    } else {
        /// The store a fresh front end should use on this platform.
        pub type DefaultStore = MemoryStore;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cramer_core::AugmentedMatrix;

    fn record() -> SavedMatrixRecord {
        let matrix = AugmentedMatrix::from_rows(vec![
            vec![1.0, 2.0, 3.0, 4.0],
            vec![-1.5, 0.25, 7.0, 1e-3],
            vec![0.0, 0.0, 1.0, -2.0],
        ])
        .unwrap();
        SavedMatrixRecord::from_matrix(&matrix)
    }

    #[test]
    fn test_memory_round_trip() {
        let mut store = MemoryStore::new();
        save(&mut store, "system", &record()).unwrap();
        assert_eq!(load(&store, "system").unwrap(), record());
    }

    #[test]
    fn test_overwrite_on_collision() {
        let mut store = MemoryStore::new();
        save(&mut store, "a", &record()).unwrap();
        let empty = SavedMatrixRecord {
            size: 0,
            matrix: Vec::new(),
        };
        save(&mut store, "a", &empty).unwrap();
        assert_eq!(load(&store, "a").unwrap(), empty);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_name_is_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(load(&store, "nope"), Err(StoreError::NotFound(name)) if name == "nope"));
    }

    #[test]
    fn test_garbage_is_corrupt() {
        let mut store = MemoryStore::new();
        store.set_item("bad", "{\"size\": 2, \"matrix\": \"oops\"}").unwrap();
        assert!(matches!(load(&store, "bad"), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(save(&mut store, "  ", &record()), Err(StoreError::BlankName)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_quota_exceeded_is_storage_error() {
        let mut store = MemoryStore::with_quota(40);
        let err = save(&mut store, "big", &record()).unwrap_err();
        assert!(matches!(err, StoreError::Storage { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "cramer-file-store-{}-{}.json",
            std::process::id(),
            fastrand::u64(..)
        ));
        let mut store = FileStore::new(&path);
        assert!(matches!(load(&store, "x"), Err(StoreError::NotFound(_))));

        save(&mut store, "first", &record()).unwrap();
        save(&mut store, "second", &record()).unwrap();
        let reopened = FileStore::new(&path);
        assert_eq!(load(&reopened, "first").unwrap(), record());
        assert_eq!(reopened.names().unwrap(), vec!["first", "second"]);

        std::fs::remove_file(&path).unwrap();
    }
}
