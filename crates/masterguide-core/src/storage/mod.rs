//! Flat-file JSON persistence
//!
//! Every persisted entity (visit counter, visit log, content catalog) goes
//! through a [`StateStore`] so the logger and synchronizer can be exercised
//! against an in-memory store in tests.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod visits;

/// Load/save capability over one persisted value.
///
/// Missing state loads as `T::default()`; malformed state is an error, not a
/// silent reset — a corrupt visit log must never be wiped by the next save.
pub trait StateStore<T>: Send + Sync {
    fn load(&self) -> Result<T>;
    fn save(&self, value: &T) -> Result<()>;
}

/// Production store: one pretty-printed JSON file per value.
pub struct JsonFileStore<T> {
    path: PathBuf,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonFileStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<T> StateStore<T> for JsonFileStore<T>
where
    T: Serialize + DeserializeOwned + Default + Send + Sync,
{
    fn load(&self) -> Result<T> {
        if !self.path.exists() {
            return Ok(T::default());
        }
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let value = serde_json::from_str(&contents)
            .with_context(|| format!("malformed JSON in {}", self.path.display()))?;
        Ok(value)
    }

    fn save(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(value)
            .with_context(|| format!("failed to serialize {}", self.path.display()))?;

        // Write to a sibling and rename so a crash mid-write never leaves a
        // truncated store behind.
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, contents)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store for tests and embedding.
#[derive(Default)]
pub struct MemoryStore<T> {
    value: Mutex<T>,
}

impl<T: Clone + Default> MemoryStore<T> {
    pub fn new(initial: T) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }
}

impl<T> StateStore<T> for MemoryStore<T>
where
    T: Clone + Default + Send + Sync,
{
    fn load(&self) -> Result<T> {
        let guard = self
            .value
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, value: &T) -> Result<()> {
        let mut guard = self
            .value
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = value.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn missing_file_loads_as_default() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store: JsonFileStore<BTreeMap<String, u64>> =
            JsonFileStore::new(dir.path().join("absent.json"));
        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store: JsonFileStore<BTreeMap<String, u64>> =
            JsonFileStore::new(dir.path().join("nested").join("map.json"));

        let mut map = BTreeMap::new();
        map.insert("count".to_string(), 7);
        store.save(&map).expect("save");
        assert_eq!(store.load().expect("load"), map);
    }

    #[test]
    fn malformed_content_is_an_error_and_file_survives() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").expect("write");

        let store: JsonFileStore<BTreeMap<String, u64>> = JsonFileStore::new(&path);
        let err = store.load().expect_err("malformed content must fail");
        assert!(err.to_string().contains("broken.json"));
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "{not json");
    }

    #[test]
    fn memory_store_round_trips() {
        let store = MemoryStore::new(vec![1u64, 2]);
        store.save(&vec![1, 2, 3]).expect("save");
        assert_eq!(store.load().expect("load"), vec![1, 2, 3]);
    }
}
