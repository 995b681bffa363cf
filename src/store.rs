//! Persistent key-value slots and the adapter that keeps the user-created
//! collection in one of them.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::fs;

use crate::model::CustomPokemon;

/// Slot holding the JSON array of user-created Pokémon.
pub const COLLECTION_KEY: &str = "customPokemons";

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("storage io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("storage slot poisoned")]
    Poisoned,
}

/// String-keyed persistent storage, one value per key.
#[async_trait]
pub trait StorageSlot: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Distinguishes staging files of overlapping writes.
static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// One `<key>.json` file per slot under a data directory.
#[derive(Clone, Debug)]
pub struct FileSlot {
    dir: PathBuf,
}

impl FileSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn staging_path(&self, key: &str) -> PathBuf {
        let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir.join(format!("{key}.json.{}-{seq}.tmp", std::process::id()))
    }
}

#[async_trait]
impl StorageSlot for FileSlot {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| StoreError::Io {
                path: self.dir.clone(),
                source,
            })?;
        // Write then rename so an interrupted write leaves the old value.
        // Overlapping writes each stage to their own file.
        let path = self.path_for(key);
        let staging = self.staging_path(key);
        if let Err(source) = fs::write(&staging, value).await {
            if let Err(error) = fs::remove_file(&staging).await {
                tracing::debug!(path = %staging.display(), %error, "no staging file to remove");
            }
            return Err(StoreError::Io {
                path: staging,
                source,
            });
        }
        fs::rename(&staging, &path)
            .await
            .map_err(|source| StoreError::Io { path, source })
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

/// In-memory slots for tests.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(key: &str, value: &str) -> Self {
        let slot = Self::default();
        if let Ok(mut values) = slot.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        slot
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }
}

#[async_trait]
impl StorageSlot for MemorySlot {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::Poisoned)?;
        values.remove(key);
        Ok(())
    }
}

/// Reads and writes the user-created collection as a single JSON value.
pub struct LocalStore<S> {
    slot: S,
    key: String,
}

impl<S: StorageSlot> LocalStore<S> {
    pub fn new(slot: S) -> Self {
        Self::with_key(slot, COLLECTION_KEY)
    }

    pub fn with_key(slot: S, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Never fails: unreadable or corrupt contents load as an empty
    /// collection, and corrupt contents are removed from the slot.
    pub async fn load(&self) -> Vec<CustomPokemon> {
        let stored = match self.slot.get(&self.key).await {
            Ok(Some(stored)) => stored,
            Ok(None) => return Vec::new(),
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "failed to read stored collection");
                return Vec::new();
            }
        };

        let trimmed = stored.trim();
        if trimmed.is_empty() || trimmed == "[]" || trimmed == "undefined" {
            return Vec::new();
        }

        match serde_json::from_str::<Vec<CustomPokemon>>(trimmed) {
            Ok(records) => {
                tracing::debug!(key = %self.key, count = records.len(), "loaded stored collection");
                records
            }
            Err(error) => {
                tracing::warn!(key = %self.key, %error, "stored collection corrupted, clearing");
                if let Err(error) = self.clear().await {
                    tracing::error!(key = %self.key, %error, "failed to clear corrupted collection");
                }
                Vec::new()
            }
        }
    }

    pub async fn save(&self, records: &[CustomPokemon]) -> Result<(), StoreError> {
        let json = serde_json::to_string(records)?;
        self.slot.set(&self.key, &json).await?;
        tracing::debug!(key = %self.key, count = records.len(), "saved collection");
        Ok(())
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.slot.remove(&self.key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PokemonType;

    fn record(id: u32, name: &str) -> CustomPokemon {
        CustomPokemon {
            id,
            name: name.to_string(),
            image: format!("https://img.example/{name}.png"),
            type_one: PokemonType::Grass,
            type_two: None,
        }
    }

    #[tokio::test]
    async fn absent_slot_loads_empty() {
        let store = LocalStore::new(MemorySlot::new());
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn placeholder_values_load_empty() {
        for raw in ["[]", "undefined", "  "] {
            let store = LocalStore::new(MemorySlot::with_value(COLLECTION_KEY, raw));
            assert!(store.load().await.is_empty(), "{raw:?} should load empty");
        }
    }

    #[tokio::test]
    async fn corrupt_json_is_cleared() {
        let store = LocalStore::new(MemorySlot::with_value(COLLECTION_KEY, "{not json"));
        assert!(store.load().await.is_empty());
        assert_eq!(store.slot().raw(COLLECTION_KEY), None);
    }

    #[tokio::test]
    async fn unknown_type_counts_as_corruption() {
        let raw = r#"[{"id":1,"name":"x","image":"https://a/b.png","typeOne":"shadow"}]"#;
        let store = LocalStore::new(MemorySlot::with_value(COLLECTION_KEY, raw));
        assert!(store.load().await.is_empty());
        assert_eq!(store.slot().raw(COLLECTION_KEY), None);
    }

    #[tokio::test]
    async fn missing_type_two_defaults_to_none() {
        let raw = r#"[{"id":3,"name":"brote","image":"https://a/b.png","typeOne":"grass"}]"#;
        let store = LocalStore::new(MemorySlot::with_value(COLLECTION_KEY, raw));
        let records = store.load().await;
        assert_eq!(records, vec![record(3, "brote")]);
    }

    #[tokio::test]
    async fn clear_removes_slot() {
        let store = LocalStore::new(MemorySlot::new());
        store.save(&[record(1, "uno")]).await.unwrap();
        assert!(store.slot().raw(COLLECTION_KEY).is_some());
        store.clear().await.unwrap();
        assert_eq!(store.slot().raw(COLLECTION_KEY), None);
    }

    #[tokio::test]
    async fn file_slot_remove_of_missing_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path());
        slot.remove(COLLECTION_KEY).await.unwrap();
        assert_eq!(slot.get(COLLECTION_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn overlapping_writes_stage_separately() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path());
        let long = format!("[{}]", vec!["0"; 50_000].join(","));

        let (first, second) = tokio::join!(
            slot.set(COLLECTION_KEY, &long),
            slot.set(COLLECTION_KEY, "[1]")
        );
        first.unwrap();
        second.unwrap();

        let stored = slot.get(COLLECTION_KEY).await.unwrap().unwrap();
        assert!(stored == long || stored == "[1]");
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn staging_paths_are_unique() {
        let slot = FileSlot::new("/data");
        let first = slot.staging_path(COLLECTION_KEY);
        let second = slot.staging_path(COLLECTION_KEY);
        assert_ne!(first, second);
        assert!(first.starts_with("/data"));
        assert!(first.to_string_lossy().ends_with(".tmp"));
    }

    #[tokio::test]
    async fn file_slot_creates_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested").join("pokedex"));
        slot.set(COLLECTION_KEY, "[]").await.unwrap();
        assert!(slot.path_for(COLLECTION_KEY).exists());
    }
}
