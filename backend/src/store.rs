//! JSON-file key-value store
//!
//! The persistence layer is a set of named JSON blobs with whole-value
//! replace semantics: each key maps to one file under the data directory,
//! a load that fails to parse falls back to the type's default, and writes
//! replace the whole blob. `update` serializes read-modify-write sequences
//! behind one async lock so concurrent handlers cannot tear a blob.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;

use crate::error::{AppError, AppResult};

/// Blob keys, one per persisted collection
pub mod keys {
    pub const EMPLOYEES: &str = "keiths-employees";
    pub const INVENTORY_ITEMS: &str = "keiths-inventory-items";
    pub const WASTE_ENTRIES: &str = "keiths-waste-entries";
    pub const PRODUCTION_ENTRIES: &str = "keiths-production-entries";
    pub const WEEK_START_STOCKS: &str = "keiths-week-start-stocks";
    pub const ORDERED_QUANTITIES: &str = "keiths-ordered-quantities";
}

/// Handle to the blob store, cheap to clone
#[derive(Clone)]
pub struct Store {
    data_dir: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl Store {
    /// Open (and create if needed) the data directory
    pub async fn open(data_dir: impl AsRef<Path>) -> AppResult<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to create {}: {}", data_dir.display(), e)))?;

        Ok(Self {
            data_dir,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }

    /// Load a blob, falling back to the default on a missing file or a
    /// parse failure. Corrupt blobs are logged and discarded rather than
    /// propagated.
    pub async fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(e) => {
                    tracing::warn!("Discarding corrupt blob {}: {}", key, e);
                    T::default()
                }
            },
            Err(_) => T::default(),
        }
    }

    /// Replace a blob wholesale
    pub async fn save<T>(&self, key: &str, value: &T) -> AppResult<()>
    where
        T: Serialize,
    {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| AppError::Storage(format!("Failed to serialize {}: {}", key, e)))?;
        tokio::fs::write(self.path_for(key), bytes)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", key, e)))?;
        Ok(())
    }

    /// Read-modify-write one blob under the store lock. The closure's
    /// error aborts the write.
    pub async fn update<T, F, R>(&self, key: &str, f: F) -> AppResult<R>
    where
        T: DeserializeOwned + Default + Serialize,
        F: FnOnce(&mut T) -> AppResult<R>,
    {
        let _guard = self.write_lock.lock().await;
        let mut value: T = self.load(key).await;
        let result = f(&mut value)?;
        self.save(key, &value).await?;
        Ok(result)
    }

    /// Acquire the store lock for a multi-blob read-modify-write sequence.
    pub async fn lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }
}
