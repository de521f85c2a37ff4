//! Key-value persistence for tracker state
//!
//! `MetricStore` is a minimal string key-value surface: string keys,
//! string payloads, best effort. The JSON-file implementation keeps one
//! file per key under a data directory; the no-op implementation backs
//! execution contexts with no storage at all.

use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::PathBuf;

/// Storage key for the serialized metric log
pub const HISTORY_KEY: &str = "searchHistory";

/// Storage key for the serialized popularity table
pub const POPULAR_KEY: &str = "popularSearches";

/// Durable key-value storage for tracker state
///
/// Implementations are selected once at tracker construction. Callers treat
/// every operation as best effort; the tracker logs and swallows failures.
pub trait MetricStore: Send + Sync {
    /// Read the payload stored under `key`, if any
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous payload
    fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// File-backed store keeping one `<key>.json` file per key
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`, creating the directory if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn create(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl MetricStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let payload = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Ok(Some(payload))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, value)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Persisted {} bytes under key '{key}'", value.len());
        Ok(())
    }
}

/// Store for contexts with no durable storage
///
/// Reads nothing and accepts every write, so the tracker degrades to an
/// in-memory session log.
pub struct NoopStore;

impl MetricStore for NoopStore {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Ok(())
    }
}
