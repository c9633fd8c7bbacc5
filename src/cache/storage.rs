//! Key-value store trait with in-memory and SQLite implementations.

use color_eyre::{eyre::eyre, Result};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  /// Writing the value would exceed the store's capacity.
  #[error("storage quota exceeded ({needed} bytes needed, {quota} allowed)")]
  QuotaExceeded { needed: usize, quota: usize },
  /// The underlying backend failed.
  #[error("storage backend error: {0}")]
  Backend(String),
}

impl From<rusqlite::Error> for StoreError {
  fn from(e: rusqlite::Error) -> Self {
    StoreError::Backend(e.to_string())
  }
}

/// Synchronous, string-keyed, string-valued persistent store.
///
/// This is the only surface the cache layer needs from its storage: point
/// reads and writes plus key enumeration for prefix-scoped clears.
pub trait KeyValueStore: Send + Sync {
  /// Read the value stored under `key`.
  fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

  /// Remove `key`. Removing an absent key is not an error.
  fn remove(&self, key: &str) -> Result<(), StoreError>;

  /// Enumerate every key currently in the store.
  fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-process store, optionally bounded by a byte quota.
///
/// The quota counts key and value bytes, the way browser storage does.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries: Mutex<BTreeMap<String, String>>,
  quota: Option<usize>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Limit the total size of stored keys and values to `bytes`.
  pub fn with_quota(mut self, bytes: usize) -> Self {
    self.quota = Some(bytes);
    self
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
    self
      .entries
      .lock()
      .map_err(|e| StoreError::Backend(format!("Lock poisoned: {}", e)))
  }
}

impl KeyValueStore for MemoryStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    Ok(self.lock()?.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let mut entries = self.lock()?;

    if let Some(quota) = self.quota {
      let used: usize = entries
        .iter()
        .filter(|(k, _)| k.as_str() != key)
        .map(|(k, v)| k.len() + v.len())
        .sum();
      let needed = used + key.len() + value.len();
      if needed > quota {
        return Err(StoreError::QuotaExceeded { needed, quota });
      }
    }

    entries.insert(key.to_string(), value.to_string());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    self.lock()?.remove(key);
    Ok(())
  }

  fn keys(&self) -> Result<Vec<String>, StoreError> {
    Ok(self.lock()?.keys().cloned().collect())
  }
}

/// SQLite-backed persistent store.
pub struct SqliteStore {
  conn: Mutex<Connection>,
}

/// Schema for the key-value table.
const STORE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS kv (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

impl SqliteStore {
  /// Open (or create) the store at the default location.
  pub fn open() -> Result<Self> {
    Self::open_at(&Self::default_path()?)
  }

  /// Open (or create) the store at `path`.
  pub fn open_at(path: &Path) -> Result<Self> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)
        .map_err(|e| eyre!("Failed to create cache directory: {}", e))?;
    }

    let conn = Connection::open(path)
      .map_err(|e| eyre!("Failed to open cache database at {}: {}", path.display(), e))?;

    let store = Self {
      conn: Mutex::new(conn),
    };
    store.run_migrations()?;

    Ok(store)
  }

  /// Get the default database path.
  pub fn default_path() -> Result<PathBuf> {
    Ok(crate::config::data_dir()?.join("cache.db"))
  }

  fn run_migrations(&self) -> Result<()> {
    let conn = self
      .conn
      .lock()
      .map_err(|e| eyre!("Lock poisoned: {}", e))?;

    conn
      .execute_batch(STORE_SCHEMA)
      .map_err(|e| eyre!("Failed to run cache migrations: {}", e))?;

    Ok(())
  }

  fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
    self
      .conn
      .lock()
      .map_err(|e| StoreError::Backend(format!("Lock poisoned: {}", e)))
  }
}

impl KeyValueStore for SqliteStore {
  fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
    let conn = self.lock()?;
    let value = conn
      .query_row("SELECT value FROM kv WHERE key = ?", params![key], |row| {
        row.get(0)
      })
      .optional()?;
    Ok(value)
  }

  fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
    let conn = self.lock()?;
    conn.execute(
      "INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)",
      params![key, value],
    )?;
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StoreError> {
    let conn = self.lock()?;
    conn.execute("DELETE FROM kv WHERE key = ?", params![key])?;
    Ok(())
  }

  fn keys(&self) -> Result<Vec<String>, StoreError> {
    let conn = self.lock()?;
    let mut stmt = conn.prepare("SELECT key FROM kv ORDER BY key")?;
    let keys = stmt
      .query_map([], |row| row.get(0))?
      .collect::<Result<Vec<String>, _>>()?;
    Ok(keys)
  }
}
