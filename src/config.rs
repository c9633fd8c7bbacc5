use chrono::Duration;
use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::cache::CacheConfig;

/// Environment variable holding the cache TTL in milliseconds.
pub const TTL_ENV: &str = "FOLIO_CACHE_TTL";
/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "FOLIO_API_URL";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
  pub api: ApiConfig,
  pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
  /// Base URL that endpoints are appended to
  pub url: String,
  /// Per-request timeout
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      url: "http://localhost:3000/api".to_string(),
      timeout_secs: 30,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
  /// SQLite database under the data directory
  #[default]
  Sqlite,
  /// Process memory only; nothing survives a restart
  Memory,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheSettings {
  /// 0 revalidates on every read
  pub ttl_ms: u64,
  pub version: String,
  pub key_prefix: String,
  /// Oldest entry still served when the API is down (unbounded if unset)
  pub max_stale_ms: Option<u64>,
  pub store: StoreKind,
  /// Database path for the sqlite store (defaults to the data directory)
  pub path: Option<PathBuf>,
  /// Wipe cached entries before the first request
  pub clear_on_start: bool,
}

impl Default for CacheSettings {
  fn default() -> Self {
    let defaults = CacheConfig::default();
    Self {
      ttl_ms: 0,
      version: defaults.version,
      key_prefix: defaults.key_prefix,
      max_stale_ms: None,
      store: StoreKind::default(),
      path: None,
      clear_on_start: false,
    }
  }
}

impl CacheSettings {
  pub fn to_cache_config(&self) -> CacheConfig {
    CacheConfig {
      ttl: millis(self.ttl_ms),
      version: self.version.clone(),
      key_prefix: self.key_prefix.clone(),
      max_stale: self.max_stale_ms.map(millis),
    }
  }
}

fn millis(ms: u64) -> Duration {
  Duration::milliseconds(i64::try_from(ms).unwrap_or(i64::MAX))
}

impl Config {
  /// Load configuration from file and environment.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./folio.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/folio-cache/config.yaml
  ///
  /// Without a config file the defaults are used.
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    let config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Self::default(),
    };

    config.with_overrides(
      std::env::var(TTL_ENV).ok().as_deref(),
      std::env::var(API_URL_ENV).ok().as_deref(),
    )
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("folio.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("folio-cache").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    Self::parse(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))
  }

  fn parse(contents: &str) -> Result<Self, serde_yaml::Error> {
    serde_yaml::from_str(contents)
  }

  /// Apply the TTL and API url overrides, as read from the environment.
  fn with_overrides(mut self, ttl: Option<&str>, api_url: Option<&str>) -> Result<Self> {
    if let Some(ttl) = ttl.map(str::trim).filter(|t| !t.is_empty()) {
      self.cache.ttl_ms = ttl
        .parse::<u64>()
        .map_err(|e| eyre!("{} must be a number of milliseconds, got {:?}: {}", TTL_ENV, ttl, e))?;
    }

    if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
      self.api.url = url.to_string();
    }

    Ok(self)
  }
}

/// Directory for the cache database and log files.
pub fn data_dir() -> Result<PathBuf> {
  let data_dir = dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .ok_or_else(|| eyre!("Could not determine data directory"))?;

  Ok(data_dir.join("folio-cache"))
}
