//! Cache entry format and its string codec.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A cached payload together with the metadata needed to judge its validity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
  /// The cached payload, opaque to the cache
  pub data: T,
  /// Milliseconds since the Unix epoch at write time
  pub timestamp: i64,
  /// Cache schema version the entry was written under
  pub version: String,
}

impl<T> CacheEntry<T> {
  pub fn new(data: T, timestamp: i64, version: impl Into<String>) -> Self {
    Self {
      data,
      timestamp,
      version: version.into(),
    }
  }

  /// Age of the entry in milliseconds at `now`. Negative if written in the future.
  pub fn age_ms(&self, now: i64) -> i64 {
    now.saturating_sub(self.timestamp)
  }

  /// An entry is valid when younger than `ttl_ms` and written under `version`.
  /// Entries timestamped after `now` are never valid.
  pub fn is_valid(&self, now: i64, ttl_ms: i64, version: &str) -> bool {
    (0..ttl_ms).contains(&self.age_ms(now)) && self.version == version
  }
}

/// Errors raised while encoding or decoding a cache entry.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
  #[error("failed to encode cache entry: {0}")]
  Encode(#[source] serde_json::Error),
  #[error("failed to decode cache entry: {0}")]
  Decode(#[source] serde_json::Error),
}

/// Serialize an entry to the store's string format.
pub fn encode<T: Serialize>(entry: &CacheEntry<T>) -> Result<String, CodecError> {
  serde_json::to_string(entry).map_err(CodecError::Encode)
}

/// Parse an entry previously produced by [`encode`].
pub fn decode<T: DeserializeOwned>(raw: &str) -> Result<CacheEntry<T>, CodecError> {
  serde_json::from_str(raw).map_err(CodecError::Decode)
}
