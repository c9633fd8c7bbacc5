//! Persistent read-through cache for API resources.
//!
//! This module provides an endpoint-keyed caching mechanism that:
//! - Serves entries younger than a TTL without touching the network
//! - Invalidates every entry at once when the configured version changes
//! - Writes every successful read back to a key-value store
//! - Provides basic offline mode (serve stale cache when network unavailable)

pub mod entry;
mod layer;
mod storage;
mod traits;

pub use entry::{CacheEntry, CodecError};
pub use layer::{CacheConfig, CacheLayer};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StoreError};
pub use traits::{
  CacheResult, CacheSource, Clock, FetchError, ManualClock, Method, RequestOptions,
  ResourceFetcher, SystemClock,
};
