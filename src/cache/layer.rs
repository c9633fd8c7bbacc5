//! Cache layer that orchestrates caching logic with network fetching.

use chrono::Duration;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use super::entry::{self, CacheEntry};
use super::storage::KeyValueStore;
use super::traits::{
  CacheResult, Clock, FetchError, RequestOptions, ResourceFetcher, SystemClock,
};

/// Tuning knobs for a [`CacheLayer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
  /// How long an entry may answer reads without touching the network.
  /// Zero means every read goes to the network first.
  pub ttl: Duration,
  /// Schema tag. Entries written under another version never count as fresh.
  pub version: String,
  /// Prefix for every key this layer owns in the store.
  pub key_prefix: String,
  /// How old an entry may be and still be served when the network fails.
  /// `None` serves any entry, however old.
  pub max_stale: Option<Duration>,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      ttl: Duration::zero(),
      version: "v1".to_string(),
      key_prefix: "portfolio_cache_".to_string(),
      max_stale: None,
    }
  }
}

/// Cache layer that manages caching logic and network fetching.
///
/// This layer sits between resource wrappers and the network client,
/// providing read-through caching with offline support:
///
/// 1. Valid cache entry - return it, no network call
/// 2. Missing/expired/other version - fetch from network and write back
/// 3. Network failure - serve the previous entry if there is one
///
/// Mutating requests skip all of the above and go straight to the fetcher.
/// Concurrent misses for the same endpoint are not coalesced; each one
/// fetches and the last to complete wins the write.
pub struct CacheLayer<S, F, C = SystemClock> {
  store: Arc<S>,
  fetcher: Arc<F>,
  clock: Arc<C>,
  config: CacheConfig,
}

impl<S: KeyValueStore, F: ResourceFetcher> CacheLayer<S, F> {
  /// Create a new cache layer over the given store and fetcher.
  pub fn new(store: S, fetcher: F, config: CacheConfig) -> Self {
    Self {
      store: Arc::new(store),
      fetcher: Arc::new(fetcher),
      clock: Arc::new(SystemClock),
      config,
    }
  }
}

impl<S: KeyValueStore, F: ResourceFetcher, C: Clock> CacheLayer<S, F, C> {
  /// Replace the clock used to stamp and age entries.
  pub fn with_clock<C2: Clock>(self, clock: C2) -> CacheLayer<S, F, C2> {
    CacheLayer {
      store: self.store,
      fetcher: self.fetcher,
      clock: Arc::new(clock),
      config: self.config,
    }
  }

  pub fn config(&self) -> &CacheConfig {
    &self.config
  }

  pub fn store(&self) -> &S {
    &self.store
  }

  pub fn fetcher(&self) -> &F {
    &self.fetcher
  }

  /// Store key for an endpoint.
  pub fn storage_key(&self, endpoint: &str) -> String {
    format!("{}{}", self.config.key_prefix, endpoint)
  }

  /// Fetch `endpoint`, returning only the data.
  pub async fn fetch_with_cache<T>(
    &self,
    endpoint: &str,
    options: &RequestOptions,
  ) -> Result<T, FetchError>
  where
    T: Serialize + DeserializeOwned,
  {
    self
      .fetch_with_source(endpoint, options)
      .await
      .map(|result| result.data)
  }

  /// Fetch `endpoint`, reporting where the data came from.
  pub async fn fetch_with_source<T>(
    &self,
    endpoint: &str,
    options: &RequestOptions,
  ) -> Result<CacheResult<T>, FetchError>
  where
    T: Serialize + DeserializeOwned,
  {
    if !options.method.is_cacheable() {
      debug!(endpoint, method = options.method.as_str(), "bypassing cache");
      let value = self.fetcher.fetch(endpoint, options).await?;
      return into_payload(endpoint, value).map(CacheResult::from_network);
    }

    let key = self.storage_key(endpoint);
    let now = self.clock.now_ms();
    let ttl_ms = self.config.ttl.num_milliseconds();
    let cached = match self.read_entry::<T>(&key) {
      Some(entry) if entry.is_valid(now, ttl_ms, &self.config.version) => {
        debug!(endpoint, age_ms = entry.age_ms(now), "serving from cache");
        return Ok(CacheResult::from_cache(entry.data, entry.timestamp));
      }
      Some(entry) => {
        debug!(endpoint, age_ms = entry.age_ms(now), "cache entry expired");
        Some(entry)
      }
      None => None,
    };

    let fetched = self
      .fetcher
      .fetch(endpoint, options)
      .await
      .and_then(|value| into_payload::<T>(endpoint, value));

    match fetched {
      Ok(data) => {
        self.write_entry(&key, &data, now);
        Ok(CacheResult::from_network(data))
      }
      Err(err) => match cached {
        Some(entry) if self.within_stale_window(&entry, now) => {
          warn!(endpoint, error = %err, "fetch failed, serving stale cache");
          Ok(CacheResult::offline(entry.data, entry.timestamp))
        }
        Some(entry) => {
          warn!(
            endpoint,
            age_ms = entry.age_ms(now),
            "fetch failed and cached entry is too old to serve"
          );
          Err(err)
        }
        None => Err(err),
      },
    }
  }

  /// Drop the entry for `endpoint` and fetch it again from the network.
  pub async fn refresh(&self, endpoint: &str) -> Result<(), FetchError> {
    self.invalidate(endpoint);
    self
      .fetch_with_cache::<Value>(endpoint, &RequestOptions::get())
      .await?;
    Ok(())
  }

  /// Drop the entry for `endpoint` without refetching.
  pub fn invalidate(&self, endpoint: &str) {
    let key = self.storage_key(endpoint);
    if let Err(e) = self.store.remove(&key) {
      warn!(key = %key, error = %e, "failed to remove cache entry");
    }
  }

  /// Remove every key under the configured prefix. Returns how many were removed.
  pub fn clear_cache(&self) -> usize {
    let keys = match self.store.keys() {
      Ok(keys) => keys,
      Err(e) => {
        warn!(error = %e, "failed to enumerate cache keys");
        return 0;
      }
    };

    let mut removed = 0;
    for key in keys
      .iter()
      .filter(|k| k.starts_with(&self.config.key_prefix))
    {
      match self.store.remove(key) {
        Ok(()) => removed += 1,
        Err(e) => warn!(key = %key, error = %e, "failed to remove cache entry"),
      }
    }

    debug!(removed, prefix = %self.config.key_prefix, "cache cleared");
    removed
  }

  /// Read and decode the entry under `key`. Corrupt entries are evicted.
  fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
    let raw = match self.store.get(key) {
      Ok(raw) => raw?,
      Err(e) => {
        warn!(key, error = %e, "failed to read cache entry");
        return None;
      }
    };

    match entry::decode(&raw) {
      Ok(entry) => Some(entry),
      Err(e) => {
        warn!(key, error = %e, "discarding corrupt cache entry");
        if let Err(e) = self.store.remove(key) {
          warn!(key, error = %e, "failed to remove corrupt cache entry");
        }
        None
      }
    }
  }

  /// Best-effort write-back. Failures are logged, never returned.
  fn write_entry<T: Serialize>(&self, key: &str, data: &T, now: i64) {
    let entry = CacheEntry::new(data, now, self.config.version.as_str());
    let raw = match entry::encode(&entry) {
      Ok(raw) => raw,
      Err(e) => {
        warn!(key, error = %e, "not caching response");
        return;
      }
    };

    if let Err(e) = self.store.set(key, &raw) {
      warn!(key, error = %e, "failed to write cache entry");
    }
  }

  fn within_stale_window<T>(&self, entry: &CacheEntry<T>, now: i64) -> bool {
    match self.config.max_stale {
      Some(window) => (0..window.num_milliseconds()).contains(&entry.age_ms(now)),
      None => true,
    }
  }
}

/// Convert a raw JSON response into the caller's type.
fn into_payload<T: DeserializeOwned>(endpoint: &str, value: Value) -> Result<T, FetchError> {
  serde_json::from_value(value).map_err(|e| FetchError::Payload {
    endpoint: endpoint.to_string(),
    message: e.to_string(),
  })
}

impl<S, F, C> Clone for CacheLayer<S, F, C> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      fetcher: Arc::clone(&self.fetcher),
      clock: Arc::clone(&self.clock),
      config: self.config.clone(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::storage::MemoryStore;
  use crate::cache::traits::{CacheSource, ManualClock, Method};
  use crate::test_utils::{http_error, offline, ScriptedFetcher};
  use serde_json::json;

  type TestLayer = CacheLayer<MemoryStore, ScriptedFetcher, Arc<ManualClock>>;

  fn config(ttl_ms: i64) -> CacheConfig {
    CacheConfig {
      ttl: Duration::milliseconds(ttl_ms),
      ..CacheConfig::default()
    }
  }

  fn build(
    config: CacheConfig,
    store: MemoryStore,
    fetcher: ScriptedFetcher,
  ) -> (TestLayer, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(0));
    let layer = CacheLayer::new(store, fetcher, config).with_clock(Arc::clone(&clock));
    (layer, clock)
  }

  fn seed(layer: &TestLayer, endpoint: &str, data: Value, timestamp: i64, version: &str) {
    let raw = entry::encode(&CacheEntry::new(data, timestamp, version)).unwrap();
    layer
      .store()
      .set(&layer.storage_key(endpoint), &raw)
      .unwrap();
  }

  fn stored(layer: &TestLayer, endpoint: &str) -> Option<CacheEntry<Value>> {
    layer
      .store()
      .get(&layer.storage_key(endpoint))
      .unwrap()
      .map(|raw| entry::decode(&raw).unwrap())
  }

  fn skills() -> Value {
    json!([{"id": 1, "name": "React"}])
  }

  #[tokio::test]
  async fn test_cache_hit_skips_network() {
    let (layer, clock) = build(config(1_000), MemoryStore::new(), ScriptedFetcher::new());
    seed(&layer, "/skills", skills(), 0, "v1");
    clock.set(500);

    let result: CacheResult<Value> = layer
      .fetch_with_source("/skills", &RequestOptions::get())
      .await
      .unwrap();

    assert_eq!(result.data, skills());
    assert_eq!(result.source, CacheSource::CacheFresh);
    assert_eq!(layer.fetcher().calls(), 0);
  }

  #[tokio::test]
  async fn test_expired_entry_fetches_once() {
    let fetcher = ScriptedFetcher::new().then(Ok(json!(["fresh"])));
    let (layer, clock) = build(config(1_000), MemoryStore::new(), fetcher);
    seed(&layer, "/skills", skills(), 0, "v1");
    clock.set(1_500);

    let data: Value = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();

    assert_eq!(data, json!(["fresh"]));
    assert_eq!(layer.fetcher().calls(), 1);
    assert_eq!(stored(&layer, "/skills").unwrap().timestamp, 1_500);
  }

  #[tokio::test]
  async fn test_version_mismatch_is_a_miss() {
    let fetcher = ScriptedFetcher::new().then(Ok(json!(["v2 data"])));
    let config = CacheConfig {
      version: "v2".to_string(),
      ..config(60_000)
    };
    let (layer, clock) = build(config, MemoryStore::new(), fetcher);
    seed(&layer, "/skills", skills(), 0, "v1");
    clock.set(10);

    let data: Value = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();

    assert_eq!(data, json!(["v2 data"]));
    assert_eq!(layer.fetcher().calls(), 1);
    assert_eq!(stored(&layer, "/skills").unwrap().version, "v2");
  }

  #[tokio::test]
  async fn test_fetch_failure_serves_stale_entry() {
    let (layer, clock) = build(config(1_000), MemoryStore::new(), ScriptedFetcher::new());
    seed(&layer, "/skills", skills(), 0, "v1");
    clock.set(1_000_000);

    let result: CacheResult<Value> = layer
      .fetch_with_source("/skills", &RequestOptions::get())
      .await
      .unwrap();

    assert_eq!(result.data, skills());
    assert_eq!(result.source, CacheSource::Offline);
    assert_eq!(result.cached_at.map(|t| t.timestamp_millis()), Some(0));
    assert_eq!(layer.fetcher().calls(), 1);
  }

  #[tokio::test]
  async fn test_stale_entry_from_other_version_still_serves_as_fallback() {
    let config = CacheConfig {
      version: "v2".to_string(),
      ..config(1_000)
    };
    let (layer, _clock) = build(config, MemoryStore::new(), ScriptedFetcher::new());
    seed(&layer, "/skills", skills(), 0, "v1");

    let data: Value = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();
    assert_eq!(data, skills());
  }

  #[tokio::test]
  async fn test_fetch_failure_without_entry_propagates() {
    let fetcher = ScriptedFetcher::always(Err(http_error(500)));
    let (layer, _clock) = build(config(1_000), MemoryStore::new(), fetcher);

    let err = layer
      .fetch_with_cache::<Value>("/skills", &RequestOptions::get())
      .await
      .unwrap_err();

    assert_eq!(err, http_error(500));
    assert_eq!(err.status(), Some(500));
    assert!(stored(&layer, "/skills").is_none());
  }

  #[tokio::test]
  async fn test_write_back_serves_next_read() {
    let fetcher = ScriptedFetcher::new().then(Ok(skills()));
    let (layer, clock) = build(config(1_000), MemoryStore::new(), fetcher);

    let first: Value = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();
    clock.advance(999);
    let second: Value = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();

    assert_eq!(first, skills());
    assert_eq!(second, skills());
    assert_eq!(layer.fetcher().calls(), 1);
  }

  #[tokio::test]
  async fn test_mutations_bypass_cache() {
    let fetcher = ScriptedFetcher::new()
      .then(Ok(json!({"id": 2})))
      .then(Err(http_error(400)));
    let (layer, _clock) = build(config(60_000), MemoryStore::new(), fetcher);
    seed(&layer, "/skills", skills(), 0, "v1");
    let before = layer.store().get(&layer.storage_key("/skills")).unwrap();

    let post = RequestOptions::with_method(Method::Post).body(json!({"name": "Rust"}));
    let created: Value = layer.fetch_with_cache("/skills", &post).await.unwrap();
    assert_eq!(created, json!({"id": 2}));

    // A failed mutation is never answered from the cache
    let err = layer
      .fetch_with_cache::<Value>("/skills", &post)
      .await
      .unwrap_err();
    assert_eq!(err, http_error(400));

    assert_eq!(layer.fetcher().calls(), 2);
    assert_eq!(layer.store().get(&layer.storage_key("/skills")).unwrap(), before);
    assert_eq!(layer.store().keys().unwrap().len(), 1);
  }

  #[tokio::test]
  async fn test_head_does_not_overwrite_cached_payload() {
    let fetcher = ScriptedFetcher::new()
      .then(Ok(skills()))
      .then(Ok(Value::Null))
      .then(Ok(json!(["never"])));
    let (layer, clock) = build(config(60_000), MemoryStore::new(), fetcher);
    let get = RequestOptions::get();
    let head = RequestOptions::with_method(Method::Head);

    assert_eq!(layer.fetch_with_cache::<Value>("/skills", &get).await.unwrap(), skills());

    clock.set(70_000);
    let probed: Value = layer.fetch_with_cache("/skills", &head).await.unwrap();
    assert_eq!(probed, Value::Null);
    assert_eq!(stored(&layer, "/skills").unwrap().data, skills());

    // The entry is expired but a HEAD never answers from it either
    let again: Value = layer.fetch_with_cache("/skills", &head).await.unwrap();
    assert_eq!(again, json!(["never"]));
    assert_eq!(layer.fetcher().calls(), 3);
    assert_eq!(stored(&layer, "/skills").unwrap().timestamp, 0);
  }

  #[tokio::test]
  async fn test_extreme_timestamps_are_expired() {
    let fetcher = ScriptedFetcher::new()
      .then(Ok(json!(["past"])))
      .then(Ok(json!(["future"])));
    let (layer, clock) = build(config(60_000), MemoryStore::new(), fetcher);
    clock.set(1_000);
    let opts = RequestOptions::get();

    seed(&layer, "/skills", json!([1]), i64::MIN, "v1");
    let data: Value = layer.fetch_with_cache("/skills", &opts).await.unwrap();
    assert_eq!(data, json!(["past"]));

    seed(&layer, "/skills", json!([1]), i64::MAX, "v1");
    let data: Value = layer.fetch_with_cache("/skills", &opts).await.unwrap();
    assert_eq!(data, json!(["future"]));
    assert_eq!(layer.fetcher().calls(), 2);
  }

  #[tokio::test]
  async fn test_refresh_forces_refetch() {
    let fetcher = ScriptedFetcher::new().then(Ok(json!(["refreshed"])));
    let (layer, clock) = build(config(60_000), MemoryStore::new(), fetcher);
    seed(&layer, "/skills", skills(), 0, "v1");
    clock.set(5_000);

    layer.refresh("/skills").await.unwrap();

    assert_eq!(layer.fetcher().calls(), 1);
    let entry = stored(&layer, "/skills").unwrap();
    assert!(entry.timestamp >= 5_000);
    assert_eq!(entry.data, json!(["refreshed"]));
  }

  #[tokio::test]
  async fn test_refresh_failure_leaves_no_entry() {
    let (layer, _clock) = build(config(60_000), MemoryStore::new(), ScriptedFetcher::new());
    seed(&layer, "/skills", skills(), 0, "v1");

    assert_eq!(layer.refresh("/skills").await, Err(offline()));
    assert!(stored(&layer, "/skills").is_none());
  }

  #[test]
  fn test_clear_cache_only_touches_prefix() {
    let (layer, _clock) = build(config(0), MemoryStore::new(), ScriptedFetcher::new());
    seed(&layer, "/skills", skills(), 0, "v1");
    seed(&layer, "/profile", json!({}), 0, "v1");
    layer.store().set("token", "secret").unwrap();
    layer.store().set("portfolio_query_cache", "{}").unwrap();

    assert_eq!(layer.clear_cache(), 2);

    assert_eq!(
      layer.store().keys().unwrap(),
      vec!["portfolio_query_cache".to_string(), "token".to_string()]
    );
  }

  #[test]
  fn test_invalidate_removes_one_entry() {
    let (layer, _clock) = build(config(0), MemoryStore::new(), ScriptedFetcher::new());
    seed(&layer, "/skills", skills(), 0, "v1");
    seed(&layer, "/profile", json!({}), 0, "v1");

    layer.invalidate("/skills");
    layer.invalidate("/never-cached");

    assert!(stored(&layer, "/skills").is_none());
    assert!(stored(&layer, "/profile").is_some());
  }

  #[tokio::test]
  async fn test_no_content_is_cached_as_null() {
    let fetcher = ScriptedFetcher::new().then(Ok(Value::Null));
    let (layer, _clock) = build(config(1_000), MemoryStore::new(), fetcher);

    let first: Value = layer
      .fetch_with_cache("/settings", &RequestOptions::get())
      .await
      .unwrap();
    let second: Value = layer
      .fetch_with_cache("/settings", &RequestOptions::get())
      .await
      .unwrap();

    assert_eq!(first, Value::Null);
    assert_eq!(second, Value::Null);
    assert_eq!(layer.fetcher().calls(), 1);
    assert_eq!(stored(&layer, "/settings").unwrap().data, Value::Null);
  }

  #[tokio::test]
  async fn test_corrupt_entry_is_evicted() {
    let (layer, _clock) = build(config(1_000), MemoryStore::new(), ScriptedFetcher::new());
    let key = layer.storage_key("/skills");
    layer.store().set(&key, "{garbage").unwrap();

    // Corrupt data is not a usable fallback either
    let err = layer
      .fetch_with_cache::<Value>("/skills", &RequestOptions::get())
      .await
      .unwrap_err();

    assert_eq!(err, offline());
    assert_eq!(layer.store().get(&key).unwrap(), None);
  }

  #[tokio::test]
  async fn test_quota_exceeded_still_returns_data() {
    let fetcher = ScriptedFetcher::new()
      .then(Ok(skills()))
      .then(Ok(skills()));
    let (layer, _clock) = build(config(1_000), MemoryStore::new().with_quota(8), fetcher);

    let data: Value = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();
    assert_eq!(data, skills());
    assert!(stored(&layer, "/skills").is_none());

    // Nothing was written, so the next read goes to the network again
    let _: Value = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();
    assert_eq!(layer.fetcher().calls(), 2);
  }

  #[tokio::test]
  async fn test_max_stale_bounds_fallback_age() {
    let config = CacheConfig {
      max_stale: Some(Duration::milliseconds(10_000)),
      ..config(1_000)
    };
    let (layer, clock) = build(config, MemoryStore::new(), ScriptedFetcher::new());
    seed(&layer, "/skills", skills(), 0, "v1");

    clock.set(9_999);
    let data: Value = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();
    assert_eq!(data, skills());

    clock.set(10_000);
    let err = layer
      .fetch_with_cache::<Value>("/skills", &RequestOptions::get())
      .await
      .unwrap_err();
    assert_eq!(err, offline());
  }

  #[tokio::test]
  async fn test_zero_ttl_always_fetches_but_keeps_fallback() {
    let fetcher = ScriptedFetcher::new()
      .then(Ok(skills()))
      .then(Ok(json!(["second"])));
    let (layer, _clock) = build(config(0), MemoryStore::new(), fetcher);

    for expected in [skills(), json!(["second"]), json!(["second"])] {
      let data: Value = layer
        .fetch_with_cache("/skills", &RequestOptions::get())
        .await
        .unwrap();
      assert_eq!(data, expected);
    }

    // Every read hit the network; the third failed and was served from cache
    assert_eq!(layer.fetcher().calls(), 3);
  }

  #[tokio::test]
  async fn test_payload_type_mismatch_counts_as_failure() {
    #[derive(Debug, PartialEq, Serialize, serde::Deserialize)]
    struct Skill {
      id: u64,
      name: String,
    }

    let fetcher = ScriptedFetcher::new().then(Ok(json!({"unexpected": true})));
    let (layer, clock) = build(config(1_000), MemoryStore::new(), fetcher);
    seed(&layer, "/skills", skills(), 0, "v1");
    clock.set(2_000);

    let data: Vec<Skill> = layer
      .fetch_with_cache("/skills", &RequestOptions::get())
      .await
      .unwrap();

    assert_eq!(
      data,
      vec![Skill {
        id: 1,
        name: "React".to_string()
      }]
    );
  }

  #[tokio::test]
  async fn test_concurrent_misses_are_not_coalesced() {
    let fetcher = ScriptedFetcher::new()
      .then(Ok(json!(["a"])))
      .then(Ok(json!(["b"])))
      .with_delay(std::time::Duration::from_millis(10));
    let (layer, _clock) = build(config(60_000), MemoryStore::new(), fetcher);

    let opts = RequestOptions::get();
    let (a, b) = tokio::join!(
      layer.fetch_with_cache::<Value>("/skills", &opts),
      layer.fetch_with_cache::<Value>("/skills", &opts),
    );

    assert_eq!(a.unwrap(), json!(["a"]));
    assert_eq!(b.unwrap(), json!(["b"]));
    assert_eq!(layer.fetcher().calls(), 2);
    assert_eq!(stored(&layer, "/skills").unwrap().data, json!(["b"]));
  }

  #[tokio::test]
  async fn test_ttl_walkthrough() {
    let fetcher = ScriptedFetcher::new().then(Ok(skills()));
    let (layer, clock) = build(config(1_000), MemoryStore::new(), fetcher);
    let opts = RequestOptions::get();
    let read = || layer.fetch_with_cache::<Value>("/skills/", &opts);

    assert_eq!(read().await.unwrap(), skills());
    assert_eq!(stored(&layer, "/skills/").unwrap().timestamp, 0);

    clock.set(500);
    assert_eq!(read().await.unwrap(), skills());
    assert_eq!(layer.fetcher().calls(), 1);

    clock.set(1_500);
    assert_eq!(read().await.unwrap(), skills());
    assert_eq!(layer.fetcher().calls(), 2);
  }
}
