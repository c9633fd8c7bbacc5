//! Core traits and types for the caching system.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::future::Future;
use std::sync::atomic::{AtomicI64, Ordering};

/// HTTP verb of a request. Only GET is eligible for caching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Method {
  #[default]
  Get,
  Head,
  Post,
  Put,
  Patch,
  Delete,
}

impl Method {
  /// Whether this verb is an idempotent read.
  pub fn is_read(self) -> bool {
    matches!(self, Method::Get | Method::Head)
  }

  /// Whether a response to this verb may be served from and written to the cache.
  /// HEAD carries no body, so it must not share an entry with GET.
  pub fn is_cacheable(self) -> bool {
    self == Method::Get
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Method::Get => "GET",
      Method::Head => "HEAD",
      Method::Post => "POST",
      Method::Put => "PUT",
      Method::Patch => "PATCH",
      Method::Delete => "DELETE",
    }
  }
}

/// Options for a single request to the API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
  pub method: Method,
  pub headers: Vec<(String, String)>,
  pub body: Option<Value>,
}

impl RequestOptions {
  /// A plain GET.
  pub fn get() -> Self {
    Self::default()
  }

  pub fn with_method(method: Method) -> Self {
    Self {
      method,
      ..Self::default()
    }
  }

  pub fn body(mut self, body: Value) -> Self {
    self.body = Some(body);
    self
  }

  pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    self.headers.push((name.into(), value.into()));
    self
  }
}

/// Failure to obtain a resource from the API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
  /// The request never produced a response (DNS, refused connection, timeout).
  #[error("request to {endpoint} failed: {message}")]
  Transport { endpoint: String, message: String },
  /// The server answered outside the 2xx range.
  #[error("{message}")]
  Http { status: u16, message: String },
  /// A 2xx response that was not JSON, usually a proxy serving an HTML page.
  #[error("API returned non-JSON response for {endpoint}. Check proxy/backend configuration.")]
  NotJson { endpoint: String },
  /// The body could not be parsed into the requested type.
  #[error("invalid payload from {endpoint}: {message}")]
  Payload { endpoint: String, message: String },
}

impl FetchError {
  /// HTTP status code, when the failure came from a response.
  pub fn status(&self) -> Option<u16> {
    match self {
      FetchError::Http { status, .. } => Some(*status),
      _ => None,
    }
  }
}

/// Performs the actual network request for an endpoint.
///
/// Implementations resolve to `Value::Null` for `204 No Content`.
pub trait ResourceFetcher: Send + Sync {
  fn fetch(
    &self,
    endpoint: &str,
    options: &RequestOptions,
  ) -> impl Future<Output = Result<Value, FetchError>> + Send;
}

/// Source of the current time in milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
  fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now_ms(&self) -> i64 {
    Utc::now().timestamp_millis()
  }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
  now: AtomicI64,
}

impl ManualClock {
  pub fn new(now_ms: i64) -> Self {
    Self {
      now: AtomicI64::new(now_ms),
    }
  }

  pub fn set(&self, now_ms: i64) {
    self.now.store(now_ms, Ordering::SeqCst);
  }

  pub fn advance(&self, ms: i64) {
    self.now.fetch_add(ms, Ordering::SeqCst);
  }
}

impl Clock for ManualClock {
  fn now_ms(&self) -> i64 {
    self.now.load(Ordering::SeqCst)
  }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
  fn now_ms(&self) -> i64 {
    (**self).now_ms()
  }
}

/// Result from a cache operation, including data and metadata about the source.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheResult<T> {
  /// The actual data
  pub data: T,
  /// Where the data came from
  pub source: CacheSource,
  /// When the data was cached (if from cache)
  pub cached_at: Option<DateTime<Utc>>,
}

impl<T> CacheResult<T> {
  /// Create a new cache result from fresh network data.
  pub fn from_network(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Network,
      cached_at: None,
    }
  }

  /// Create a new cache result from a valid cache entry.
  pub fn from_cache(data: T, cached_at_ms: i64) -> Self {
    Self {
      data,
      source: CacheSource::CacheFresh,
      cached_at: DateTime::from_timestamp_millis(cached_at_ms),
    }
  }

  /// Create a new cache result for offline mode.
  pub fn offline(data: T, cached_at_ms: i64) -> Self {
    Self {
      data,
      source: CacheSource::Offline,
      cached_at: DateTime::from_timestamp_millis(cached_at_ms),
    }
  }

  /// Create a result carrying a bundled fallback dataset.
  pub fn fallback(data: T) -> Self {
    Self {
      data,
      source: CacheSource::Fallback,
      cached_at: None,
    }
  }

  pub fn map<U>(self, f: impl FnOnce(T) -> U) -> CacheResult<U> {
    CacheResult {
      data: f(self.data),
      source: self.source,
      cached_at: self.cached_at,
    }
  }
}

/// Indicates where returned data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheSource {
  /// Fresh data from network
  Network,
  /// Data from cache, still within its TTL
  CacheFresh,
  /// Network failed, serving the last cached copy
  Offline,
  /// Network and cache both unavailable, serving bundled data
  Fallback,
}

impl CacheSource {
  pub fn as_str(self) -> &'static str {
    match self {
      CacheSource::Network => "network",
      CacheSource::CacheFresh => "cache",
      CacheSource::Offline => "offline",
      CacheSource::Fallback => "fallback",
    }
  }
}
