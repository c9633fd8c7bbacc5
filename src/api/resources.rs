//! Resource wrappers that always resolve to data.
//!
//! Every read goes through the cache layer and then through [`with_fallback`],
//! so callers get live data, the last cached copy, or the bundled dataset, in
//! that order, and never an error. Mutations skip the cache and surface
//! their errors.

use serde_json::{json, Value};
use std::future::Future;
use tracing::{info, warn};

use crate::cache::{
  CacheLayer, CacheResult, Clock, FetchError, KeyValueStore, Method, RequestOptions,
  ResourceFetcher, SystemClock,
};

use super::fallback::{self, Resource};

/// Store key the application uses for its separate request-cache blob.
pub const REQUEST_CACHE_KEY: &str = "portfolio_query_cache";

/// Await `fetch`; on failure log it and substitute `fallback()`.
pub async fn with_fallback<T, Fut>(
  label: &str,
  fetch: Fut,
  fallback: impl FnOnce() -> T,
) -> CacheResult<T>
where
  Fut: Future<Output = Result<CacheResult<T>, FetchError>>,
{
  match fetch.await {
    Ok(result) => result,
    Err(e) => {
      warn!(endpoint = label, error = %e, "serving bundled fallback data");
      CacheResult::fallback(fallback())
    }
  }
}

/// Portfolio API with caching and fallback support.
pub struct PortfolioApi<S, F, C = SystemClock> {
  cache: CacheLayer<S, F, C>,
}

impl<S: KeyValueStore, F: ResourceFetcher, C: Clock> PortfolioApi<S, F, C> {
  pub fn new(cache: CacheLayer<S, F, C>) -> Self {
    Self { cache }
  }

  pub fn cache(&self) -> &CacheLayer<S, F, C> {
    &self.cache
  }

  /// Wipe every cached entry and the request-cache blob so the session starts live.
  pub fn reset_session(&self) -> usize {
    let removed = self.cache.clear_cache();
    if let Err(e) = self.cache.store().remove(REQUEST_CACHE_KEY) {
      warn!(key = REQUEST_CACHE_KEY, error = %e, "failed to remove request cache");
    }
    info!(removed, "cache reset for a live session");
    removed
  }

  async fn read(&self, endpoint: &str) -> Result<CacheResult<Value>, FetchError> {
    self
      .cache
      .fetch_with_source(endpoint, &RequestOptions::get())
      .await
  }

  /// Read a whole resource.
  pub async fn get(&self, resource: Resource) -> CacheResult<Value> {
    let endpoint = resource.endpoint();
    with_fallback(endpoint, self.read(endpoint), || resource.fallback()).await
  }

  /// Read one item of a collection by id.
  pub async fn item(&self, resource: Resource, id: u64) -> CacheResult<Value> {
    let endpoint = format!("{}/{}", resource.endpoint(), id);
    with_fallback(&endpoint, self.read(&endpoint), || {
      fallback::find_item(resource, "id", &json!(id))
    })
    .await
  }

  pub async fn profile(&self) -> CacheResult<Value> {
    self.get(Resource::Profile).await
  }

  pub async fn projects(&self) -> CacheResult<Value> {
    self.get(Resource::Projects).await
  }

  pub async fn project(&self, id: u64) -> CacheResult<Value> {
    self.item(Resource::Projects, id).await
  }

  pub async fn project_categories(&self) -> CacheResult<Value> {
    self.get(Resource::ProjectCategories).await
  }

  pub async fn skills(&self) -> CacheResult<Value> {
    self.get(Resource::Skills).await
  }

  pub async fn skill_categories(&self) -> CacheResult<Value> {
    self.get(Resource::SkillCategories).await
  }

  pub async fn experience(&self) -> CacheResult<Value> {
    self.get(Resource::Experience).await
  }

  pub async fn education(&self) -> CacheResult<Value> {
    self.get(Resource::Education).await
  }

  pub async fn certificates(&self) -> CacheResult<Value> {
    self.get(Resource::Certificates).await
  }

  pub async fn certificate_categories(&self) -> CacheResult<Value> {
    self.get(Resource::CertificateCategories).await
  }

  pub async fn social_links(&self) -> CacheResult<Value> {
    self.get(Resource::SocialLinks).await
  }

  pub async fn blog_categories(&self) -> CacheResult<Value> {
    self.get(Resource::BlogCategories).await
  }

  pub async fn blog_posts(&self) -> CacheResult<Value> {
    self.get(Resource::BlogPosts).await
  }

  pub async fn blog_post(&self, id: u64) -> CacheResult<Value> {
    self.item(Resource::BlogPosts, id).await
  }

  pub async fn blog_post_by_slug(&self, slug: &str) -> CacheResult<Value> {
    let encoded: String = url::form_urlencoded::byte_serialize(slug.as_bytes()).collect();
    let endpoint = format!("{}/by_slug?slug={}", Resource::BlogPosts.endpoint(), encoded);
    with_fallback(&endpoint, self.read(&endpoint), || {
      fallback::find_item(Resource::BlogPosts, "slug", &json!(slug))
    })
    .await
  }

  pub async fn settings(&self) -> CacheResult<Value> {
    self.get(Resource::Settings).await
  }

  pub async fn home_content(&self) -> CacheResult<Value> {
    self.get(Resource::HomeContent).await
  }

  pub async fn about_content(&self) -> CacheResult<Value> {
    self.get(Resource::AboutContent).await
  }

  /// Create an item, then drop the cached collection.
  pub async fn create(&self, resource: Resource, body: Value) -> Result<Value, FetchError> {
    let options = RequestOptions::with_method(Method::Post).body(body);
    self.mutate(resource, resource.endpoint(), &options).await
  }

  /// Update an item, then drop the cached collection and item.
  pub async fn update(
    &self,
    resource: Resource,
    id: u64,
    body: Value,
  ) -> Result<Value, FetchError> {
    let endpoint = format!("{}/{}", resource.endpoint(), id);
    let options = RequestOptions::with_method(Method::Put).body(body);
    self.mutate(resource, &endpoint, &options).await
  }

  /// Delete an item, then drop the cached collection and item.
  pub async fn delete(&self, resource: Resource, id: u64) -> Result<Value, FetchError> {
    let endpoint = format!("{}/{}", resource.endpoint(), id);
    let options = RequestOptions::with_method(Method::Delete);
    self.mutate(resource, &endpoint, &options).await
  }

  async fn mutate(
    &self,
    resource: Resource,
    endpoint: &str,
    options: &RequestOptions,
  ) -> Result<Value, FetchError> {
    let result = self.cache.fetch_with_cache(endpoint, options).await?;

    self.cache.invalidate(resource.endpoint());
    if endpoint != resource.endpoint() {
      self.cache.invalidate(endpoint);
    }
    info!(
      endpoint,
      method = options.method.as_str(),
      "mutation applied, cache invalidated"
    );

    Ok(result)
  }

  /// Send a contact message. Not cached, nothing to invalidate.
  pub async fn send_message(&self, body: Value) -> Result<Value, FetchError> {
    let options = RequestOptions::with_method(Method::Post).body(body);
    self.cache.fetch_with_cache("/messages", &options).await
  }

  /// Backend health check. Always live, never substituted.
  pub async fn health(&self) -> Result<Value, FetchError> {
    self
      .cache
      .fetcher()
      .fetch("/health", &RequestOptions::get())
      .await
  }
}
