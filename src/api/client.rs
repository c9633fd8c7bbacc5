use chrono::Utc;
use color_eyre::{eyre::eyre, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::cache::{FetchError, Method, RequestOptions, ResourceFetcher};
use crate::config::ApiConfig;

/// HTTP client for the portfolio REST API
#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
}

impl ApiClient {
  pub fn new(config: &ApiConfig) -> Result<Self> {
    Url::parse(&config.url).map_err(|e| eyre!("Invalid API url {}: {}", config.url, e))?;

    let http = reqwest::Client::builder()
      .timeout(std::time::Duration::from_secs(config.timeout_secs))
      .user_agent(concat!("folio-cache/", env!("CARGO_PKG_VERSION")))
      .build()
      .map_err(|e| eyre!("Failed to create HTTP client: {}", e))?;

    Ok(Self {
      http,
      base_url: config.url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Full URL for an endpoint. Reads get a timestamp parameter so that no
  /// intermediate HTTP cache can answer for the API.
  fn url_for(&self, endpoint: &str, method: Method) -> Result<Url, FetchError> {
    let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint)).map_err(|e| {
      FetchError::Transport {
        endpoint: endpoint.to_string(),
        message: format!("invalid url: {}", e),
      }
    })?;

    if method.is_read() {
      url
        .query_pairs_mut()
        .append_pair("t", &Utc::now().timestamp_millis().to_string());
    }

    Ok(url)
  }
}

impl ResourceFetcher for ApiClient {
  async fn fetch(&self, endpoint: &str, options: &RequestOptions) -> Result<Value, FetchError> {
    let transport = |e: reqwest::Error| FetchError::Transport {
      endpoint: endpoint.to_string(),
      message: e.to_string(),
    };

    let url = self.url_for(endpoint, options.method)?;
    let mut request = self
      .http
      .request(to_reqwest(options.method), url)
      .header(CONTENT_TYPE, "application/json");
    for (name, value) in &options.headers {
      request = request.header(name.as_str(), value.as_str());
    }
    if let Some(body) = &options.body {
      request = request.body(body.to_string());
    }

    let response = request.send().await.map_err(transport)?;
    let status = response.status();
    let is_json = response
      .headers()
      .get(CONTENT_TYPE)
      .and_then(|v| v.to_str().ok())
      .map(|ct| ct.contains("application/json"))
      .unwrap_or(false);

    if !status.is_success() {
      let body = response.bytes().await.ok();
      return Err(FetchError::Http {
        status: status.as_u16(),
        message: error_message(status, is_json, body.as_deref()),
      });
    }

    if status == StatusCode::NO_CONTENT || options.method == Method::Head {
      return Ok(Value::Null);
    }

    if !is_json {
      return Err(FetchError::NotJson {
        endpoint: endpoint.to_string(),
      });
    }

    let bytes = response.bytes().await.map_err(transport)?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Payload {
      endpoint: endpoint.to_string(),
      message: e.to_string(),
    })
  }
}

/// Prefer the server's own `error`/`message` field over the bare status.
fn error_message(status: StatusCode, is_json: bool, body: Option<&[u8]>) -> String {
  let fallback = format!("HTTP error! status: {}", status.as_u16());

  if !is_json {
    return format!("{} (Non-JSON response)", fallback);
  }

  body
    .and_then(|b| serde_json::from_slice::<Value>(b).ok())
    .and_then(|v| {
      v.get("error")
        .or_else(|| v.get("message"))
        .and_then(Value::as_str)
        .map(String::from)
    })
    .unwrap_or(fallback)
}

fn to_reqwest(method: Method) -> reqwest::Method {
  match method {
    Method::Get => reqwest::Method::GET,
    Method::Head => reqwest::Method::HEAD,
    Method::Post => reqwest::Method::POST,
    Method::Put => reqwest::Method::PUT,
    Method::Patch => reqwest::Method::PATCH,
    Method::Delete => reqwest::Method::DELETE,
  }
}
