use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use crate::cache::{FetchError, RequestOptions, ResourceFetcher};

/// A fetcher that replays a script of responses and records every request.
///
/// Once the script runs out it keeps answering with the fallback response,
/// which defaults to a transport error.
pub struct ScriptedFetcher {
  script: Mutex<VecDeque<Result<Value, FetchError>>>,
  otherwise: Result<Value, FetchError>,
  requests: Mutex<Vec<(String, RequestOptions)>>,
  delay: Option<Duration>,
}

impl ScriptedFetcher {
  pub fn new() -> Self {
    Self {
      script: Mutex::new(VecDeque::new()),
      otherwise: Err(offline()),
      requests: Mutex::new(Vec::new()),
      delay: None,
    }
  }

  /// Answer every request with `result`.
  pub fn always(result: Result<Value, FetchError>) -> Self {
    Self {
      otherwise: result,
      ..Self::new()
    }
  }

  /// Queue a response.
  pub fn then(self, result: Result<Value, FetchError>) -> Self {
    self.push(result);
    self
  }

  pub fn push(&self, result: Result<Value, FetchError>) {
    self.script.lock().unwrap().push_back(result);
  }

  /// Sleep before answering, so concurrent callers overlap.
  pub fn with_delay(mut self, delay: Duration) -> Self {
    self.delay = Some(delay);
    self
  }

  pub fn calls(&self) -> usize {
    self.requests.lock().unwrap().len()
  }

  pub fn requests(&self) -> Vec<(String, RequestOptions)> {
    self.requests.lock().unwrap().clone()
  }
}

impl ResourceFetcher for ScriptedFetcher {
  async fn fetch(&self, endpoint: &str, options: &RequestOptions) -> Result<Value, FetchError> {
    self
      .requests
      .lock()
      .unwrap()
      .push((endpoint.to_string(), options.clone()));

    let result = self
      .script
      .lock()
      .unwrap()
      .pop_front()
      .unwrap_or_else(|| self.otherwise.clone());

    if let Some(delay) = self.delay {
      tokio::time::sleep(delay).await;
    }

    result
  }
}

/// The error a fetcher reports when the backend is unreachable.
pub fn offline() -> FetchError {
  FetchError::Transport {
    endpoint: "test".to_string(),
    message: "connection refused".to_string(),
  }
}

pub fn http_error(status: u16) -> FetchError {
  FetchError::Http {
    status,
    message: format!("HTTP error! status: {}", status),
  }
}
