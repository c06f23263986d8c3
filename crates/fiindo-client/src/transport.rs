//! HTTP transport layer for Fiindo API requests

use fiindo_core::{Config, Endpoint, Error, Result, API_PREFIX};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use url::Url;

/// HTTP transport layer for making requests to the Fiindo API
pub struct Transport {
  client: Client,
  base_url: String,
  api_token: String,
  timeout: Duration,
  max_retries: u32,
  retry_base_delay: Duration,
}

impl Transport {
  /// Create a new transport instance
  pub fn new(config: &Config) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .user_agent("fiindo-client/0.1.0")
      .build()
      .map_err(|e| Error::Http(format!("Failed to create HTTP client: {}", e)))?;

    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_string(),
      api_token: config.api_token.clone(),
      timeout: Duration::from_secs(config.timeout_secs),
      max_retries: config.max_retries,
      retry_base_delay: Duration::from_millis(1000),
    })
  }

  /// Create a mock transport for testing
  #[cfg(test)]
  pub fn new_mock() -> Self {
    Self {
      client: Client::new(),
      base_url: "https://mock.fiindo.test".to_string(),
      api_token: "first.last".to_string(),
      timeout: Duration::from_secs(30),
      max_retries: 3,
      retry_base_delay: Duration::from_millis(1),
    }
  }

  /// Override the unit of the exponential backoff.
  ///
  /// Attempt `n` waits `2^n * delay`.
  pub fn with_retry_delay(mut self, delay: Duration) -> Self {
    self.retry_base_delay = delay;
    self
  }

  /// Make a GET request to the Fiindo API
  ///
  /// # Arguments
  ///
  /// * `endpoint` - The endpoint to call
  /// * `symbol` - Symbol substituted into the endpoint path, ignored by `Endpoint::Symbols`
  ///
  /// # Returns
  ///
  /// The deserialized body. Transport failures, `429` and `5xx` responses are
  /// retried with exponential backoff; every other failure is returned at once.
  #[instrument(skip(self), fields(endpoint = %endpoint))]
  pub async fn get<T>(&self, endpoint: Endpoint, symbol: &str) -> Result<T>
  where
    T: DeserializeOwned,
  {
    let url = self.build_url(endpoint, symbol)?;
    debug!("Making request to: {}", url);

    let mut attempt = 0;
    let mut last_error = None;

    while attempt <= self.max_retries {
      if attempt > 0 {
        let delay = backoff_delay(self.retry_base_delay, attempt);
        warn!("Retrying request in {}ms (attempt {})", delay.as_millis(), attempt + 1);
        tokio::time::sleep(delay).await;
      }

      match self.make_request(&url).await {
        Ok(response) => {
          let text = response
            .text()
            .await
            .map_err(|e| Error::Http(format!("Failed to read response body: {}", e)))?;

          debug!("Response body length: {} bytes", text.len());
          #[cfg(feature = "debug-logging")]
          debug!("Response body: {}", text);

          self.check_api_error(&text)?;

          return match serde_json::from_str::<T>(&text) {
            Ok(data) => {
              info!("Successfully parsed response for {} {}", endpoint, symbol);
              Ok(data)
            }
            Err(e) => {
              error!("Failed to parse JSON response: {}", e);
              Err(Error::Parse(format!(
                "Failed to parse response: {}. Response: {}",
                e,
                preview(&text, 200)
              )))
            }
          };
        }
        Err(e) if e.is_retryable() => {
          warn!("Request failed (attempt {}): {}", attempt + 1, e);
          last_error = Some(e);
          attempt += 1;
        }
        Err(e) => return Err(e),
      }
    }

    Err(last_error.unwrap_or_else(|| Error::Http("Max retries exceeded".to_string())))
  }

  /// Build the full URL for an API request
  fn build_url(&self, endpoint: Endpoint, symbol: &str) -> Result<Url> {
    let url = Url::parse(&format!("{}/{}/{}", self.base_url, API_PREFIX, endpoint.path(symbol)))?;
    Ok(url)
  }

  /// Make the actual HTTP request and map the status to an error kind
  async fn make_request(&self, url: &Url) -> Result<Response> {
    let response = self
      .client
      .get(url.clone())
      .header(AUTHORIZATION, format!("Bearer {}", self.api_token))
      .header(ACCEPT, "application/json")
      .send()
      .await
      .map_err(|e| Error::Http(format!("Request failed: {}", e)))?;

    let status = response.status();

    if status.is_success() {
      debug!("Request successful with status: {}", status);
      return Ok(response);
    }

    error!("Request failed with status: {}", status);
    Err(match status {
      StatusCode::NOT_FOUND => Error::NotFound(url.path().to_string()),
      StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
        Error::ApiToken(format!("Request rejected with status {}", status))
      }
      StatusCode::TOO_MANY_REQUESTS => Error::RateLimit(format!("HTTP error: {}", status)),
      s if s.is_server_error() => Error::Http(format!("HTTP error: {}", s)),
      s => Error::Api(format!("HTTP error: {}", s)),
    })
  }

  /// Check for an error envelope in an otherwise successful response
  fn check_api_error(&self, response_text: &str) -> Result<()> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(response_text) else {
      return Ok(());
    };

    if let Some(message) = value.get("error").and_then(|e| e.as_str()) {
      if message.to_lowercase().contains("rate limit") {
        return Err(Error::RateLimit(message.to_string()));
      }
      return Err(Error::Api(message.to_string()));
    }

    Ok(())
  }

  /// Get the base URL being used
  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Get request timeout duration
  pub fn timeout(&self) -> Duration {
    self.timeout
  }
}

impl std::fmt::Debug for Transport {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Transport")
      .field("base_url", &self.base_url)
      .field("timeout", &self.timeout)
      .field("max_retries", &self.max_retries)
      .finish()
  }
}

/// `base * 2^attempt`, saturating at `Duration::MAX`
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
  base.saturating_mul(2_u32.saturating_pow(attempt))
}

fn preview(text: &str, max_chars: usize) -> String {
  text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use fiindo_core::StatementType;

  #[test]
  fn test_build_url() {
    let transport = Transport::new_mock();

    let url = transport.build_url(Endpoint::Financials(StatementType::Income), "AAPL.US").unwrap();
    assert_eq!(
      url.as_str(),
      "https://mock.fiindo.test/api/v1/financials/AAPL.US/income_statement"
    );

    let url = transport.build_url(Endpoint::Symbols, "").unwrap();
    assert_eq!(url.as_str(), "https://mock.fiindo.test/api/v1/symbols");
  }

  #[test]
  fn test_trailing_slash_in_base_url() {
    let mut config = Config::default_with_token("first.last".to_string());
    config.base_url = "http://localhost:8080/".to_string();
    let transport = Transport::new(&config).unwrap();

    let url = transport.build_url(Endpoint::Eod, "JPM.US").unwrap();
    assert_eq!(url.as_str(), "http://localhost:8080/api/v1/eod/JPM.US");
  }

  #[test]
  fn test_check_api_error_rate_limit() {
    let transport = Transport::new_mock();
    let result = transport.check_api_error(r#"{"error": "Rate limit exceeded"}"#);

    if let Err(Error::RateLimit(_)) = result {
      // Expected
    } else {
      panic!("Expected RateLimit error");
    }
  }

  #[test]
  fn test_check_api_error_message() {
    let transport = Transport::new_mock();
    let result = transport.check_api_error(r#"{"error": "Unknown symbol"}"#);
    assert!(matches!(result, Err(Error::Api(_))));
  }

  #[test]
  fn test_check_api_error_success() {
    let transport = Transport::new_mock();
    assert!(transport.check_api_error(r#"{"fundamentals": {}}"#).is_ok());
    assert!(transport.check_api_error("not json at all").is_ok());
  }

  #[test]
  fn test_backoff_delay_doubles_and_saturates() {
    let base = Duration::from_millis(1000);
    assert_eq!(backoff_delay(base, 1), Duration::from_millis(2000));
    assert_eq!(backoff_delay(base, 3), Duration::from_millis(8000));
    assert_eq!(backoff_delay(base, 64), Duration::MAX);
  }

  #[test]
  fn test_preview_respects_char_boundaries() {
    assert_eq!(preview("äöü", 2), "äö");
  }
}
