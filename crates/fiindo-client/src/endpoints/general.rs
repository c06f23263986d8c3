use super::{impl_endpoint_base, EndpointBase, SharedRateLimiter};
use crate::transport::Transport;
use fiindo_core::{Endpoint, Result};
use fiindo_models::industry_from_general;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Company profile endpoint
pub struct GeneralEndpoints {
  transport: Arc<Transport>,
  rate_limiter: SharedRateLimiter,
}

impl GeneralEndpoints {
  /// Create a new general endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
    Self { transport, rate_limiter }
  }

  /// Raw general document for a symbol
  #[instrument(skip(self))]
  pub async fn profile(&self, symbol: &str) -> Result<Value> {
    self.wait_for_rate_limit().await?;
    self.transport.get(Endpoint::General, symbol).await
  }

  /// Industry classification of a symbol.
  ///
  /// `Ok(None)` when the profile exists but carries no industry.
  #[instrument(skip(self))]
  pub async fn industry(&self, symbol: &str) -> Result<Option<String>> {
    let document = self.profile(symbol).await?;
    let industry = industry_from_general(&document);
    debug!("Industry for {}: {:?}", symbol, industry);
    Ok(industry)
  }
}

impl_endpoint_base!(GeneralEndpoints);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::endpoints::test_support::{limiter, transport_for};
  use fiindo_core::Error;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_industry_from_profile() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v1/general/MSFT.US"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "fundamentals": {"profile": {"data": [{"industry": "Software - Application"}]}}
      })))
      .mount(&server)
      .await;

    let endpoints = GeneralEndpoints::new(transport_for(&server.uri(), 0), limiter());
    let industry = endpoints.industry("MSFT.US").await.unwrap();
    assert_eq!(industry.as_deref(), Some("Software - Application"));
  }

  #[tokio::test]
  async fn test_missing_symbol_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v1/general/NOPE.US"))
      .respond_with(ResponseTemplate::new(404))
      .expect(1)
      .mount(&server)
      .await;

    let endpoints = GeneralEndpoints::new(transport_for(&server.uri(), 3), limiter());
    let result = endpoints.industry("NOPE.US").await;
    assert!(matches!(result, Err(Error::NotFound(_))));
  }
}
