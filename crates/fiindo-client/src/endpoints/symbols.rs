use super::{impl_endpoint_base, EndpointBase, SharedRateLimiter};
use crate::transport::Transport;
use fiindo_core::{Endpoint, Result};
use fiindo_models::SymbolsResponse;
use std::sync::Arc;
use tracing::{info, instrument};

/// Symbol listing endpoint
pub struct SymbolEndpoints {
  transport: Arc<Transport>,
  rate_limiter: SharedRateLimiter,
}

impl SymbolEndpoints {
  /// Create a new symbol endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
    Self { transport, rate_limiter }
  }

  /// Every symbol the API knows about, in API order
  #[instrument(skip(self))]
  pub async fn list(&self) -> Result<Vec<String>> {
    self.wait_for_rate_limit().await?;

    let response: SymbolsResponse = self.transport.get(Endpoint::Symbols, "").await?;
    info!("Fetched {} symbols", response.symbols.len());
    Ok(response.symbols)
  }
}

impl_endpoint_base!(SymbolEndpoints);

#[cfg(test)]
mod tests {
  use super::*;
  use crate::endpoints::test_support::{limiter, transport_for};
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  #[tokio::test]
  async fn test_list_symbols_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v1/symbols"))
      .and(header("Authorization", "Bearer first.last"))
      .and(header("Accept", "application/json"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(serde_json::json!({"symbols": ["AAPL.US", "JPM.US"]})),
      )
      .expect(1)
      .mount(&server)
      .await;

    let endpoints = SymbolEndpoints::new(transport_for(&server.uri(), 0), limiter());
    let symbols = endpoints.list().await.unwrap();
    assert_eq!(symbols, vec!["AAPL.US", "JPM.US"]);
  }
}
