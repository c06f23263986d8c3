use super::{impl_endpoint_base, EndpointBase, SharedRateLimiter};
use crate::transport::Transport;
use fiindo_core::{Endpoint, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// End-of-day price endpoint
pub struct EodEndpoints {
  transport: Arc<Transport>,
  rate_limiter: SharedRateLimiter,
}

impl EodEndpoints {
  /// Create a new end-of-day endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
    Self { transport, rate_limiter }
  }

  /// Raw end-of-day document, prices under `stockprice.data`
  #[instrument(skip(self))]
  pub async fn eod(&self, symbol: &str) -> Result<Value> {
    self.wait_for_rate_limit().await?;
    self.transport.get(Endpoint::Eod, symbol).await
  }
}

impl_endpoint_base!(EodEndpoints);
