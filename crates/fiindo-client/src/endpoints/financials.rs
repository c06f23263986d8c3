use super::{impl_endpoint_base, EndpointBase, SharedRateLimiter};
use crate::transport::Transport;
use fiindo_core::{Endpoint, Result, StatementType};
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

/// Financial statement endpoints
pub struct FinancialsEndpoints {
  transport: Arc<Transport>,
  rate_limiter: SharedRateLimiter,
}

impl FinancialsEndpoints {
  /// Create a new financials endpoints instance
  pub fn new(transport: Arc<Transport>, rate_limiter: SharedRateLimiter) -> Self {
    Self { transport, rate_limiter }
  }

  /// Raw statement document for a symbol
  ///
  /// # Arguments
  ///
  /// * `symbol` - The ticker (e.g., "AAPL.US")
  /// * `statement` - Which statement to fetch
  #[instrument(skip(self), fields(statement = %statement))]
  pub async fn statement(&self, symbol: &str, statement: StatementType) -> Result<Value> {
    self.wait_for_rate_limit().await?;
    self.transport.get(Endpoint::Financials(statement), symbol).await
  }

  pub async fn income_statement(&self, symbol: &str) -> Result<Value> {
    self.statement(symbol, StatementType::Income).await
  }

  pub async fn balance_sheet_statement(&self, symbol: &str) -> Result<Value> {
    self.statement(symbol, StatementType::BalanceSheet).await
  }

  pub async fn cash_flow_statement(&self, symbol: &str) -> Result<Value> {
    self.statement(symbol, StatementType::CashFlow).await
  }
}

impl_endpoint_base!(FinancialsEndpoints);
