//! Fetches the end-of-day document and the three statements for each symbol

use async_trait::async_trait;
use fiindo_client::FiindoClient;
use fiindo_core::StatementType;
use fiindo_models::{FinancialDataset, SymbolDocument};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::batch_processor::{BatchConfig, BatchProcessor};
use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult, ProcessState};

/// Endpoints that must succeed for a symbol to be kept
pub const MIN_ENDPOINTS: usize = 2;

#[derive(Debug, Clone)]
pub struct FinancialsLoaderInput {
  pub symbols: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FinancialsLoaderOutput {
  /// Kept symbols mapped to their `SymbolDocument` JSON
  pub dataset: FinancialDataset,
  pub collected: usize,
  /// Symbols dropped for having too few endpoints
  pub skipped: Vec<String>,
}

/// Loader for per-symbol financial documents
#[derive(Debug, Clone)]
pub struct FinancialsLoader {
  min_endpoints: usize,
}

impl Default for FinancialsLoader {
  fn default() -> Self {
    Self { min_endpoints: MIN_ENDPOINTS }
  }
}

impl FinancialsLoader {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_min_endpoints(mut self, min_endpoints: usize) -> Self {
    self.min_endpoints = min_endpoints;
    self
  }

  /// Fetch all four parts of one symbol. Failed parts are left empty.
  pub async fn fetch_symbol(client: &FiindoClient, symbol: &str) -> SymbolDocument {
    let eod = client.eod();
    let financials = client.financials();

    let (eod, income, balance, cash_flow) = tokio::join!(
      eod.eod(symbol),
      financials.statement(symbol, StatementType::Income),
      financials.statement(symbol, StatementType::BalanceSheet),
      financials.statement(symbol, StatementType::CashFlow),
    );

    let mut document = SymbolDocument { eod: keep(symbol, "eod", eod), ..Default::default() };
    for (statement, result) in StatementType::ALL.into_iter().zip([income, balance, cash_flow]) {
      if let Some(value) = keep(symbol, statement.as_str(), result) {
        document.set_statement(statement, value);
      }
    }
    document
  }
}

fn keep(symbol: &str, part: &str, result: fiindo_core::Result<Value>) -> Option<Value> {
  match result {
    Ok(value) => Some(value),
    Err(e) => {
      warn!("{} {} failed: {}", symbol, part, e);
      None
    }
  }
}

fn progress_bar(len: usize) -> ProgressBar {
  let pb = ProgressBar::new(len as u64);
  if let Ok(style) = ProgressStyle::default_bar()
    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
  {
    pb.set_style(style.progress_chars("#>-"));
  }
  pb
}

#[async_trait]
impl DataLoader for FinancialsLoader {
  type Input = FinancialsLoaderInput;
  type Output = FinancialsLoaderOutput;

  async fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    if input.symbols.iter().any(|s| s.trim().is_empty()) {
      return Err(LoaderError::InvalidData("Blank symbol in input".to_string()));
    }
    Ok(())
  }

  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input).await?;
    info!("Collecting financial data for {} symbols", input.symbols.len());

    if let Some(tracker) = &context.process_tracker {
      tracker.start("financials_loader").await;
    }

    let progress = if context.config.show_progress {
      Some(Arc::new(progress_bar(input.symbols.len())))
    } else {
      None
    };

    let processor = BatchProcessor::new(BatchConfig {
      batch_size: context.config.batch_size,
      max_concurrent: context.config.max_concurrent_requests,
      continue_on_error: true,
      batch_delay_ms: None,
    });

    let client = context.client.clone();
    let progress_for_tasks = progress.clone();
    let fetched = processor
      .process(input.symbols, move |symbol: String| {
        let client = client.clone();
        let progress = progress_for_tasks.clone();
        Box::pin(async move {
          if let Some(pb) = &progress {
            pb.set_message(symbol.clone());
          }
          let document = FinancialsLoader::fetch_symbol(&client, &symbol).await;
          if let Some(pb) = &progress {
            pb.inc(1);
          }
          Ok((symbol, document))
        })
      })
      .await?;

    if let Some(pb) = progress {
      pb.finish_with_message("Collection complete");
    }

    let mut output = FinancialsLoaderOutput::default();
    for (symbol, document) in fetched.success {
      let count = document.endpoint_count();
      if count >= self.min_endpoints {
        debug!("{}: kept {:?}", symbol, document.parts());
        output.dataset.insert(symbol, document.into_value());
      } else {
        warn!("{}: only {} endpoint(s) succeeded, skipping", symbol, count);
        output.skipped.push(symbol);
      }
    }
    output.collected = output.dataset.len();

    if let Some(tracker) = &context.process_tracker {
      let state = if output.skipped.is_empty() {
        ProcessState::Success
      } else {
        ProcessState::CompletedWithErrors
      };
      tracker.complete(state, output.collected).await;
    }

    info!("Collected {} symbols, skipped {}", output.collected, output.skipped.len());
    Ok(output)
  }

  fn name(&self) -> &'static str {
    "FinancialsLoader"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{LoaderConfig, ProcessTracker};
  use fiindo_core::Config;
  use serde_json::json;
  use std::time::Duration;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn context(server: &MockServer) -> LoaderContext {
    let mut config = Config::default_with_token("first.last".to_string());
    config.base_url = server.uri();
    config.max_retries = 0;
    config.rate_limit = 6000;
    let client = FiindoClient::with_retry_delay(config, Duration::from_millis(1)).unwrap();
    let loader_config = LoaderConfig { show_progress: false, ..LoaderConfig::default() };
    LoaderContext::new(Arc::new(client), loader_config).with_process_tracker(ProcessTracker::new())
  }

  async fn mount(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
      .and(path(route))
      .respond_with(ResponseTemplate::new(200).set_body_json(body))
      .mount(server)
      .await;
  }

  #[tokio::test]
  async fn test_keeps_symbols_with_enough_endpoints() {
    let server = MockServer::start().await;
    mount(&server, "/api/v1/eod/XYZ.US", json!({"stockprice": {"data": [{"close": 150.0}]}})).await;
    mount(&server, "/api/v1/financials/XYZ.US/income_statement", json!({"fundamentals": {}}))
      .await;
    // only one endpoint for ABC.US
    mount(&server, "/api/v1/eod/ABC.US", json!({"stockprice": {"data": []}})).await;

    let ctx = context(&server);
    let input = FinancialsLoaderInput { symbols: vec!["XYZ.US".to_string(), "ABC.US".to_string()] };
    let output = FinancialsLoader::new().load(&ctx, input).await.unwrap();

    assert_eq!(output.collected, 1);
    assert_eq!(output.skipped, vec!["ABC.US".to_string()]);
    let doc = &output.dataset["XYZ.US"];
    assert_eq!(doc["eod"]["stockprice"]["data"][0]["close"], 150.0);
    assert!(doc.get("balance_sheet_statement").is_none());

    let runs = ctx.process_tracker.as_ref().unwrap().get_all().await;
    assert_eq!(runs[0].state, ProcessState::CompletedWithErrors);
    assert_eq!(runs[0].records_processed, Some(1));
  }

  #[tokio::test]
  async fn test_fetch_symbol_collects_all_parts() {
    let server = MockServer::start().await;
    mount(&server, "/api/v1/eod/JPM.US", json!({"stockprice": {}})).await;
    for statement in StatementType::ALL {
      mount(&server, &format!("/api/v1/financials/JPM.US/{}", statement), json!({"ok": true}))
        .await;
    }

    let ctx = context(&server);
    let document = FinancialsLoader::fetch_symbol(&ctx.client, "JPM.US").await;
    assert_eq!(document.endpoint_count(), 4);
  }

  #[tokio::test]
  async fn test_rejects_blank_symbols() {
    let server = MockServer::start().await;
    let ctx = context(&server);
    let input = FinancialsLoaderInput { symbols: vec![" ".to_string()] };
    let result = FinancialsLoader::new().load(&ctx, input).await;
    assert!(matches!(result, Err(LoaderError::InvalidData(_))));
  }
}
