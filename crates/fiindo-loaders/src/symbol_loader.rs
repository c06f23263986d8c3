//! Symbol discovery and industry filtering for the fetch stage

use async_trait::async_trait;
use fiindo_core::UNKNOWN_INDUSTRY;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::batch_processor::{BatchConfig, BatchProcessor};
use crate::industry::IndustryFilter;
use crate::known_symbols::{KnownSymbols, SymbolUpdate};
use crate::{DataLoader, LoaderContext, LoaderError, LoaderResult, ProcessState};

#[derive(Debug, Clone, Default)]
pub struct SymbolLoaderInput {
  /// Explicit symbols; the full API listing is used when `None`
  pub symbols: Option<Vec<String>>,
  pub filter: IndustryFilter,
  /// Keep at most this many matching symbols
  pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default)]
pub struct SymbolLoaderOutput {
  pub total_symbols: usize,
  /// Matching symbols in listing order
  pub symbols: Vec<String>,
  /// Industry of every matching symbol
  pub industries: BTreeMap<String, String>,
  pub added: usize,
  pub updated: usize,
  /// Symbols whose profile could not be fetched
  pub lookup_failures: Vec<String>,
  pub known_symbols_count: usize,
}

impl SymbolLoaderOutput {
  fn record(
    &mut self,
    symbol: String,
    resolution: LoaderResult<Resolution>,
    filter: &IndustryFilter,
  ) {
    let industry = match resolution {
      Ok(Resolution::Cached(industry)) => industry,
      Ok(Resolution::Fetched(industry, update)) => {
        match update {
          SymbolUpdate::Added => self.added += 1,
          SymbolUpdate::Updated => self.updated += 1,
          SymbolUpdate::Unchanged => {}
        }
        industry
      }
      Err(e) => {
        warn!("Industry lookup failed for {}: {}", symbol, e);
        self.lookup_failures.push(symbol);
        return;
      }
    };

    if !filter.contains(&industry) {
      debug!("{} ({}) not in target industries", symbol, industry);
      return;
    }
    self.industries.insert(symbol.clone(), industry);
    self.symbols.push(symbol);
  }

  /// Matching symbols per industry
  pub fn symbols_by_industry(&self) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for industry in self.industries.values() {
      *counts.entry(industry.clone()).or_insert(0) += 1;
    }
    counts
  }
}

enum Resolution {
  Cached(String),
  Fetched(String, SymbolUpdate),
}

/// Resolves industries through the known-symbol cache, asking the
/// `general` endpoint only for symbols the cache has not seen.
pub struct SymbolLoader {
  known_symbols: Arc<Mutex<KnownSymbols>>,
}

impl SymbolLoader {
  pub fn new(known_symbols: KnownSymbols) -> Self {
    Self { known_symbols: Arc::new(Mutex::new(known_symbols)) }
  }

  pub fn known_symbols(&self) -> Arc<Mutex<KnownSymbols>> {
    self.known_symbols.clone()
  }

  async fn resolve(
    context: &LoaderContext,
    known: Arc<Mutex<KnownSymbols>>,
    symbols: Vec<String>,
  ) -> LoaderResult<Vec<(String, LoaderResult<Resolution>)>> {
    let processor = BatchProcessor::new(BatchConfig {
      batch_size: context.config.batch_size,
      max_concurrent: context.config.max_concurrent_requests,
      continue_on_error: true,
      batch_delay_ms: None,
    });

    let client = context.client.clone();
    let resolved = processor
      .process(symbols, move |symbol: String| {
        let client = client.clone();
        let known = known.clone();
        Box::pin(async move {
          if let Some(industry) = known.lock().await.get(&symbol) {
            return Ok((symbol, Ok(Resolution::Cached(industry.to_string()))));
          }

          let resolution = match client.general().industry(&symbol).await {
            Ok(industry) => {
              let industry = industry.unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string());
              let update = known.lock().await.update(&symbol, &industry);
              Ok(Resolution::Fetched(industry, update))
            }
            Err(e) => Err(LoaderError::from(e)),
          };
          Ok((symbol, resolution))
        })
      })
      .await?;

    Ok(resolved.success)
  }
}

#[async_trait]
impl DataLoader for SymbolLoader {
  type Input = SymbolLoaderInput;
  type Output = SymbolLoaderOutput;

  async fn validate_input(&self, input: &Self::Input) -> LoaderResult<()> {
    if input.filter.targets().is_empty() {
      return Err(LoaderError::ConfigurationError("No target industries configured".to_string()));
    }
    Ok(())
  }

  async fn load(&self, context: &LoaderContext, input: Self::Input) -> LoaderResult<Self::Output> {
    self.validate_input(&input).await?;

    if let Some(tracker) = &context.process_tracker {
      tracker.start("symbol_loader").await;
    }

    let symbols = match input.symbols {
      Some(symbols) => symbols,
      None => context.client.symbols().list().await?,
    };
    info!(
      "Resolving industries for {} symbols ({} already known)",
      symbols.len(),
      self.known_symbols.lock().await.len()
    );

    let mut output = SymbolLoaderOutput { total_symbols: symbols.len(), ..Default::default() };
    match input.limit {
      None => {
        let resolved = Self::resolve(context, self.known_symbols.clone(), symbols).await?;
        for (symbol, resolution) in resolved {
          output.record(symbol, resolution, &input.filter);
        }
      }
      Some(limit) => {
        // Dispatch only as many lookups as matches are still missing
        let mut pending = symbols.into_iter();
        while output.symbols.len() < limit {
          let wanted = (limit - output.symbols.len())
            .min(context.config.max_concurrent_requests)
            .max(1);
          let chunk: Vec<String> = pending.by_ref().take(wanted).collect();
          if chunk.is_empty() {
            break;
          }
          let resolved = Self::resolve(context, self.known_symbols.clone(), chunk).await?;
          for (symbol, resolution) in resolved {
            output.record(symbol, resolution, &input.filter);
          }
        }
      }
    }

    {
      let mut known = self.known_symbols.lock().await;
      known.save()?;
      output.known_symbols_count = known.len();
    }

    if let Some(tracker) = &context.process_tracker {
      let state = if output.lookup_failures.is_empty() {
        ProcessState::Success
      } else {
        ProcessState::CompletedWithErrors
      };
      tracker.complete(state, output.symbols.len()).await;
    }

    info!(
      "{} of {} symbols in target industries ({} new, {} updated, {} lookup failures)",
      output.symbols.len(),
      output.total_symbols,
      output.added,
      output.updated,
      output.lookup_failures.len()
    );
    Ok(output)
  }

  fn name(&self) -> &'static str {
    "SymbolLoader"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::LoaderConfig;
  use fiindo_client::FiindoClient;
  use fiindo_core::Config;
  use serde_json::{json, Value};
  use std::time::Duration;
  use tempfile::tempdir;
  use wiremock::matchers::{method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  fn context(server: &MockServer) -> LoaderContext {
    let mut config = Config::default_with_token("first.last".to_string());
    config.base_url = server.uri();
    config.max_retries = 0;
    config.rate_limit = 6000;
    let client = FiindoClient::with_retry_delay(config, Duration::from_millis(1)).unwrap();
    let loader_config = LoaderConfig { show_progress: false, ..Default::default() };
    LoaderContext::new(Arc::new(client), loader_config)
  }

  fn profile(industry: &str) -> Value {
    json!({"fundamentals": {"profile": {"data": [{"industry": industry}]}}})
  }

  async fn mount_general(server: &MockServer, symbol: &str, status: u16, body: Value, calls: u64) {
    Mock::given(method("GET"))
      .and(path(format!("/api/v1/general/{}", symbol)))
      .respond_with(ResponseTemplate::new(status).set_body_json(body))
      .expect(calls)
      .mount(server)
      .await;
  }

  #[tokio::test]
  async fn test_resolves_filters_and_caches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
      .and(path("/api/v1/symbols"))
      .respond_with(
        ResponseTemplate::new(200)
          .set_body_json(json!({"symbols": ["JPM.US", "AAPL.US", "XOM.US", "BAD.US", "MSFT.US"]})),
      )
      .mount(&server)
      .await;
    // JPM.US is cached and must not be looked up
    mount_general(&server, "JPM.US", 200, profile("Banks - Diversified"), 0).await;
    mount_general(&server, "AAPL.US", 200, profile("Consumer Electronics"), 1).await;
    mount_general(&server, "XOM.US", 200, profile("Oil & Gas Integrated"), 1).await;
    mount_general(&server, "BAD.US", 404, json!({}), 1).await;
    mount_general(&server, "MSFT.US", 200, json!({"fundamentals": {}}), 1).await;

    let temp = tempdir().unwrap();
    let cache_path = temp.path().join("known_symbols.json");
    std::fs::write(&cache_path, r#"{"JPM.US": "Banks - Diversified"}"#).unwrap();

    let loader = SymbolLoader::new(KnownSymbols::load(&cache_path));
    let output = loader.load(&context(&server), SymbolLoaderInput::default()).await.unwrap();

    assert_eq!(output.total_symbols, 5);
    assert_eq!(output.symbols, vec!["JPM.US", "AAPL.US"]);
    assert_eq!(output.added, 3);
    assert_eq!(output.lookup_failures, vec!["BAD.US"]);
    assert_eq!(output.known_symbols_count, 4);
    assert_eq!(output.symbols_by_industry()["Consumer Electronics"], 1);

    let reloaded = KnownSymbols::load(&cache_path);
    assert_eq!(reloaded.get("MSFT.US"), Some(UNKNOWN_INDUSTRY));
    assert_eq!(reloaded.get("XOM.US"), Some("Oil & Gas Integrated"));
    assert!(reloaded.get("BAD.US").is_none());
  }

  #[tokio::test]
  async fn test_explicit_symbols_and_limit() {
    let server = MockServer::start().await;
    mount_general(&server, "C.US", 200, profile("Banks - Diversified"), 1).await;
    mount_general(&server, "WFC.US", 200, profile("Banks - Diversified"), 0).await;

    let temp = tempdir().unwrap();
    let loader = SymbolLoader::new(KnownSymbols::load(temp.path().join("k.json")));
    let input = SymbolLoaderInput {
      symbols: Some(vec!["C.US".to_string(), "WFC.US".to_string()]),
      limit: Some(1),
      ..Default::default()
    };
    let output = loader.load(&context(&server), input).await.unwrap();

    assert_eq!(output.symbols, vec!["C.US"]);
    assert_eq!(loader.known_symbols().lock().await.len(), 1);
  }

  #[tokio::test]
  async fn test_limit_stops_lookups_once_reached() {
    let server = MockServer::start().await;
    mount_general(&server, "AAPL.US", 200, profile("Consumer Electronics"), 1).await;
    mount_general(&server, "JPM.US", 200, profile("Banks - Diversified"), 1).await;
    mount_general(&server, "XOM.US", 200, profile("Oil & Gas Integrated"), 1).await;
    mount_general(&server, "BAC.US", 200, profile("Banks - Diversified"), 0).await;
    mount_general(&server, "WFC.US", 200, profile("Banks - Diversified"), 0).await;
    mount_general(&server, "C.US", 200, profile("Banks - Diversified"), 0).await;

    let temp = tempdir().unwrap();
    let loader = SymbolLoader::new(KnownSymbols::load(temp.path().join("k.json")));
    let symbols = ["AAPL.US", "XOM.US", "JPM.US", "BAC.US", "WFC.US", "C.US"];
    let input = SymbolLoaderInput {
      symbols: Some(symbols.iter().map(|s| s.to_string()).collect()),
      limit: Some(2),
      ..Default::default()
    };
    let output = loader.load(&context(&server), input).await.unwrap();

    assert_eq!(output.symbols, vec!["AAPL.US", "JPM.US"]);
    assert_eq!(output.added, 3);
    assert_eq!(output.known_symbols_count, 3);
  }

  #[tokio::test]
  async fn test_empty_filter_is_rejected() {
    let server = MockServer::start().await;
    let temp = tempdir().unwrap();
    let loader = SymbolLoader::new(KnownSymbols::load(temp.path().join("k.json")));
    let input = SymbolLoaderInput { filter: IndustryFilter::parse(" , "), ..Default::default() };
    let result = loader.load(&context(&server), input).await;
    assert!(matches!(result, Err(LoaderError::ConfigurationError(_))));
  }
}
