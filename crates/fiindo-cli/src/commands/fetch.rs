/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;
use fiindo_client::FiindoClient;
use fiindo_loaders::artifacts::{self, ArtifactKind, COLLECTION_SUMMARY_FILE};
use fiindo_loaders::{
  DataLoader, FinancialsLoader, FinancialsLoaderInput, KnownSymbols, LoaderConfig, LoaderContext,
  ProcessTracker, SymbolLoader, SymbolLoaderInput,
};
use fiindo_models::CollectionSummary;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Args, Clone, Debug, Default)]
pub struct FetchArgs {
  /// Symbols to fetch (comma-separated); defaults to the full API listing
  #[arg(short, long, value_delimiter = ',')]
  pub symbols: Option<Vec<String>>,

  /// Limit number of matching symbols to fetch
  #[arg(short, long)]
  pub limit: Option<usize>,

  /// Number of concurrent symbols
  #[arg(short, long, default_value = "5")]
  pub concurrent: usize,

  /// Dataset file to write instead of a timestamped one in the data directory
  #[arg(short, long)]
  pub output: Option<PathBuf>,
}

/// Fetch the dataset and return the path it was written to
pub async fn execute(args: FetchArgs, config: &Config) -> Result<PathBuf> {
  info!("Starting fetch");

  let client = Arc::new(
    FiindoClient::new(config.api_config.clone()).context("Failed to create API client")?,
  );
  let loader_config = LoaderConfig {
    max_concurrent_requests: args.concurrent.max(1),
    ..LoaderConfig::default()
  };
  let context =
    LoaderContext::new(client, loader_config).with_process_tracker(ProcessTracker::new());

  let symbol_loader = SymbolLoader::new(KnownSymbols::load(&config.known_symbols_path));
  let selection = symbol_loader
    .load(
      &context,
      SymbolLoaderInput {
        symbols: args.symbols,
        filter: config.target_industries.clone(),
        limit: args.limit,
      },
    )
    .await
    .context("Failed to resolve symbols")?;

  if selection.symbols.is_empty() {
    warn!("No symbols in target industries {:?}", config.target_industries.targets());
  }

  let collected = FinancialsLoader::new()
    .load(&context, FinancialsLoaderInput { symbols: selection.symbols.clone() })
    .await
    .context("Failed to collect financial data")?;

  let timestamp = artifacts::timestamp();
  let data_file = args.output.unwrap_or_else(|| {
    artifacts::artifact_path(&config.data_dir, ArtifactKind::FinancialData, &timestamp)
  });
  artifacts::write_json(&data_file, &collected.dataset)?;

  let mut symbols_by_industry = std::collections::BTreeMap::new();
  for industry in config.target_industries.targets() {
    symbols_by_industry.insert(industry.clone(), 0);
  }
  for symbol in collected.dataset.keys() {
    if let Some(industry) = selection.industries.get(symbol) {
      *symbols_by_industry.entry(industry.clone()).or_insert(0) += 1;
    }
  }

  let summary = CollectionSummary {
    total_symbols_from_api: selection.total_symbols,
    filtered_symbols: selection.symbols.len(),
    collected_symbols: collected.collected,
    collection_date: Local::now().naive_local(),
    known_symbols_count: selection.known_symbols_count,
    symbols_by_industry,
    data_file: data_file.display().to_string(),
  };
  artifacts::write_json(&config.data_dir.join(COLLECTION_SUMMARY_FILE), &summary)?;

  for (industry, count) in &summary.symbols_by_industry {
    info!("  {}: {} symbols", industry, count);
  }
  info!(
    "Fetch complete: {} collected of {} matching ({} skipped)",
    collected.collected,
    selection.symbols.len(),
    collected.skipped.len()
  );
  if let Some(tracker) = &context.process_tracker {
    tracker.log_summary().await;
  }

  Ok(data_file)
}
