use anyhow::{Context, Result};
use clap::Args;
use fiindo_loaders::artifacts::{self, ArtifactKind};
use fiindo_loaders::{IndustryFilter, IndustryLookup, KnownSymbols, MetricsPipeline, PipelineConfig};
use fiindo_models::FinancialDataset;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::Config;

#[derive(Args, Clone, Debug, Default)]
pub struct TransformArgs {
  /// Dataset file; defaults to the newest financial_data file
  #[arg(short, long)]
  pub input: Option<PathBuf>,

  /// Keep tickers outside the target industries in the ticker statistics
  #[arg(long)]
  pub retain_unlisted: bool,
}

/// Files written by one transform
#[derive(Debug, Clone)]
pub struct TransformOutcome {
  pub tickers_path: PathBuf,
  pub industries_path: PathBuf,
  pub ticker_count: usize,
  pub industry_count: usize,
}

pub fn execute(args: TransformArgs, config: &Config) -> Result<TransformOutcome> {
  let input = artifacts::resolve_artifact(
    args.input.as_deref(),
    &config.data_dir,
    ArtifactKind::FinancialData,
  )?;
  let known_symbols = KnownSymbols::load(&config.known_symbols_path);
  info!("Using {} known symbol classifications", known_symbols.len());

  transform_file(
    &input,
    &config.data_dir,
    &known_symbols,
    config.target_industries.clone(),
    args.retain_unlisted,
  )
}

/// Run the metrics pipeline over one dataset file
pub fn transform_file<L: IndustryLookup + ?Sized>(
  input: &Path,
  out_dir: &Path,
  lookup: &L,
  target_industries: IndustryFilter,
  retain_unlisted: bool,
) -> Result<TransformOutcome> {
  info!("Transforming {}", input.display());
  let dataset: FinancialDataset = artifacts::read_json(input)
    .with_context(|| format!("Failed to read dataset {}", input.display()))?;

  let pipeline = MetricsPipeline::new(PipelineConfig {
    target_industries,
    retain_unlisted,
    ..PipelineConfig::default()
  });
  let output = pipeline.run(&dataset, lookup);

  for failure in &output.failures {
    warn!("{}: {}", failure.symbol, failure.reason);
  }

  let timestamp = artifacts::timestamp();
  let tickers_path = artifacts::artifact_path(out_dir, ArtifactKind::TickerStatistics, &timestamp);
  let industries_path =
    artifacts::artifact_path(out_dir, ArtifactKind::IndustryAggregation, &timestamp);
  artifacts::write_json(&tickers_path, &output.tickers)?;
  artifacts::write_json(&industries_path, &output.industries)?;

  for aggregate in &output.industries {
    info!(
      "  {}: {} tickers, avg P/E {:?}, avg growth {:?}, revenue {:?}",
      aggregate.industry,
      aggregate.ticker_count,
      aggregate.avg_pe_ratio,
      aggregate.avg_revenue_growth_pct,
      aggregate.sum_revenue
    );
  }

  Ok(TransformOutcome {
    tickers_path,
    industries_path,
    ticker_count: output.tickers.len(),
    industry_count: output.industries.len(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use fiindo_models::{IndustryAggregate, TickerMetrics};
  use serde_json::json;
  use std::collections::BTreeMap;
  use tempfile::tempdir;

  #[test]
  fn test_transform_file_writes_both_artifacts() {
    let temp = tempdir().unwrap();
    let input = temp.path().join("financial_data_20250101_000000.json");
    let dataset = json!({
      "XYZ.US": {
        "eod": {"stockprice": {"data": [{"close": 150.0}]}},
        "income_statement": {"fundamentals": {"financials": {"income_statement": {"data": [
          {"date": "2025-06-30", "period": "Q2", "revenue": 1200000.0, "netIncome": 250000.0, "eps": 3.0},
          {"date": "2025-03-31", "period": "Q1", "revenue": 1000000.0, "netIncome": 200000.0, "eps": 2.5}
        ]}}}}
      },
      "OIL.US": {"eod": {}, "income_statement": {}}
    });
    std::fs::write(&input, dataset.to_string()).unwrap();

    let mut lookup = BTreeMap::new();
    lookup.insert("XYZ.US".to_string(), "Banks - Diversified".to_string());
    lookup.insert("OIL.US".to_string(), "Oil & Gas Integrated".to_string());

    let outcome =
      transform_file(&input, temp.path(), &lookup, IndustryFilter::default(), false).unwrap();
    assert_eq!(outcome.ticker_count, 1);
    assert_eq!(outcome.industry_count, 1);

    let tickers: Vec<TickerMetrics> = artifacts::read_json(&outcome.tickers_path).unwrap();
    assert_eq!(tickers[0].symbol, "XYZ.US");
    assert_eq!(tickers[0].price, Some(150.0));

    let industries: Vec<IndustryAggregate> =
      artifacts::read_json(&outcome.industries_path).unwrap();
    assert_eq!(industries[0].industry, "Banks - Diversified");
    assert_eq!(industries[0].ticker_count, 1);
  }

  #[test]
  fn test_transform_file_missing_input() {
    let temp = tempdir().unwrap();
    let lookup: BTreeMap<String, String> = BTreeMap::new();
    let result = transform_file(
      &temp.path().join("missing.json"),
      temp.path(),
      &lookup,
      IndustryFilter::default(),
      false,
    );
    assert!(result.is_err());
  }
}
