use anyhow::{Context, Result};
use clap::Args;
use fiindo_database_postgres::{
  DatabaseContext, MetricsRepository, NewIndustryAggregation, NewTickerStatistic,
};
use fiindo_loaders::artifacts::{self, ArtifactKind};
use fiindo_models::{IndustryAggregate, TickerMetrics};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::Config;

#[derive(Args, Clone, Debug, Default)]
pub struct LoadArgs {
  /// Ticker statistics file; defaults to the newest one
  #[arg(short, long)]
  pub tickers: Option<PathBuf>,

  /// Industry aggregation file; defaults to the newest one
  #[arg(short, long)]
  pub industries: Option<PathBuf>,

  /// Read and convert the files but don't write to the database
  #[arg(long)]
  pub dry_run: bool,
}

pub async fn execute(args: LoadArgs, config: &Config) -> Result<()> {
  let tickers_path = artifacts::resolve_artifact(
    args.tickers.as_deref(),
    &config.data_dir,
    ArtifactKind::TickerStatistics,
  )?;
  let industries_path = artifacts::resolve_artifact(
    args.industries.as_deref(),
    &config.data_dir,
    ArtifactKind::IndustryAggregation,
  )?;

  let (tickers, industries) = read_rows(&tickers_path, &industries_path)?;
  info!(
    "Read {} ticker rows from {} and {} industry rows from {}",
    tickers.len(),
    tickers_path.display(),
    industries.len(),
    industries_path.display()
  );

  if args.dry_run {
    info!(
      "Dry run complete - would have upserted {} tickers, {} industries",
      tickers.len(),
      industries.len()
    );
    return Ok(());
  }

  let db_context = DatabaseContext::new(config.require_database_url()?)
    .context("Failed to create database context")?;
  let repo = db_context.metrics_repository();

  let saved_tickers =
    repo.upsert_ticker_statistics(&tickers).await.context("Failed to upsert ticker statistics")?;
  let saved_industries = repo
    .upsert_industry_aggregations(&industries)
    .await
    .context("Failed to upsert industry aggregation")?;

  info!("Saved {} ticker statistics and {} industry aggregates", saved_tickers, saved_industries);
  Ok(())
}

/// Read both statistics files as database rows
pub fn read_rows(
  tickers_path: &Path,
  industries_path: &Path,
) -> Result<(Vec<NewTickerStatistic>, Vec<NewIndustryAggregation>)> {
  let tickers: Vec<TickerMetrics> = artifacts::read_json(tickers_path)
    .with_context(|| format!("Failed to read {}", tickers_path.display()))?;
  let industries: Vec<IndustryAggregate> = artifacts::read_json(industries_path)
    .with_context(|| format!("Failed to read {}", industries_path.display()))?;

  Ok((
    tickers.iter().map(NewTickerStatistic::from).collect(),
    industries.iter().map(NewIndustryAggregation::from).collect(),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn test_read_rows() {
    let temp = tempdir().unwrap();
    let tickers_path = temp.path().join("ticker_statistics_20250101_000000.json");
    let industries_path = temp.path().join("industry_aggregation_20250101_000000.json");

    let mut metrics = TickerMetrics::new("XYZ.US", "Banks - Diversified");
    metrics.pe_ratio = Some(50.0);
    metrics.revenue_growth_pct = Some(20.0);
    artifacts::write_json(&tickers_path, &vec![metrics]).unwrap();
    artifacts::write_json(
      &industries_path,
      &vec![IndustryAggregate {
        industry: "Banks - Diversified".to_string(),
        avg_pe_ratio: Some(50.0),
        avg_revenue_growth_pct: Some(20.0),
        sum_revenue: None,
        ticker_count: 1,
      }],
    )
    .unwrap();

    let (tickers, industries) = read_rows(&tickers_path, &industries_path).unwrap();
    assert_eq!(tickers.len(), 1);
    assert_eq!(tickers[0].revenue_growth, Some(20.0));
    assert_eq!(industries[0].ticker_count, 1);
    assert_eq!(industries[0].sum_revenue, None);
  }

  #[tokio::test]
  async fn test_dry_run_needs_no_database() {
    let temp = tempdir().unwrap();
    let tickers_path = temp.path().join("t.json");
    let industries_path = temp.path().join("i.json");
    artifacts::write_json(&tickers_path, &Vec::<TickerMetrics>::new()).unwrap();
    artifacts::write_json(&industries_path, &Vec::<IndustryAggregate>::new()).unwrap();

    let config = crate::config::Config::with_api_config(
      fiindo_core::Config::default_with_token("first.last".to_string()),
      |_| None,
    );
    let args =
      LoadArgs { tickers: Some(tickers_path), industries: Some(industries_path), dry_run: true };
    assert!(execute(args, &config).await.is_ok());
  }
}
