use anyhow::Result;
use clap::Args;
use tracing::info;

use super::fetch::{self, FetchArgs};
use super::load::{self, LoadArgs};
use super::transform::{self, TransformArgs};
use crate::config::Config;

#[derive(Args, Clone, Debug)]
pub struct RunArgs {
  /// Symbols to fetch (comma-separated); defaults to the full API listing
  #[arg(short, long, value_delimiter = ',')]
  symbols: Option<Vec<String>>,

  /// Limit number of matching symbols to fetch
  #[arg(short, long)]
  limit: Option<usize>,

  /// Number of concurrent symbols
  #[arg(short, long, default_value = "5")]
  concurrent: usize,

  /// Run every stage but don't write to the database
  #[arg(long)]
  dry_run: bool,
}

/// Fetch, transform and load in one go
pub async fn execute(args: RunArgs, config: &Config) -> Result<()> {
  if !args.dry_run {
    config.require_database_url()?;
  }

  let fetch_args = FetchArgs {
    symbols: args.symbols,
    limit: args.limit,
    concurrent: args.concurrent,
    output: None,
  };
  let data_file = fetch::execute(fetch_args, config).await?;

  let outcome =
    transform::execute(TransformArgs { input: Some(data_file), retain_unlisted: false }, config)?;

  let load_args = LoadArgs {
    tickers: Some(outcome.tickers_path),
    industries: Some(outcome.industries_path),
    dry_run: args.dry_run,
  };
  load::execute(load_args, config).await?;

  info!(
    "Pipeline complete: {} tickers, {} industries",
    outcome.ticker_count, outcome.industry_count
  );
  Ok(())
}
