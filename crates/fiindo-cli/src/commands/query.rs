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

use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use fiindo_database_postgres::{DatabaseContext, MetricsRepository};

#[derive(Args, Debug)]
pub struct QueryArgs {
  /// Only show tickers of this industry
  #[arg(short, long)]
  industry: Option<String>,
}

fn fmt_opt(value: Option<f64>, precision: usize) -> String {
  value.map(|v| format!("{:.*}", precision, v)).unwrap_or_else(|| "-".to_string())
}

pub async fn execute(args: QueryArgs, config: &Config) -> Result<()> {
  let db_context = DatabaseContext::new(config.require_database_url()?)
    .context("Failed to create database context")?;
  let repo = db_context.metrics_repository();

  let industries = repo.list_industry_aggregations().await?;
  println!(
    "{:<32} {:>8} {:>12} {:>12} {:>20}",
    "INDUSTRY", "TICKERS", "AVG P/E", "AVG GROWTH", "REVENUE"
  );
  for row in industries
    .iter()
    .filter(|row| args.industry.as_deref().is_none_or(|name| name == row.industry))
  {
    println!(
      "{:<32} {:>8} {:>12} {:>12} {:>20}",
      row.industry,
      row.ticker_count,
      fmt_opt(row.avg_pe_ratio, 2),
      fmt_opt(row.avg_revenue_growth, 2),
      fmt_opt(row.sum_revenue, 0)
    );
  }

  let tickers = repo.list_ticker_statistics(args.industry.as_deref()).await?;
  println!();
  println!(
    "{:<12} {:<32} {:>10} {:>10} {:>10} {:>18} {:>10}",
    "SYMBOL", "INDUSTRY", "PRICE", "P/E", "GROWTH", "NET INCOME TTM", "DEBT"
  );
  for row in &tickers {
    println!(
      "{:<12} {:<32} {:>10} {:>10} {:>10} {:>18} {:>10}",
      row.symbol,
      row.industry,
      fmt_opt(row.price, 2),
      fmt_opt(row.pe_ratio, 2),
      fmt_opt(row.revenue_growth, 2),
      fmt_opt(row.net_income_ttm, 0),
      fmt_opt(row.debt_ratio, 3)
    );
  }
  println!("\n{} tickers", tickers.len());

  Ok(())
}
