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

//! Batch transformation of a collected dataset into ticker metrics and
//! industry aggregates.

use crate::aggregate::aggregate_by_industry;
use crate::calculator::MetricCalculator;
use crate::extract::MetricExtractor;
use crate::industry::{industry_or_unknown, IndustryFilter, IndustryLookup};
use crate::period::PeriodLocator;
use crate::tree::DEFAULT_MAX_DEPTH;
use fiindo_models::{FinancialDataset, IndustryAggregate, TickerMetrics};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Options for one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineConfig {
  /// Industries kept for aggregation
  pub target_industries: IndustryFilter,

  /// Recursion limit when searching statement documents
  pub max_depth: usize,

  /// Keep tickers outside the target industries in the per-ticker output.
  /// They are never aggregated.
  pub retain_unlisted: bool,
}

impl Default for PipelineConfig {
  fn default() -> Self {
    Self {
      target_industries: IndustryFilter::default(),
      max_depth: DEFAULT_MAX_DEPTH,
      retain_unlisted: false,
    }
  }
}

/// A symbol whose document could not be processed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickerFailure {
  pub symbol: String,
  pub reason: String,
}

/// Result of one pipeline run
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineOutput {
  /// Per-ticker metrics in symbol order
  pub tickers: Vec<TickerMetrics>,

  /// Aggregates in industry-name order
  pub industries: Vec<IndustryAggregate>,

  pub failures: Vec<TickerFailure>,

  /// Symbols dropped by the industry filter
  pub excluded: usize,

  /// Tickers kept in the output without a single derived metric
  pub without_metrics: usize,
}

/// Turns a [`FinancialDataset`] into [`PipelineOutput`]
#[derive(Debug, Clone)]
pub struct MetricsPipeline {
  config: PipelineConfig,
  calculator: MetricCalculator,
}

impl Default for MetricsPipeline {
  fn default() -> Self {
    Self::new(PipelineConfig::default())
  }
}

impl MetricsPipeline {
  pub fn new(config: PipelineConfig) -> Self {
    let extractor = MetricExtractor::new(PeriodLocator::new(config.max_depth));
    let calculator = MetricCalculator::new(extractor);
    Self { config, calculator }
  }

  pub fn config(&self) -> &PipelineConfig {
    &self.config
  }

  /// Compute metrics for every symbol of `dataset`.
  ///
  /// Industries are resolved up front; the per-ticker work then runs in
  /// parallel and is collected back in symbol order.
  pub fn run<L>(&self, dataset: &FinancialDataset, lookup: &L) -> PipelineOutput
  where
    L: IndustryLookup + ?Sized,
  {
    let mut excluded = 0;
    let mut work = Vec::with_capacity(dataset.len());

    for (symbol, document) in dataset {
      let industry = industry_or_unknown(lookup, symbol);
      let listed = self.config.target_industries.contains(&industry);
      if !listed && !self.config.retain_unlisted {
        debug!("Skipping {} ({} is not a target industry)", symbol, industry);
        excluded += 1;
        continue;
      }
      work.push((symbol.as_str(), industry, listed, document));
    }

    let results: Vec<(bool, Result<TickerMetrics, TickerFailure>)> = work
      .par_iter()
      .map(|(symbol, industry, listed, document)| {
        if !document.is_object() {
          return (
            *listed,
            Err(TickerFailure {
              symbol: symbol.to_string(),
              reason: "symbol document is not a JSON object".to_string(),
            }),
          );
        }
        (*listed, Ok(self.calculator.compute(symbol, industry, document)))
      })
      .collect();

    let mut output = PipelineOutput { excluded, ..Default::default() };
    let mut listed_tickers = Vec::new();

    for (listed, result) in results {
      match result {
        Ok(metrics) => {
          debug!(
            "{}: pe={:?} growth={:?} ttm={:?} debt_ratio={:?}",
            metrics.symbol,
            metrics.pe_ratio,
            metrics.revenue_growth_pct,
            metrics.net_income_ttm,
            metrics.debt_ratio
          );
          if metrics.is_empty() {
            warn!("{}: no metric could be computed", metrics.symbol);
            output.without_metrics += 1;
          }
          if listed {
            listed_tickers.push(output.tickers.len());
          }
          output.tickers.push(metrics);
        }
        Err(failure) => {
          warn!("Skipping {}: {}", failure.symbol, failure.reason);
          output.failures.push(failure);
        }
      }
    }

    output.industries = aggregate_by_industry(listed_tickers.iter().map(|&i| &output.tickers[i]));

    info!(
      "Computed metrics for {} tickers in {} industries ({} excluded, {} failed, {} empty)",
      output.tickers.len(),
      output.industries.len(),
      output.excluded,
      output.failures.len(),
      output.without_metrics
    );
    output
  }
}
