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

//! Derived per-ticker ratios

use crate::extract::{ExtractedInputs, MetricExtractor};
use fiindo_models::TickerMetrics;
use serde_json::Value;

fn finite(value: f64) -> Option<f64> {
  value.is_finite().then_some(value)
}

fn usable(value: Option<f64>) -> Option<f64> {
  value.filter(|v| v.is_finite() && *v != 0.0)
}

/// Quarters per year, scales a single quarter's EPS
const QUARTERS_PER_YEAR: f64 = 4.0;

/// P/E denominators in priority order
pub fn pe_denominators(inputs: &ExtractedInputs) -> [Option<f64>; 5] {
  [
    inputs.eps_ttm,
    inputs.eps_annual,
    inputs.eps_quarterly.map(|eps| eps * QUARTERS_PER_YEAR),
    inputs.annual_net_income,
    inputs.net_income_ttm,
  ]
}

/// First non-zero finite denominator
pub fn select_denominator(candidates: &[Option<f64>]) -> Option<f64> {
  candidates.iter().find_map(|candidate| usable(*candidate))
}

pub fn pe_ratio(price: Option<f64>, denominator: Option<f64>) -> Option<f64> {
  finite(price? / usable(denominator)?)
}

/// Percent change from `previous` to `latest`
pub fn revenue_growth_pct(latest: Option<f64>, previous: Option<f64>) -> Option<f64> {
  let previous = usable(previous)?;
  finite((latest? - previous) / previous * 100.0)
}

pub fn debt_ratio(total_debt: Option<f64>, total_equity: Option<f64>) -> Option<f64> {
  finite(total_debt? / usable(total_equity)?)
}

/// Computes [`TickerMetrics`] for one symbol document
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricCalculator {
  extractor: MetricExtractor,
}

impl MetricCalculator {
  pub fn new(extractor: MetricExtractor) -> Self {
    Self { extractor }
  }

  pub fn compute(&self, symbol: &str, industry: &str, document: &Value) -> TickerMetrics {
    let inputs = self.extractor.extract(document);
    let eps = select_denominator(&pe_denominators(&inputs));

    TickerMetrics {
      pe_ratio: pe_ratio(inputs.price, eps),
      revenue_growth_pct: revenue_growth_pct(inputs.revenue, inputs.revenue_previous),
      debt_ratio: debt_ratio(inputs.total_debt, inputs.total_equity),
      price: inputs.price,
      revenue: inputs.revenue,
      revenue_previous: inputs.revenue_previous,
      net_income: inputs.net_income,
      net_income_ttm: inputs.net_income_ttm,
      eps,
      total_debt: inputs.total_debt,
      total_equity: inputs.total_equity,
      period_date: inputs.period_date,
      ..TickerMetrics::new(symbol, industry)
    }
  }
}
