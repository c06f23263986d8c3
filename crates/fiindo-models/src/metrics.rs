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

//! Derived per-ticker statistics and per-industry aggregates

use serde::{Deserialize, Serialize};

/// Metrics computed for one symbol.
///
/// Every ratio is either a finite number or `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerMetrics {
  pub symbol: String,

  /// Industry classification, `Unknown` when the lookup has none
  pub industry: String,

  /// Close of the most recent end-of-day record
  pub price: Option<f64>,

  /// Revenue of the latest quarter
  pub revenue: Option<f64>,

  /// Revenue of the quarter before the latest
  #[serde(default)]
  pub revenue_previous: Option<f64>,

  /// Net income of the latest quarter
  #[serde(default)]
  pub net_income: Option<f64>,

  /// Trailing twelve months net income
  pub net_income_ttm: Option<f64>,

  /// Denominator used for the P/E ratio
  #[serde(default)]
  pub eps: Option<f64>,

  #[serde(default)]
  pub total_debt: Option<f64>,

  #[serde(default)]
  pub total_equity: Option<f64>,

  pub pe_ratio: Option<f64>,

  /// Quarter over quarter revenue growth in percent
  #[serde(rename = "revenue_growth")]
  pub revenue_growth_pct: Option<f64>,

  /// Total debt over total equity of the latest fiscal year
  pub debt_ratio: Option<f64>,

  /// Date of the latest located quarter
  #[serde(default)]
  pub period_date: Option<String>,
}

impl TickerMetrics {
  /// Empty record, every metric absent
  pub fn new(symbol: impl Into<String>, industry: impl Into<String>) -> Self {
    Self {
      symbol: symbol.into(),
      industry: industry.into(),
      price: None,
      revenue: None,
      revenue_previous: None,
      net_income: None,
      net_income_ttm: None,
      eps: None,
      total_debt: None,
      total_equity: None,
      pe_ratio: None,
      revenue_growth_pct: None,
      debt_ratio: None,
      period_date: None,
    }
  }

  /// True when no derived metric could be computed
  pub fn is_empty(&self) -> bool {
    self.pe_ratio.is_none()
      && self.revenue_growth_pct.is_none()
      && self.debt_ratio.is_none()
      && self.net_income_ttm.is_none()
  }
}

/// Aggregate over all tickers of one industry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndustryAggregate {
  pub industry: String,

  /// Mean P/E over tickers that have one
  pub avg_pe_ratio: Option<f64>,

  /// Mean revenue growth over tickers that have one
  #[serde(rename = "avg_revenue_growth")]
  pub avg_revenue_growth_pct: Option<f64>,

  /// Sum of latest quarter revenue, `None` when no ticker reports revenue
  pub sum_revenue: Option<f64>,

  /// Tickers in the group, including those with no metrics
  pub ticker_count: usize,
}
