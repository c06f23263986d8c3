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

//! Pulling the raw inputs of the derived metrics out of a symbol document.
//!
//! Every field is extracted independently; a missing or malformed field only
//! blanks that field.

use crate::period::{PeriodLocator, ReportingPeriod};
use crate::tree::{first_list_at_path, NodeExt};
use fiindo_core::{PeriodKind, StatementType};
use serde_json::Value;

/// EPS keys in priority order
pub const EPS_KEYS: [&str; 4] =
  ["eps", "epsdiluted", "earningsPerShare", "earningsPerShareDiluted"];

/// Quarters summed when no trailing record reports net income
pub const TTM_QUARTERS: usize = 4;

/// Raw numbers read from one symbol's documents
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedInputs {
  pub price: Option<f64>,
  pub revenue: Option<f64>,
  pub revenue_previous: Option<f64>,
  pub net_income: Option<f64>,
  pub net_income_ttm: Option<f64>,
  /// EPS of the trailing record, else of the latest located income period
  pub eps_ttm: Option<f64>,
  pub eps_annual: Option<f64>,
  /// Unscaled EPS of the most recent quarter that reports one
  pub eps_quarterly: Option<f64>,
  pub annual_net_income: Option<f64>,
  pub total_debt: Option<f64>,
  pub total_equity: Option<f64>,
  pub period_date: Option<String>,
}

/// First non-zero EPS value in key priority order
pub fn eps_of(record: &Value) -> Option<f64> {
  EPS_KEYS.iter().find_map(|key| record.number(key).filter(|eps| *eps != 0.0))
}

/// Reads metric inputs using a [`PeriodLocator`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricExtractor {
  locator: PeriodLocator,
}

impl MetricExtractor {
  pub fn new(locator: PeriodLocator) -> Self {
    Self { locator }
  }

  /// Close of the last record of the first `stockprice.data` list
  pub fn price(&self, eod: Option<&Value>) -> Option<f64> {
    let prices = first_list_at_path(eod?, &["stockprice", "data"], self.locator.max_depth())?;
    prices.last()?.number("close")
  }

  /// Net income over the trailing twelve months.
  ///
  /// Uses the latest `TTM` record when it reports net income, otherwise sums
  /// the four most recent quarters that do.
  pub fn net_income_ttm(&self, income: Option<&Value>) -> Option<f64> {
    if let Some(ttm) = self
      .locator
      .latest_trailing(income, StatementType::Income)
      .and_then(|record| record.number("netIncome"))
    {
      return Some(ttm);
    }

    self
      .locator
      .by_date_desc(income, StatementType::Income, PeriodKind::Quarterly)
      .into_iter()
      .take(TTM_QUARTERS)
      .filter_map(|record| record.number("netIncome"))
      .fold(None, |sum, value| Some(sum.unwrap_or(0.0) + value))
  }

  fn eps_ttm(&self, income: Option<&Value>, latest: Option<ReportingPeriod<'_>>) -> Option<f64> {
    self
      .locator
      .latest_trailing(income, StatementType::Income)
      .and_then(eps_of)
      .or_else(|| latest.and_then(eps_of))
  }

  fn eps_quarterly(&self, income: Option<&Value>) -> Option<f64> {
    self
      .locator
      .by_date_desc(income, StatementType::Income, PeriodKind::Quarterly)
      .into_iter()
      .find_map(eps_of)
  }

  /// Extract every input from the parts of one symbol document
  pub fn extract(&self, document: &Value) -> ExtractedInputs {
    let eod = document.field("eod");
    let income = document.field(StatementType::Income.as_str());
    let balance = document.field(StatementType::BalanceSheet.as_str());

    let (latest, previous) =
      self.locator.latest_and_previous_quarter(income, StatementType::Income);
    let annual_income = self.locator.latest(income, StatementType::Income, PeriodKind::Annual);
    let annual_balance =
      self.locator.latest(balance, StatementType::BalanceSheet, PeriodKind::Annual);

    ExtractedInputs {
      price: self.price(eod),
      revenue: latest.and_then(|r| r.number("revenue")),
      revenue_previous: previous.and_then(|r| r.number("revenue")),
      net_income: latest.and_then(|r| r.number("netIncome")),
      net_income_ttm: self.net_income_ttm(income),
      eps_ttm: self.eps_ttm(income, latest),
      eps_annual: annual_income.and_then(eps_of),
      eps_quarterly: self.eps_quarterly(income),
      annual_net_income: annual_income.and_then(|r| r.number("netIncome")),
      total_debt: annual_balance.and_then(|r| r.number("totalDebt")),
      total_equity: annual_balance.and_then(|r| r.number("totalEquity")),
      period_date: latest.and_then(|r| r.text("date")).map(str::to_string),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn statement(name: &str, records: Value) -> Value {
    json!({"financials": {name: {"data": records}}})
  }

  #[test]
  fn test_eps_priority_skips_zero() {
    assert_eq!(eps_of(&json!({"eps": 0, "epsdiluted": 1.2})), Some(1.2));
    assert_eq!(eps_of(&json!({"eps": 2.0, "epsdiluted": 1.2})), Some(2.0));
    assert_eq!(eps_of(&json!({"eps": "2.0", "earningsPerShareDiluted": -0.5})), Some(-0.5));
    assert_eq!(eps_of(&json!({"eps": 0.0, "epsdiluted": 0})), None);
    assert_eq!(eps_of(&json!({})), None);
  }

  #[test]
  fn test_price_uses_last_record() {
    let extractor = MetricExtractor::default();
    let eod = json!({"stockprice": {"data": [{"close": 140.0}, {"close": 150.0}]}});
    assert_eq!(extractor.price(Some(&eod)), Some(150.0));

    let empty = json!({"stockprice": {"data": []}});
    assert_eq!(extractor.price(Some(&empty)), None);

    let text = json!({"stockprice": {"data": [{"close": "150.0"}]}});
    assert_eq!(extractor.price(Some(&text)), None);
    assert_eq!(extractor.price(None), None);
  }

  #[test]
  fn test_price_found_at_depth() {
    let eod = json!({"fundamentals": {"eod": {"stockprice": {"data": [{"close": 12.5}]}}}});
    assert_eq!(MetricExtractor::default().price(Some(&eod)), Some(12.5));
  }

  #[test]
  fn test_net_income_ttm_prefers_trailing_record() {
    let income = statement(
      "income_statement",
      json!([
        {"date": "2025-06-30", "period": "TTM", "netIncome": 900},
        {"date": "2025-06-30", "period": "Q2", "netIncome": 250},
      ]),
    );
    assert_eq!(MetricExtractor::default().net_income_ttm(Some(&income)), Some(900.0));
  }

  #[test]
  fn test_net_income_ttm_sums_four_latest_quarters() {
    let income = statement(
      "income_statement",
      json!([
        {"date": "2024-06-30", "period": "Q2", "netIncome": 1000},
        {"date": "2025-06-30", "period": "Q2", "netIncome": 4},
        {"date": "2025-03-31", "period": "Q1", "netIncome": 3},
        {"date": "2024-12-31", "period": "Q4"},
        {"date": "2024-09-30", "period": "Q3", "netIncome": 1},
      ]),
    );
    // the oldest quarter falls outside the window even though one inside lacks the field
    assert_eq!(MetricExtractor::default().net_income_ttm(Some(&income)), Some(8.0));
  }

  #[test]
  fn test_net_income_ttm_none_without_data() {
    let income = statement("income_statement", json!([{"date": "2025-06-30", "period": "Q2"}]));
    assert_eq!(MetricExtractor::default().net_income_ttm(Some(&income)), None);
    assert_eq!(MetricExtractor::default().net_income_ttm(None), None);
  }

  #[test]
  fn test_extract_reads_each_statement() {
    let doc = json!({
      "eod": {"stockprice": {"data": [{"close": 150.0}]}},
      "income_statement": statement("income_statement", json!([
        {"date": "2025-06-30", "period": "Q2", "revenue": 1_200_000, "netIncome": 250_000, "eps": 3.0},
        {"date": "2025-03-31", "period": "Q1", "revenue": 1_000_000, "netIncome": 200_000, "eps": 2.5},
      ])),
      "balance_sheet_statement": statement("balance_sheet_statement", json!([
        {"date": "2024-12-31", "period": "FY", "totalDebt": 5_000_000, "totalEquity": 10_000_000},
        {"date": "2023-12-31", "period": "FY", "totalDebt": 1, "totalEquity": 1},
      ])),
    });

    let inputs = MetricExtractor::default().extract(&doc);
    assert_eq!(inputs.price, Some(150.0));
    assert_eq!(inputs.revenue, Some(1_200_000.0));
    assert_eq!(inputs.revenue_previous, Some(1_000_000.0));
    assert_eq!(inputs.net_income, Some(250_000.0));
    assert_eq!(inputs.net_income_ttm, Some(450_000.0));
    assert_eq!(inputs.eps_ttm, Some(3.0));
    assert_eq!(inputs.eps_annual, None);
    assert_eq!(inputs.eps_quarterly, Some(3.0));
    assert_eq!(inputs.total_debt, Some(5_000_000.0));
    assert_eq!(inputs.total_equity, Some(10_000_000.0));
    assert_eq!(inputs.period_date.as_deref(), Some("2025-06-30"));
  }

  #[test]
  fn test_extract_from_empty_document() {
    assert_eq!(MetricExtractor::default().extract(&json!({})), ExtractedInputs::default());
  }
}
