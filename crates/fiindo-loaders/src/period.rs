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

//! Locating reporting periods inside statement documents.
//!
//! A statement document holds one or more `financials.<statement>.data` lists
//! somewhere in its tree. Every map in those lists is a period record with a
//! `date`, an optional `period` label and numeric fields.

use crate::tree::{lists_at_path, NodeExt, DEFAULT_MAX_DEPTH};
use fiindo_core::{PeriodKind, StatementType};
use serde_json::Value;

/// Borrowed view of one period record
pub type ReportingPeriod<'a> = &'a Value;

fn label(record: &Value) -> String {
  record.text("period").unwrap_or_default().to_lowercase()
}

/// Date used for ordering; a missing date orders as the empty string
pub fn period_date(record: &Value) -> &str {
  record.text("date").unwrap_or_default()
}

/// `TTM` labelled records are only read by trailing lookups
pub fn is_trailing(record: &Value) -> bool {
  label(record).contains("ttm")
}

pub fn is_quarter(record: &Value) -> bool {
  if is_trailing(record) {
    return false;
  }
  let label = label(record);
  label.contains("quarter")
    || label.contains('q')
    || label.contains("qtr")
    || record.text("date").is_some_and(|date| date.chars().count() >= 7)
}

pub fn is_annual(record: &Value) -> bool {
  if is_trailing(record) {
    return false;
  }
  let label = label(record);
  if label.contains("annual") || label.contains("year") || label.contains("fy") {
    return true;
  }
  record.text("date").is_some_and(|date| date.contains("-12-") || date.chars().count() == 4)
}

fn matches_kind(record: &Value, kind: PeriodKind) -> bool {
  match kind {
    PeriodKind::Quarterly => is_quarter(record),
    PeriodKind::Annual => is_annual(record),
  }
}

/// Greatest date, first encountered on ties
fn latest_of<'a, I>(records: I) -> Option<ReportingPeriod<'a>>
where
  I: IntoIterator<Item = ReportingPeriod<'a>>,
{
  records.into_iter().fold(None, |best, record| match best {
    Some(current) if period_date(record) <= period_date(current) => Some(current),
    _ => Some(record),
  })
}

/// Finds latest and previous periods in a statement document
#[derive(Debug, Clone, Copy)]
pub struct PeriodLocator {
  max_depth: usize,
}

impl Default for PeriodLocator {
  fn default() -> Self {
    Self { max_depth: DEFAULT_MAX_DEPTH }
  }
}

impl PeriodLocator {
  pub fn new(max_depth: usize) -> Self {
    Self { max_depth }
  }

  pub fn max_depth(&self) -> usize {
    self.max_depth
  }

  /// All period records of a statement, in traversal order
  pub fn records<'a>(
    &self,
    document: Option<&'a Value>,
    statement: StatementType,
  ) -> Vec<ReportingPeriod<'a>> {
    let Some(document) = document else {
      return Vec::new();
    };
    lists_at_path(document, &["financials", statement.as_str(), "data"], self.max_depth)
      .into_iter()
      .flatten()
      .filter(|record| record.is_object())
      .collect()
  }

  /// Records of one kind, in traversal order
  pub fn candidates<'a>(
    &self,
    document: Option<&'a Value>,
    statement: StatementType,
    kind: PeriodKind,
  ) -> Vec<ReportingPeriod<'a>> {
    self.records(document, statement).into_iter().filter(|r| matches_kind(r, kind)).collect()
  }

  /// Records of one kind, most recent first. Equal dates keep traversal order.
  pub fn by_date_desc<'a>(
    &self,
    document: Option<&'a Value>,
    statement: StatementType,
    kind: PeriodKind,
  ) -> Vec<ReportingPeriod<'a>> {
    let mut records = self.candidates(document, statement, kind);
    records.sort_by(|a, b| period_date(b).cmp(period_date(a)));
    records
  }

  /// Most recent period of the given kind
  pub fn latest<'a>(
    &self,
    document: Option<&'a Value>,
    statement: StatementType,
    kind: PeriodKind,
  ) -> Option<ReportingPeriod<'a>> {
    latest_of(self.candidates(document, statement, kind))
  }

  /// Most recent quarter and the one before it.
  ///
  /// The previous quarter is the greatest date strictly below the latest date.
  pub fn latest_and_previous_quarter<'a>(
    &self,
    document: Option<&'a Value>,
    statement: StatementType,
  ) -> (Option<ReportingPeriod<'a>>, Option<ReportingPeriod<'a>>) {
    let quarters = self.candidates(document, statement, PeriodKind::Quarterly);
    let Some(latest) = latest_of(quarters.iter().copied()) else {
      return (None, None);
    };
    let latest_date = period_date(latest);
    let previous = latest_of(quarters.into_iter().filter(|r| period_date(r) < latest_date));
    (Some(latest), previous)
  }

  /// Most recent `TTM` labelled record
  pub fn latest_trailing<'a>(
    &self,
    document: Option<&'a Value>,
    statement: StatementType,
  ) -> Option<ReportingPeriod<'a>> {
    latest_of(self.records(document, statement).into_iter().filter(|r| is_trailing(r)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn income(records: Value) -> Value {
    json!({"fundamentals": {"financials": {"income_statement": {"data": records}}}})
  }

  #[test]
  fn test_classification() {
    assert!(is_quarter(&json!({"period": "Q3"})));
    assert!(is_quarter(&json!({"period": "quarter"})));
    assert!(is_quarter(&json!({"date": "2025-03"})));
    assert!(!is_quarter(&json!({"date": "2025", "period": "FY"})));

    assert!(is_annual(&json!({"period": "FY"})));
    assert!(is_annual(&json!({"period": "Annual"})));
    assert!(is_annual(&json!({"date": "2024"})));
    assert!(is_annual(&json!({"date": "2024-12-31"})));
    assert!(!is_annual(&json!({"date": "2024-09-30", "period": "Q3"})));

    // a December quarter satisfies both
    let q4 = json!({"date": "2024-12-31", "period": "Q4"});
    assert!(is_quarter(&q4) && is_annual(&q4));
  }

  #[test]
  fn test_trailing_records_are_excluded() {
    let ttm = json!({"date": "2025-06-30", "period": "TTM"});
    assert!(is_trailing(&ttm));
    assert!(!is_quarter(&ttm));
    assert!(!is_annual(&ttm));
  }

  #[test]
  fn test_empty_and_missing_documents() {
    let locator = PeriodLocator::default();
    assert_eq!(locator.latest_and_previous_quarter(None, StatementType::Income), (None, None));

    let doc = income(json!([]));
    let located = locator.latest_and_previous_quarter(Some(&doc), StatementType::Income);
    assert_eq!(located, (None, None));

    let doc = json!({"financials": {"income_statement": {"data": {"not": "a list"}}}});
    assert!(locator.latest(Some(&doc), StatementType::Income, PeriodKind::Annual).is_none());

    // wrong statement type
    let doc = income(json!([{"date": "2025-06-30", "period": "Q2"}]));
    let latest = locator.latest(Some(&doc), StatementType::BalanceSheet, PeriodKind::Quarterly);
    assert!(latest.is_none());
  }

  #[test]
  fn test_latest_and_previous_use_dates_not_positions() {
    let doc = income(json!([
      {"date": "2024-09-30", "period": "Q3", "revenue": 3},
      {"date": "2025-03-31", "period": "Q1", "revenue": 1},
      {"date": "2024-12-31", "period": "Q4", "revenue": 4},
    ]));
    let locator = PeriodLocator::default();
    let (latest, previous) = locator.latest_and_previous_quarter(Some(&doc), StatementType::Income);
    assert_eq!(latest.and_then(|r| r.number("revenue")), Some(1.0));
    assert_eq!(previous.and_then(|r| r.number("revenue")), Some(4.0));
  }

  #[test]
  fn test_ties_keep_first_encountered() {
    let doc = income(json!([
      {"date": "2025-06-30", "period": "Q2", "revenue": 10},
      {"date": "2025-06-30", "period": "Q2", "revenue": 20},
      {"date": "2025-03-31", "period": "Q1", "revenue": 5},
    ]));
    let locator = PeriodLocator::default();
    let (latest, previous) = locator.latest_and_previous_quarter(Some(&doc), StatementType::Income);
    assert_eq!(latest.and_then(|r| r.number("revenue")), Some(10.0));
    assert_eq!(previous.and_then(|r| r.number("revenue")), Some(5.0));

    let sorted = locator.by_date_desc(Some(&doc), StatementType::Income, PeriodKind::Quarterly);
    let revenues: Vec<_> = sorted.iter().filter_map(|r| r.number("revenue")).collect();
    assert_eq!(revenues, vec![10.0, 20.0, 5.0]);
  }

  #[test]
  fn test_single_quarter_has_no_previous() {
    let doc = income(json!([{"date": "2025-06-30", "period": "Q2"}]));
    let (latest, previous) =
      PeriodLocator::default().latest_and_previous_quarter(Some(&doc), StatementType::Income);
    assert!(latest.is_some());
    assert!(previous.is_none());
  }

  #[test]
  fn test_candidates_from_several_lists() {
    let doc = json!({
      "a": {"financials": {"income_statement": {"data": [{"date": "2024-06-30", "period": "Q2"}]}}},
      "b": [{"financials": {"income_statement": {"data": [{"date": "2025-06-30", "period": "Q2"}, 7]}}}]
    });
    let locator = PeriodLocator::default();
    let candidates = locator.candidates(Some(&doc), StatementType::Income, PeriodKind::Quarterly);
    assert_eq!(candidates.len(), 2);
    let latest = locator.latest(Some(&doc), StatementType::Income, PeriodKind::Quarterly);
    assert_eq!(latest.map(period_date), Some("2025-06-30"));
  }

  #[test]
  fn test_latest_trailing() {
    let doc = income(json!([
      {"date": "2025-03-31", "period": "TTM", "netIncome": 1},
      {"date": "2025-06-30", "period": "ttm", "netIncome": 2},
      {"date": "2025-09-30", "period": "Q3", "netIncome": 3},
    ]));
    let ttm = PeriodLocator::default().latest_trailing(Some(&doc), StatementType::Income);
    assert_eq!(ttm.and_then(|r| r.number("netIncome")), Some(2.0));
  }

  #[test]
  fn test_missing_date_orders_first() {
    let doc = income(json!([
      {"period": "Q1", "revenue": 1},
      {"date": "2025-03-31", "period": "Q1", "revenue": 2},
    ]));
    let (latest, previous) =
      PeriodLocator::default().latest_and_previous_quarter(Some(&doc), StatementType::Income);
    assert_eq!(latest.and_then(|r| r.number("revenue")), Some(2.0));
    assert_eq!(previous.and_then(|r| r.number("revenue")), Some(1.0));
  }
}
