//! Financial statement and reporting period kinds

use serde::{Deserialize, Serialize};

/// Statement types served by the financials endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementType {
  /// Income statement (revenue, net income, EPS)
  Income,
  /// Balance sheet (debt, equity)
  BalanceSheet,
  /// Cash flow statement, fetched but not used by the metrics
  CashFlow,
}

impl StatementType {
  /// All statement types in fetch order
  pub const ALL: [StatementType; 3] =
    [StatementType::Income, StatementType::BalanceSheet, StatementType::CashFlow];

  /// Key used both in the endpoint path and inside `financials.<key>.data`
  pub fn as_str(&self) -> &'static str {
    match self {
      StatementType::Income => "income_statement",
      StatementType::BalanceSheet => "balance_sheet_statement",
      StatementType::CashFlow => "cash_flow_statement",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "income_statement" => Some(StatementType::Income),
      "balance_sheet_statement" => Some(StatementType::BalanceSheet),
      "cash_flow_statement" => Some(StatementType::CashFlow),
      _ => None,
    }
  }
}

impl std::fmt::Display for StatementType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Reporting period granularity used when locating periods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodKind {
  Quarterly,
  Annual,
}

impl std::fmt::Display for PeriodKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      PeriodKind::Quarterly => write!(f, "quarterly"),
      PeriodKind::Annual => write!(f, "annual"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_statement_round_trip_names() {
    for statement in StatementType::ALL {
      assert_eq!(StatementType::from_str(statement.as_str()), Some(statement));
    }
    assert_eq!(StatementType::from_str("profile"), None);
  }

  #[test]
  fn test_period_kind_display() {
    assert_eq!(PeriodKind::Quarterly.to_string(), "quarterly");
    assert_eq!(PeriodKind::Annual.to_string(), "annual");
  }
}
