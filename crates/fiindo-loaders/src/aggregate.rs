//! Per-industry aggregation of ticker metrics

use fiindo_models::{IndustryAggregate, TickerMetrics};
use std::collections::BTreeMap;

fn mean(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    return None;
  }
  Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[derive(Default)]
struct Accumulator {
  pe_ratios: Vec<f64>,
  revenue_growths: Vec<f64>,
  revenues: Vec<f64>,
  ticker_count: usize,
}

/// Group tickers by industry, in industry-name order.
///
/// Means and the revenue sum skip tickers without the value; `ticker_count`
/// counts every ticker of the group.
pub fn aggregate_by_industry<'a, I>(tickers: I) -> Vec<IndustryAggregate>
where
  I: IntoIterator<Item = &'a TickerMetrics>,
{
  let mut groups: BTreeMap<&str, Accumulator> = BTreeMap::new();

  for ticker in tickers {
    let group = groups.entry(ticker.industry.as_str()).or_default();
    group.ticker_count += 1;
    group.pe_ratios.extend(ticker.pe_ratio);
    group.revenue_growths.extend(ticker.revenue_growth_pct);
    group.revenues.extend(ticker.revenue);
  }

  groups
    .into_iter()
    .map(|(industry, group)| IndustryAggregate {
      industry: industry.to_string(),
      avg_pe_ratio: mean(&group.pe_ratios),
      avg_revenue_growth_pct: mean(&group.revenue_growths),
      sum_revenue: (!group.revenues.is_empty()).then(|| group.revenues.iter().sum()),
      ticker_count: group.ticker_count,
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use fiindo_core::test_utils::assert_metric_eq;

  fn ticker(
    symbol: &str,
    industry: &str,
    pe: Option<f64>,
    growth: Option<f64>,
    revenue: Option<f64>,
  ) -> TickerMetrics {
    TickerMetrics {
      pe_ratio: pe,
      revenue_growth_pct: growth,
      revenue,
      ..TickerMetrics::new(symbol, industry)
    }
  }

  #[test]
  fn test_groups_in_name_order() {
    let tickers = vec![
      ticker("MSFT.US", "Software - Application", Some(30.0), Some(5.0), Some(100.0)),
      ticker("JPM.US", "Banks - Diversified", Some(10.0), None, Some(50.0)),
      ticker("CRM.US", "Software - Application", Some(50.0), Some(15.0), None),
    ];

    let aggregates = aggregate_by_industry(&tickers);
    assert_eq!(aggregates.len(), 2);
    assert_eq!(aggregates[0].industry, "Banks - Diversified");
    assert_eq!(aggregates[1].industry, "Software - Application");

    let software = &aggregates[1];
    assert_metric_eq(software.avg_pe_ratio, 40.0);
    assert_metric_eq(software.avg_revenue_growth_pct, 10.0);
    assert_metric_eq(software.sum_revenue, 100.0);
    assert_eq!(software.ticker_count, 2);

    assert_eq!(aggregates[0].avg_revenue_growth_pct, None);
  }

  #[test]
  fn test_ticker_count_includes_empty_tickers() {
    let tickers = vec![
      ticker("A.US", "Consumer Electronics", None, None, None),
      ticker("B.US", "Consumer Electronics", None, None, None),
      ticker("C.US", "Consumer Electronics", None, None, None),
    ];
    let aggregates = aggregate_by_industry(&tickers);
    assert_eq!(aggregates[0].ticker_count, 3);
    assert_eq!(aggregates[0].avg_pe_ratio, None);
    assert_eq!(aggregates[0].sum_revenue, None);
  }

  #[test]
  fn test_empty_input() {
    assert!(aggregate_by_industry(&Vec::<TickerMetrics>::new()).is_empty());
  }
}
