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

//! Row models for the statistics tables

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use fiindo_models::{IndustryAggregate, TickerMetrics};
use serde::{Deserialize, Serialize};

use crate::schema::{industry_aggregation, ticker_statistics};

// ===== TickerStatistic =====
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = ticker_statistics)]
#[diesel(primary_key(symbol))]
pub struct TickerStatistic {
  pub symbol: String,
  pub industry: String,
  pub price: Option<f64>,
  pub revenue: Option<f64>,
  pub pe_ratio: Option<f64>,
  pub revenue_growth: Option<f64>,
  pub net_income_ttm: Option<f64>,
  pub debt_ratio: Option<f64>,
  pub updated_at: NaiveDateTime,
}

/// Upsert payload; `None` overwrites a stored value with NULL
#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = ticker_statistics)]
#[diesel(treat_none_as_null = true)]
pub struct NewTickerStatistic {
  pub symbol: String,
  pub industry: String,
  pub price: Option<f64>,
  pub revenue: Option<f64>,
  pub pe_ratio: Option<f64>,
  pub revenue_growth: Option<f64>,
  pub net_income_ttm: Option<f64>,
  pub debt_ratio: Option<f64>,
  pub updated_at: NaiveDateTime,
}

impl From<&TickerMetrics> for NewTickerStatistic {
  fn from(metrics: &TickerMetrics) -> Self {
    Self {
      symbol: metrics.symbol.clone(),
      industry: metrics.industry.clone(),
      price: metrics.price,
      revenue: metrics.revenue,
      pe_ratio: metrics.pe_ratio,
      revenue_growth: metrics.revenue_growth_pct,
      net_income_ttm: metrics.net_income_ttm,
      debt_ratio: metrics.debt_ratio,
      updated_at: Utc::now().naive_utc(),
    }
  }
}

// ===== IndustryAggregation =====
#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[diesel(table_name = industry_aggregation)]
#[diesel(primary_key(industry))]
pub struct IndustryAggregation {
  pub industry: String,
  pub avg_pe_ratio: Option<f64>,
  pub avg_revenue_growth: Option<f64>,
  pub sum_revenue: Option<f64>,
  pub ticker_count: i32,
  pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset, Debug, Clone, PartialEq)]
#[diesel(table_name = industry_aggregation)]
#[diesel(treat_none_as_null = true)]
pub struct NewIndustryAggregation {
  pub industry: String,
  pub avg_pe_ratio: Option<f64>,
  pub avg_revenue_growth: Option<f64>,
  pub sum_revenue: Option<f64>,
  pub ticker_count: i32,
  pub updated_at: NaiveDateTime,
}

impl From<&IndustryAggregate> for NewIndustryAggregation {
  fn from(aggregate: &IndustryAggregate) -> Self {
    Self {
      industry: aggregate.industry.clone(),
      avg_pe_ratio: aggregate.avg_pe_ratio,
      avg_revenue_growth: aggregate.avg_revenue_growth_pct,
      sum_revenue: aggregate.sum_revenue,
      ticker_count: i32::try_from(aggregate.ticker_count).unwrap_or(i32::MAX),
      updated_at: Utc::now().naive_utc(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn test_ticker_statistic_from_metrics() {
    let mut metrics = TickerMetrics::new("XYZ.US", "Banks - Diversified");
    metrics.price = Some(150.0);
    metrics.revenue = Some(1_200_000.0);
    metrics.pe_ratio = Some(50.0);
    metrics.revenue_growth_pct = Some(20.0);
    metrics.net_income_ttm = Some(450_000.0);

    let row = NewTickerStatistic::from(&metrics);
    assert_eq!(row.symbol, "XYZ.US");
    assert_eq!(row.industry, "Banks - Diversified");
    assert_eq!(row.revenue_growth, Some(20.0));
    assert_eq!(row.net_income_ttm, Some(450_000.0));
    assert_eq!(row.debt_ratio, None);
  }

  #[test]
  fn test_industry_aggregation_from_aggregate() {
    let aggregate = IndustryAggregate {
      industry: "Consumer Electronics".to_string(),
      avg_pe_ratio: None,
      avg_revenue_growth_pct: Some(4.5),
      sum_revenue: Some(9.0e10),
      ticker_count: 3,
    };

    let row = NewIndustryAggregation::from(&aggregate);
    assert_eq!(row.ticker_count, 3);
    assert_eq!(row.avg_pe_ratio, None);
    assert_eq!(row.avg_revenue_growth, Some(4.5));
    assert_eq!(row.sum_revenue, Some(9.0e10));
  }
}
