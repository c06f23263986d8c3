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

//! Raw per-symbol documents as collected from the Fiindo API

use chrono::NaiveDateTime;
use fiindo_core::StatementType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Collected documents keyed by symbol.
///
/// Values are kept untyped so a malformed entry can be reported per symbol
/// instead of failing the whole file.
pub type FinancialDataset = BTreeMap<String, Value>;

/// Everything fetched for one symbol. Each part is optional since any
/// endpoint may fail independently.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolDocument {
  /// End-of-day price document
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub eod: Option<Value>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub income_statement: Option<Value>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub balance_sheet_statement: Option<Value>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cash_flow_statement: Option<Value>,
}

impl SymbolDocument {
  pub fn statement(&self, statement: StatementType) -> Option<&Value> {
    match statement {
      StatementType::Income => self.income_statement.as_ref(),
      StatementType::BalanceSheet => self.balance_sheet_statement.as_ref(),
      StatementType::CashFlow => self.cash_flow_statement.as_ref(),
    }
  }

  pub fn set_statement(&mut self, statement: StatementType, document: Value) {
    match statement {
      StatementType::Income => self.income_statement = Some(document),
      StatementType::BalanceSheet => self.balance_sheet_statement = Some(document),
      StatementType::CashFlow => self.cash_flow_statement = Some(document),
    }
  }

  /// Number of endpoints that returned a document
  pub fn endpoint_count(&self) -> usize {
    [
      &self.eod,
      &self.income_statement,
      &self.balance_sheet_statement,
      &self.cash_flow_statement,
    ]
    .iter()
    .filter(|part| part.is_some())
    .count()
  }

  /// Names of the parts present, in fetch order
  pub fn parts(&self) -> Vec<&'static str> {
    let mut parts = Vec::new();
    if self.eod.is_some() {
      parts.push("eod");
    }
    for statement in StatementType::ALL {
      if self.statement(statement).is_some() {
        parts.push(statement.as_str());
      }
    }
    parts
  }

  pub fn into_value(self) -> Value {
    // A struct of Option<Value> fields always serializes
    serde_json::to_value(self).unwrap_or(Value::Null)
  }
}

/// Summary written next to each dataset file by the fetch stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
  pub total_symbols_from_api: usize,
  pub filtered_symbols: usize,
  pub collected_symbols: usize,
  pub collection_date: NaiveDateTime,
  pub known_symbols_count: usize,
  /// Collected symbols per target industry
  pub symbols_by_industry: BTreeMap<String, usize>,
  pub data_file: String,
}
