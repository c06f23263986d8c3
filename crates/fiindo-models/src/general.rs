//! Envelopes for the listing and profile endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Response of `GET /symbols`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolsResponse {
  #[serde(default)]
  pub symbols: Vec<String>,
}

/// Industry from a `GET /general/{symbol}` document.
///
/// Reads `fundamentals.profile.data[0].industry`. Any other shape, or a blank
/// value, yields `None`.
pub fn industry_from_general(document: &Value) -> Option<String> {
  document
    .pointer("/fundamentals/profile/data/0/industry")
    .and_then(Value::as_str)
    .map(str::trim)
    .filter(|industry| !industry.is_empty())
    .map(str::to_string)
}
