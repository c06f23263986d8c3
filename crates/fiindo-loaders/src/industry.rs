//! Symbol to industry resolution

use fiindo_core::UNKNOWN_INDUSTRY;
use std::collections::{BTreeMap, HashMap};

/// Source of industry classifications
#[cfg_attr(test, mockall::automock)]
pub trait IndustryLookup {
  /// Industry of `symbol`, `None` when unclassified
  fn industry(&self, symbol: &str) -> Option<String>;
}

/// Industry of `symbol`, falling back to `Unknown`
pub fn industry_or_unknown<L: IndustryLookup + ?Sized>(lookup: &L, symbol: &str) -> String {
  lookup.industry(symbol).unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string())
}

impl IndustryLookup for BTreeMap<String, String> {
  fn industry(&self, symbol: &str) -> Option<String> {
    self.get(symbol).cloned()
  }
}

impl IndustryLookup for HashMap<String, String> {
  fn industry(&self, symbol: &str) -> Option<String> {
    self.get(symbol).cloned()
  }
}

/// Allow-list of industries kept for aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryFilter {
  targets: Vec<String>,
}

impl Default for IndustryFilter {
  fn default() -> Self {
    Self::new(fiindo_core::DEFAULT_TARGET_INDUSTRIES.iter().map(|s| s.to_string()))
  }
}

impl IndustryFilter {
  pub fn new<I, S>(targets: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self { targets: targets.into_iter().map(Into::into).collect() }
  }

  /// Parse a comma separated list, ignoring blank entries
  pub fn parse(list: &str) -> Self {
    Self::new(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
  }

  pub fn contains(&self, industry: &str) -> bool {
    self.targets.iter().any(|target| target == industry)
  }

  pub fn targets(&self) -> &[String] {
    &self.targets
  }
}
