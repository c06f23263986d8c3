pub mod config;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{PeriodKind, StatementType};

/// The Fiindo API endpoints used by the fetch stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
  /// Full symbol listing
  Symbols,
  /// Company profile, carries the industry classification
  General,
  /// End-of-day price series
  Eod,
  /// One financial statement
  Financials(StatementType),
}

impl Endpoint {
  /// Path below the versioned API prefix for the given symbol.
  ///
  /// `Symbols` ignores the symbol argument.
  pub fn path(&self, symbol: &str) -> String {
    match self {
      Endpoint::Symbols => "symbols".to_string(),
      Endpoint::General => format!("general/{}", symbol),
      Endpoint::Eod => format!("eod/{}", symbol),
      Endpoint::Financials(statement) => format!("financials/{}/{}", symbol, statement),
    }
  }
}

impl std::fmt::Display for Endpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Endpoint::Symbols => write!(f, "symbols"),
      Endpoint::General => write!(f, "general"),
      Endpoint::Eod => write!(f, "eod"),
      Endpoint::Financials(statement) => write!(f, "{}", statement),
    }
  }
}

/// Base URL for the Fiindo API
pub const FIINDO_BASE_URL: &str = "https://api.test.fiindo.com";

/// Versioned path prefix appended to the base URL
pub const API_PREFIX: &str = "api/v1";

/// API rate limit (requests per minute)
pub const DEFAULT_RATE_LIMIT: u32 = 120;

/// Industry assigned to symbols without a classification
pub const UNKNOWN_INDUSTRY: &str = "Unknown";

/// Industries the pipeline aggregates unless configured otherwise
pub const DEFAULT_TARGET_INDUSTRIES: [&str; 3] =
  ["Banks - Diversified", "Software - Application", "Consumer Electronics"];
