use thiserror::Error;

/// The main error type for fiindo-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// Missing or rejected API token
  #[error("Failed to retrieve API token: {0}")]
  ApiToken(String),

  /// Serialization/Deserialization error
  #[error("Serialization error")]
  Serde(#[from] serde_json::Error),

  /// Base URL could not be joined with an endpoint path
  #[error("Invalid URL: {0}")]
  Url(#[from] url::ParseError),

  /// Missing required field in response
  #[error("Missing required field: {0}")]
  MissingField(String),

  /// API rate limit exceeded
  #[error("Rate limit exceeded: {0}")]
  RateLimit(String),

  /// Invalid response from API
  #[error("Invalid API response: {0}")]
  InvalidResponse(String),

  /// Resource does not exist for the requested symbol
  #[error("Not found: {0}")]
  NotFound(String),

  /// General unexpected error
  #[error("Unexpected error: {0}")]
  Unexpected(String),

  /// HTTP transport error
  #[error("HTTP error: {0}")]
  Http(String),

  /// API error from Fiindo
  #[error("API error: {0}")]
  Api(String),

  /// Parse error for data processing
  #[error("Parse error: {0}")]
  Parse(String),
}

impl Error {
  /// Errors worth another attempt after a backoff
  pub fn is_retryable(&self) -> bool {
    matches!(self, Error::Http(_) | Error::RateLimit(_))
  }
}

/// Result type alias for fiindo-* crates
pub type Result<T> = std::result::Result<T, Error>;
