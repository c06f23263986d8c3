//! Configuration management for the Fiindo client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;

/// Upper bound accepted for `FIINDO_MAX_RETRIES`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Main configuration struct for the Fiindo client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// Bearer token sent with every request
  pub api_token: String,

  /// API rate limit (requests per minute)
  pub rate_limit: u32,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Maximum retries for failed requests
  pub max_retries: u32,

  /// Base URL for the Fiindo API
  pub base_url: String,
}

impl Config {
  /// Load configuration from environment variables
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_token = env::var("FIINDO_API_TOKEN")
      .map_err(|_| Error::ApiToken("FIINDO_API_TOKEN not set".to_string()))?;
    if api_token.trim().is_empty() {
      return Err(Error::ApiToken("FIINDO_API_TOKEN is empty".to_string()));
    }

    let rate_limit = env::var("FIINDO_RATE_LIMIT")
      .unwrap_or_else(|_| crate::DEFAULT_RATE_LIMIT.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid FIINDO_RATE_LIMIT".to_string()))?;
    if rate_limit == 0 {
      return Err(Error::Config("FIINDO_RATE_LIMIT must be positive".to_string()));
    }

    let timeout_secs = env::var("FIINDO_TIMEOUT_SECS")
      .unwrap_or_else(|_| "30".to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid FIINDO_TIMEOUT_SECS".to_string()))?;

    let max_retries = env::var("FIINDO_MAX_RETRIES")
      .unwrap_or_else(|_| "3".to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid FIINDO_MAX_RETRIES".to_string()))?;
    if max_retries > MAX_RETRIES_LIMIT {
      return Err(Error::Config(format!(
        "FIINDO_MAX_RETRIES must be at most {}",
        MAX_RETRIES_LIMIT
      )));
    }

    let base_url =
      env::var("FIINDO_BASE_URL").unwrap_or_else(|_| crate::FIINDO_BASE_URL.to_string());
    url::Url::parse(&base_url)?;

    Ok(Config { api_token, rate_limit, timeout_secs, max_retries, base_url })
  }

  /// Create a config with default values (for testing)
  pub fn default_with_token(api_token: String) -> Self {
    Config {
      api_token,
      rate_limit: crate::DEFAULT_RATE_LIMIT,
      timeout_secs: 30,
      max_retries: 3,
      base_url: crate::FIINDO_BASE_URL.to_string(),
    }
  }
}
