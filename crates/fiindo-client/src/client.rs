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

use crate::endpoints::{
  eod::EodEndpoints, financials::FinancialsEndpoints, general::GeneralEndpoints,
  symbols::SymbolEndpoints, SharedRateLimiter,
};

use crate::transport::Transport;
use fiindo_core::{Config, Result};
use governor::{Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Main Fiindo API client
///
/// Provides access to the Fiindo endpoints through organized endpoint modules.
/// Handles authentication, rate limiting, and transport concerns automatically.
/// Cloning is cheap and clones share one rate limiter.
///
/// # Examples
///
/// ```ignore
/// use fiindo_client::FiindoClient;
/// use fiindo_core::Config;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = FiindoClient::new(Config::from_env()?)?;
///
///     let symbols = client.symbols().list().await?;
///     let income = client.financials().income_statement(&symbols[0]).await?;
///     println!("{}", income);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct FiindoClient {
  rate_limiter: SharedRateLimiter,
  transport: Arc<Transport>,
  rate_limit: u32,
}

impl FiindoClient {
  /// Create a new Fiindo API client
  ///
  /// # Errors
  ///
  /// Returns an error if the HTTP client cannot be created.
  pub fn new(config: Config) -> Result<Self> {
    let rate_limit = NonZeroU32::new(config.rate_limit)
      .or_else(|| NonZeroU32::new(fiindo_core::DEFAULT_RATE_LIMIT))
      .unwrap_or(NonZeroU32::MIN);
    let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_minute(rate_limit)));

    let transport = Arc::new(Transport::new(&config)?);

    Ok(Self { transport, rate_limiter, rate_limit: rate_limit.get() })
  }

  /// Create a new client with custom rate limiting
  pub fn with_rate_limiter(config: Config, rate_limiter: SharedRateLimiter) -> Result<Self> {
    let rate_limit = config.rate_limit;
    Ok(Self { transport: Arc::new(Transport::new(&config)?), rate_limiter, rate_limit })
  }

  /// Shorten the retry backoff (tests and local mocks)
  pub fn with_retry_delay(config: Config, delay: Duration) -> Result<Self> {
    let mut client = Self::new(config.clone())?;
    client.transport = Arc::new(Transport::new(&config)?.with_retry_delay(delay));
    Ok(client)
  }

  /// Symbol listing
  pub fn symbols(&self) -> SymbolEndpoints {
    SymbolEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Company profiles and industry classification
  pub fn general(&self) -> GeneralEndpoints {
    GeneralEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// End-of-day prices
  pub fn eod(&self) -> EodEndpoints {
    EodEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Income, balance sheet and cash flow statements
  pub fn financials(&self) -> FinancialsEndpoints {
    FinancialsEndpoints::new(self.transport.clone(), self.rate_limiter.clone())
  }

  /// Configured requests per minute
  pub fn rate_limit(&self) -> u32 {
    self.rate_limit
  }

  /// Wait for rate limit to allow next request
  ///
  /// Most users won't need to call this directly as endpoints handle it automatically.
  pub async fn wait_for_rate_limit(&self) -> Result<()> {
    self.rate_limiter.until_ready().await;
    Ok(())
  }
}

impl std::fmt::Debug for FiindoClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("FiindoClient")
      .field("transport", &self.transport)
      .field("rate_limiter", &"RateLimiter")
      .field("rate_limit", &self.rate_limit)
      .finish()
  }
}
