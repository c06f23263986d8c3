//! # fiindo-client
//!
//! A pure Fiindo API client for Rust with no database dependencies.
//!
//! ## Features
//!
//! - **Async/Await**: Built on tokio
//! - **Rate Limiting**: Built-in per-minute quota shared by all endpoints
//! - **Retries**: Exponential backoff on transport errors, `429` and `5xx`
//! - **Configurable**: Environment-based configuration via fiindo-core
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fiindo_client::FiindoClient;
//! use fiindo_core::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FiindoClient::new(Config::from_env()?)?;
//!
//!     let industry = client.general().industry("AAPL.US").await?;
//!     println!("AAPL.US industry: {:?}", industry);
//!
//!     let eod = client.eod().eod("AAPL.US").await?;
//!     println!("Latest prices: {}", eod["stockprice"]["data"]);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, fiindo_core::Error>`. A missing resource is
//! `Error::NotFound`, a rejected token is `Error::ApiToken`.

#![warn(clippy::all)]

pub mod client;
pub mod endpoints;
pub mod transport;

// Re-export the main client and common types
pub use client::FiindoClient;
pub use fiindo_core::{Config, Error, Result};

// Re-export endpoint modules for direct access if needed
pub use endpoints::{
  eod::EodEndpoints, financials::FinancialsEndpoints, general::GeneralEndpoints,
  symbols::SymbolEndpoints,
};
