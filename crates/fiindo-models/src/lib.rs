//! # fiindo-models
//!
//! Data models for Fiindo API responses and the statistics derived from them.
//!
//! Raw statement documents are kept as `serde_json::Value` because the vendor
//! shape varies between symbols. Everything computed from them is strongly typed.
//!
//! ## Usage
//!
//! ```ignore
//! use fiindo_models::{FinancialDataset, TickerMetrics};
//!
//! let dataset: FinancialDataset = serde_json::from_str(&raw_json)?;
//! let stats: Vec<TickerMetrics> = serde_json::from_str(&stats_json)?;
//! ```

#![warn(clippy::all)]

pub mod documents;
pub mod general;
pub mod metrics;

pub use documents::*;
pub use general::*;
pub use metrics::*;
