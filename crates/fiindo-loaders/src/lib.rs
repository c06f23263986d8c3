//! # fiindo-loaders
//!
//! Fetch loaders and the metrics engine for Fiindo financial data.
//!
//! - Symbol discovery with a file-backed industry cache
//! - Per-symbol collection of end-of-day prices and financial statements
//! - Period location, metric extraction and per-ticker ratios
//! - Industry aggregation over a whole dataset
//! - Timestamped JSON artifacts shared by the pipeline stages

pub mod aggregate;
pub mod artifacts;
pub mod batch_processor;
pub mod calculator;
pub mod error;
pub mod extract;
pub mod financials_loader;
pub mod industry;
pub mod known_symbols;
pub mod loader;
pub mod period;
pub mod pipeline;
pub mod process_tracker;
pub mod symbol_loader;
pub mod tree;

// Re-export commonly used types
pub use batch_processor::{BatchConfig, BatchProcessor, BatchResult};
pub use error::{LoaderError, LoaderResult};
pub use loader::{DataLoader, LoaderConfig, LoaderContext};
pub use process_tracker::{ProcessState, ProcessTracker};

pub use aggregate::aggregate_by_industry;
pub use artifacts::ArtifactKind;
pub use calculator::MetricCalculator;
pub use extract::{ExtractedInputs, MetricExtractor};
pub use industry::{industry_or_unknown, IndustryFilter, IndustryLookup};
pub use known_symbols::{KnownSymbols, SymbolUpdate};
pub use period::PeriodLocator;
pub use pipeline::{MetricsPipeline, PipelineConfig, PipelineOutput, TickerFailure};

// Re-export loaders
pub use financials_loader::{FinancialsLoader, FinancialsLoaderInput, FinancialsLoaderOutput};
pub use symbol_loader::{SymbolLoader, SymbolLoaderInput, SymbolLoaderOutput};

// Prelude for convenient imports
pub mod prelude {
  pub use crate::{
    DataLoader, FinancialsLoader, FinancialsLoaderInput, IndustryFilter, KnownSymbols,
    LoaderConfig, LoaderContext, LoaderError, LoaderResult, MetricsPipeline, PipelineConfig,
    ProcessState, ProcessTracker, SymbolLoader, SymbolLoaderInput,
  };
}
