pub mod models;
pub mod repository;
pub mod schema;

// Re-export commonly used items
pub use diesel::prelude::*;
pub use models::{
  IndustryAggregation, NewIndustryAggregation, NewTickerStatistic, TickerStatistic,
};
pub use repository::{DatabaseContext, MetricsRepository, RepositoryError, RepositoryResult};
