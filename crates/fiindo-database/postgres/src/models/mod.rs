pub mod statistics;

pub use statistics::{
  IndustryAggregation, NewIndustryAggregation, NewTickerStatistic, TickerStatistic,
};
