//! Common types used across fiindo-* crates

pub mod statement;

pub use statement::{PeriodKind, StatementType};
