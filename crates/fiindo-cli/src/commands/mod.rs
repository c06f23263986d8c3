pub mod fetch;
pub mod load;
pub mod query;
pub mod run;
pub mod transform;
