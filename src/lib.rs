pub mod aggregate;
pub mod api;
pub mod collector;
pub mod config;
pub mod document;
pub mod error;
pub mod pagination;
pub mod sections;

pub use aggregate::Aggregator;
pub use document::{AggregatedPayload, HomeDocument};
pub use error::{AggregationError, FetchError};
