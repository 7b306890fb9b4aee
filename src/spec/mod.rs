//! Query specification model (noun module)
//!
//! The typed form of "what to compute": filters, grouping, metrics,
//! ordering and a row limit.

mod query;
mod types;

pub use query::{QueryFilter, QueryMetric, QueryOrder, QuerySpec};
pub use types::{Aggregation, Direction, FilterOp, ParseAggregationError, ParseFilterOpError};
