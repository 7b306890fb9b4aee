//! Executor error types

use std::fmt;
use thiserror::Error;

use crate::spec::Aggregation;

/// The clause of a query spec a column reference came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    Filter,
    GroupBy,
    Metric,
    OrderBy,
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Filter => write!(f, "filter"),
            Clause::GroupBy => write!(f, "group_by"),
            Clause::Metric => write!(f, "metric"),
            Clause::OrderBy => write!(f, "order_by"),
        }
    }
}

/// A query spec that cannot run against the target dataset
///
/// Raised before any row is touched; the message always names the offending
/// column, operator or aggregator so the caller can fix and resubmit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryValidationError {
    #[error("Unknown {clause} column: {column}")]
    UnknownColumn { clause: Clause, column: String },
    #[error("Unsupported aggregator: {0}")]
    UnsupportedAggregation(String),
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
    #[error("Unsupported order direction: {0}")]
    UnsupportedDirection(String),
    #[error("Aggregator '{0}' requires a column")]
    MissingMetricColumn(Aggregation),
    #[error("Malformed query spec: {0}")]
    Malformed(String),
}

impl QueryValidationError {
    /// The unknown column, when that is what failed
    pub fn column(&self) -> Option<&str> {
        match self {
            QueryValidationError::UnknownColumn { column, .. } => Some(column),
            _ => None,
        }
    }
}
