//! Query specification: the typed contract between the generators and the
//! executor
//!
//! A spec is a plain value. It is built once per request and never checked
//! here; the executor validates it against a dataset's columns.

use serde::{Deserialize, Serialize};

use super::types::{Aggregation, Direction, FilterOp};
use crate::dataset::Value;

/// A single `column <op> value` predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub column: String,
    #[serde(default)]
    pub op: FilterOp,
    #[serde(default)]
    pub value: Value,
}

impl QueryFilter {
    pub fn new(column: impl Into<String>, op: FilterOp, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }
}

/// An aggregate to compute, optionally bound to a column
///
/// `count` without a column counts rows; every other aggregation needs one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryMetric {
    #[serde(default)]
    pub agg: Aggregation,
    #[serde(default)]
    pub column: Option<String>,
}

impl QueryMetric {
    pub fn new(agg: Aggregation, column: Option<String>) -> Self {
        Self { agg, column }
    }

    /// Row count: `count` with no column
    pub fn count_rows() -> Self {
        Self {
            agg: Aggregation::Count,
            column: None,
        }
    }

    pub fn of(agg: Aggregation, column: impl Into<String>) -> Self {
        Self {
            agg,
            column: Some(column.into()),
        }
    }

    pub fn is_row_count(&self) -> bool {
        self.agg == Aggregation::Count && self.column.is_none()
    }
}

/// Ordering directive; `column` may name a raw column or a derived aggregate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOrder {
    pub column: String,
    #[serde(default)]
    pub direction: Direction,
}

impl QueryOrder {
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Canonical typed representation of a tabular query
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct QuerySpec {
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
    #[serde(default)]
    pub group_by: Vec<String>,
    #[serde(default)]
    pub metrics: Vec<QueryMetric>,
    #[serde(default)]
    pub order_by: Vec<QueryOrder>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl QuerySpec {
    /// Convert into the plain nested form used for transport and audit
    pub fn to_value(&self) -> serde_json::Value {
        // Every field serializes to plain JSON; this cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Build a spec from its plain nested form.
    ///
    /// Missing fields take their defaults. Unknown aggregators or operators
    /// are rejected by the enum parsers.
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The limit when it is a positive row count
    pub fn effective_limit(&self) -> Option<usize> {
        self.limit.filter(|&n| n > 0)
    }
}
