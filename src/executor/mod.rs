//! Query execution
//!
//! Validates a [`QuerySpec`](crate::spec::QuerySpec) against the dataset's
//! columns, then runs it over an in-memory row snapshot.

mod aggregate;
mod error;
mod execute;
mod order;
mod validate;

pub use aggregate::{aggregate_values, grouped_metric_name, ungrouped_metric_name, COUNT_COLUMN};
pub use error::{Clause, QueryValidationError};
pub use execute::{ExecutionResult, ExecutionSummary, QueryExecutor};
pub use order::resolve_order_column;
pub use validate::{parse_spec, validate_spec};
