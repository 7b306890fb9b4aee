//! The filter → prune → aggregate → order → limit pipeline

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use super::aggregate::{aggregate_all, group_and_aggregate, Aggregated};
use super::error::QueryValidationError;
use super::order::sort_rows;
use super::validate::{parse_spec, validate_spec};
use crate::dataset::{ColumnMetadata, DatasetSnapshot, Row};
use crate::spec::{QueryFilter, QueryMetric, QuerySpec};

/// Audit summary of one execution
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionSummary {
    /// Rows left after filtering, before aggregation
    pub requested_rows: usize,
    /// Rows in the final result
    pub returned_rows: usize,
    pub group_by: Vec<String>,
    pub metrics: Vec<QueryMetric>,
    pub filters: Vec<QueryFilter>,
}

/// Rows produced by an execution, with their column order and summary
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub data: Vec<Row>,
    /// Output column names: group-by columns, then metric columns
    pub columns: Vec<String>,
    pub summary: ExecutionSummary,
}

impl ExecutionResult {
    pub fn row_count(&self) -> usize {
        self.data.len()
    }
}

/// Executes query specs against materialized rows
///
/// Holds no state between calls. The input rows are never modified; each
/// call works on its own filtered copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct QueryExecutor;

impl QueryExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Run `spec` over `rows` whose schema is `columns`.
    ///
    /// Validation happens before any row is read; an invalid spec returns
    /// the error and no data.
    pub fn execute(
        &self,
        columns: &[ColumnMetadata],
        rows: &[Row],
        spec: &QuerySpec,
    ) -> Result<ExecutionResult, QueryValidationError> {
        if let Err(e) = validate_spec(spec, columns) {
            warn!(error = %e, "rejected query spec");
            return Err(e);
        }

        let known: HashSet<&str> = columns.iter().map(|c| c.name.as_str()).collect();

        // Filters compose with AND, in list order
        let filtered: Vec<Row> = rows
            .iter()
            .filter(|row| {
                spec.filters.iter().all(|f| {
                    row.get(&f.column)
                        .is_some_and(|cell| cell.matches(f.op, &f.value))
                })
            })
            .map(|row| {
                row.iter()
                    .filter(|(name, _)| known.contains(name.as_str()))
                    .map(|(name, value)| (name.clone(), value.clone()))
                    .collect()
            })
            .collect();
        let requested_rows = filtered.len();

        let Aggregated {
            columns: output_columns,
            rows: mut data,
        } = if spec.group_by.is_empty() {
            aggregate_all(&filtered, &spec.metrics)
        } else {
            group_and_aggregate(&filtered, &spec.group_by, &spec.metrics)
        };

        sort_rows(&mut data, &spec.order_by, &output_columns);

        if let Some(limit) = spec.effective_limit() {
            data.truncate(limit);
        }

        debug!(
            requested_rows,
            returned_rows = data.len(),
            columns = ?output_columns,
            "executed query spec"
        );

        Ok(ExecutionResult {
            summary: ExecutionSummary {
                requested_rows,
                returned_rows: data.len(),
                group_by: spec.group_by.clone(),
                metrics: spec.metrics.clone(),
                filters: spec.filters.clone(),
            },
            columns: output_columns,
            data,
        })
    }

    /// Run `spec` over a dataset snapshot
    pub fn execute_snapshot(
        &self,
        snapshot: &DatasetSnapshot,
        spec: &QuerySpec,
    ) -> Result<ExecutionResult, QueryValidationError> {
        self.execute(&snapshot.meta.columns, &snapshot.rows, spec)
    }

    /// Run a spec given in its plain nested form
    pub fn execute_value(
        &self,
        columns: &[ColumnMetadata],
        rows: &[Row],
        spec: &serde_json::Value,
    ) -> Result<ExecutionResult, QueryValidationError> {
        let spec = parse_spec(spec)?;
        self.execute(columns, rows, &spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use crate::executor::Clause;
    use crate::spec::{Aggregation, Direction, FilterOp, QueryOrder};
    use serde_json::json;

    fn columns() -> Vec<ColumnMetadata> {
        vec![
            ColumnMetadata::number("year").indexed(),
            ColumnMetadata::text("ward").indexed(),
            ColumnMetadata::number("population"),
        ]
    }

    fn rows() -> Vec<Row> {
        vec![
            [
                ("year".to_string(), Value::Int(2023)),
                ("ward".to_string(), Value::from("A")),
                ("population".to_string(), Value::Int(100)),
            ]
            .into_iter()
            .collect(),
            [
                ("year".to_string(), Value::Int(2023)),
                ("ward".to_string(), Value::from("B")),
                ("population".to_string(), Value::Int(120)),
            ]
            .into_iter()
            .collect(),
        ]
    }

    fn ward_totals() -> QuerySpec {
        QuerySpec {
            filters: vec![QueryFilter::new("year", FilterOp::Eq, 2023)],
            group_by: vec!["ward".to_string()],
            metrics: vec![QueryMetric::of(Aggregation::Sum, "population")],
            order_by: vec![QueryOrder::new("population", Direction::Desc)],
            limit: Some(10),
        }
    }

    #[test]
    fn test_grouped_sum_ordered_by_base_column() {
        let result = QueryExecutor::new()
            .execute(&columns(), &rows(), &ward_totals())
            .unwrap();

        assert_eq!(
            serde_json::to_value(&result.data).unwrap(),
            json!([
                {"ward": "B", "population_sum": 120},
                {"ward": "A", "population_sum": 100}
            ])
        );
        assert_eq!(result.columns, vec!["ward", "population_sum"]);
        assert_eq!(result.summary.returned_rows, 2);
        assert_eq!(result.summary.requested_rows, 2);
    }

    #[test]
    fn test_ungrouped_row_count() {
        let spec = QuerySpec {
            metrics: vec![QueryMetric::count_rows()],
            ..Default::default()
        };
        let result = QueryExecutor::new().execute(&columns(), &rows(), &spec).unwrap();

        assert_eq!(serde_json::to_value(&result.data).unwrap(), json!([{"count": 2}]));
        assert_eq!(result.summary.returned_rows, 1);
    }

    #[test]
    fn test_unknown_filter_column_is_rejected() {
        let spec = QuerySpec {
            filters: vec![QueryFilter::new("nonexistent", FilterOp::Eq, 1)],
            ..Default::default()
        };
        let err = QueryExecutor::new().execute(&columns(), &rows(), &spec).unwrap_err();

        assert_eq!(
            err,
            QueryValidationError::UnknownColumn {
                clause: Clause::Filter,
                column: "nonexistent".to_string(),
            }
        );
        assert!(err.to_string().contains("nonexistent"));
    }

    #[test]
    fn test_limit_bounds_returned_rows() {
        let spec = QuerySpec {
            limit: Some(1),
            ..ward_totals()
        };
        let result = QueryExecutor::new().execute(&columns(), &rows(), &spec).unwrap();

        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0]["ward"], Value::from("B"));
        assert!(result.summary.returned_rows <= result.summary.requested_rows);
    }

    #[test]
    fn test_filters_compose_with_and() {
        let spec = QuerySpec {
            filters: vec![
                QueryFilter::new("year", FilterOp::Eq, 2023),
                QueryFilter::new("population", FilterOp::Gt, 100),
            ],
            metrics: vec![QueryMetric::count_rows()],
            ..Default::default()
        };
        let result = QueryExecutor::new().execute(&columns(), &rows(), &spec).unwrap();

        assert_eq!(result.summary.requested_rows, 1);
        assert_eq!(result.data[0]["count"], Value::Int(1));
    }

    #[test]
    fn test_unknown_fields_are_pruned() {
        let mut rows = rows();
        rows[0].insert("secret".to_string(), Value::from("x"));
        let spec = QuerySpec {
            group_by: vec!["ward".to_string()],
            ..Default::default()
        };
        let result = QueryExecutor::new().execute(&columns(), &rows, &spec).unwrap();

        assert!(result.data.iter().all(|r| !r.contains_key("secret")));
        assert_eq!(result.columns, vec!["ward", "count"]);
    }

    #[test]
    fn test_rerun_is_identical() {
        let executor = QueryExecutor::new();
        let first = executor.execute(&columns(), &rows(), &ward_totals()).unwrap();
        let second = executor.execute(&columns(), &rows(), &ward_totals()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_execute_value_reports_unsupported_aggregator() {
        let spec = json!({"metrics": [{"agg": "median", "column": "population"}]});
        let err = QueryExecutor::new()
            .execute_value(&columns(), &rows(), &spec)
            .unwrap_err();
        assert!(err.to_string().contains("median"));
    }
}
