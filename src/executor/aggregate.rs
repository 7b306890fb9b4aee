//! Grouping and aggregation over filtered rows

use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::dataset::{Row, Value};
use crate::spec::{Aggregation, QueryMetric};

/// Name of the bare row-count column
pub const COUNT_COLUMN: &str = "count";

static NULL: Value = Value::Null;

/// Output of the aggregation step: ordered column names plus result rows
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregated {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// Apply an aggregation to the values of one column within a group.
///
/// Non-numeric values are excluded from sum/avg/max/min. Column-bound count
/// counts non-null cells.
pub fn aggregate_values<'a, I>(agg: Aggregation, values: I) -> Value
where
    I: IntoIterator<Item = &'a Value>,
{
    let values = values.into_iter();

    match agg {
        Aggregation::Count => Value::Int(values.filter(|v| !v.is_null()).count() as i64),
        Aggregation::Sum => sum(values.filter(|v| v.is_numeric())),
        Aggregation::Avg => {
            let (total, n) = values
                .filter_map(Value::as_f64)
                .fold((0.0, 0usize), |(total, n), x| (total + x, n + 1));
            if n == 0 {
                Value::Null
            } else {
                Value::Float(total / n as f64)
            }
        }
        Aggregation::Max => extreme(values, Ordering::Greater),
        Aggregation::Min => extreme(values, Ordering::Less),
    }
}

/// Integer sum while every input is an integer and it fits, float otherwise.
/// An empty input sums to 0.
fn sum<'a>(values: impl Iterator<Item = &'a Value>) -> Value {
    let mut int_total: Option<i64> = Some(0);
    let mut float_total = 0.0;

    for value in values {
        int_total = match (int_total, value) {
            (Some(acc), Value::Int(i)) => acc.checked_add(*i),
            _ => None,
        };
        float_total += value.as_f64().unwrap_or_default();
    }

    int_total.map(Value::Int).unwrap_or(Value::Float(float_total))
}

/// The numeric value that wins every comparison in direction `wanted`
fn extreme<'a>(values: impl Iterator<Item = &'a Value>, wanted: Ordering) -> Value {
    values
        .filter(|v| v.is_numeric())
        .fold(None::<&Value>, |best, v| match best {
            Some(b) if v.compare(b) != Some(wanted) => Some(b),
            _ => Some(v),
        })
        .cloned()
        .unwrap_or(Value::Null)
}

/// Output column for a metric in a grouped query: `{column}_{agg}`, or the
/// bare `count` for a row count
pub fn grouped_metric_name(metric: &QueryMetric) -> String {
    match &metric.column {
        Some(column) => format!("{}_{}", column, metric.agg),
        None => COUNT_COLUMN.to_string(),
    }
}

/// Output column for a metric without grouping: `{agg}_{column}`, or the
/// bare `count` for a row count
pub fn ungrouped_metric_name(metric: &QueryMetric) -> String {
    match &metric.column {
        Some(column) => format!("{}_{}", metric.agg, column),
        None => COUNT_COLUMN.to_string(),
    }
}

/// Group key ordered by [`Value::total_cmp`], so groups come out sorted with
/// null keys last
#[derive(Debug, Clone)]
struct GroupKey(Vec<Value>);

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for GroupKey {}

impl PartialOrd for GroupKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GroupKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| a.total_cmp(b))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| self.0.len().cmp(&other.0.len()))
    }
}

/// Group rows by `group_by` and compute `metrics` per group.
///
/// Groups are emitted in ascending key order. Column-bound metrics become
/// `{column}_{agg}`; a `count` column is appended when a row count is
/// requested or when no column-bound metric exists, unless a group-by
/// column already has that name.
pub fn group_and_aggregate(rows: &[Row], group_by: &[String], metrics: &[QueryMetric]) -> Aggregated {
    let mut groups: BTreeMap<GroupKey, Vec<&Row>> = BTreeMap::new();
    for row in rows {
        let key = group_by
            .iter()
            .map(|c| row.get(c).cloned().unwrap_or_default())
            .collect();
        groups.entry(GroupKey(key)).or_default().push(row);
    }

    let mut columns: Vec<String> = group_by.to_vec();
    let mut bound: Vec<(&QueryMetric, String)> = Vec::new();
    for metric in metrics.iter().filter(|m| m.column.is_some()) {
        let name = grouped_metric_name(metric);
        if !columns.contains(&name) {
            columns.push(name.clone());
            bound.push((metric, name));
        }
    }
    // A group-by column already named `count` keeps its values
    let with_count = (bound.is_empty() || metrics.iter().any(QueryMetric::is_row_count))
        && !columns.iter().any(|c| c == COUNT_COLUMN);
    if with_count {
        columns.push(COUNT_COLUMN.to_string());
    }

    let rows = groups
        .into_iter()
        .map(|(GroupKey(key), members)| {
            let mut out: Row = group_by.iter().cloned().zip(key).collect();
            for (metric, name) in &bound {
                let column = metric.column.as_deref().unwrap_or_default();
                let value = aggregate_values(
                    metric.agg,
                    members.iter().map(|r| r.get(column).unwrap_or(&NULL)),
                );
                out.insert(name.clone(), value);
            }
            if with_count {
                out.insert(COUNT_COLUMN.to_string(), Value::Int(members.len() as i64));
            }
            out
        })
        .collect();

    Aggregated { columns, rows }
}

/// Treat all rows as a single group: one output row with one column per
/// metric (`avg_x`, `sum_x`, `max_x`, `min_x`, `count_x` or `count`).
/// Without metrics the row holds just the row count.
pub fn aggregate_all(rows: &[Row], metrics: &[QueryMetric]) -> Aggregated {
    let fallback = [QueryMetric::count_rows()];
    let metrics = if metrics.is_empty() { &fallback[..] } else { metrics };

    let mut columns: Vec<String> = Vec::new();
    let mut out = Row::new();
    for metric in metrics {
        let name = ungrouped_metric_name(metric);
        if columns.contains(&name) {
            continue;
        }
        let value = match &metric.column {
            None => Value::Int(rows.len() as i64),
            Some(column) => aggregate_values(
                metric.agg,
                rows.iter().map(|r| r.get(column).unwrap_or(&NULL)),
            ),
        };
        out.insert(name.clone(), value);
        columns.push(name);
    }

    Aggregated {
        columns,
        rows: vec![out],
    }
}
