//! Keyword heuristics mapping a question to a query spec

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::config::{contains_any, GeneratorConfig};
use crate::dataset::{ColumnMetadata, DatasetMeta, Value};
use crate::spec::{
    Aggregation, Direction, FilterOp, QueryFilter, QueryMetric, QueryOrder, QuerySpec,
};

/// A four-digit year in 2000-2099, optionally followed by 年
static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(20\d{2})年?").expect("Invalid regex"));

/// Deterministic question → spec translator
///
/// Stateless apart from its keyword configuration; `generate` is total and
/// returns the same spec for the same question and columns. Ties are broken
/// by first match (first matching column, first numeric column).
#[derive(Debug, Clone, Default)]
pub struct RuleBasedGenerator {
    config: GeneratorConfig,
}

impl RuleBasedGenerator {
    /// Create a generator with the built-in multilingual keyword lists
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate a query spec for `question` over the dataset's columns
    pub fn generate(&self, question: &str, dataset: &DatasetMeta) -> QuerySpec {
        let columns = &dataset.columns;
        let normalized = question.to_lowercase();

        let group_by = self.detect_group_by(&normalized, columns);
        let metrics = self.detect_metrics(&normalized, dataset);
        let filters = self.detect_filters(question, columns);
        let order_by = self.detect_order(&normalized, &group_by, &metrics);

        debug!(
            dataset_id = dataset.id,
            group_by = ?group_by,
            metrics = metrics.len(),
            filters = filters.len(),
            "generated rule-based query spec"
        );

        QuerySpec {
            filters,
            group_by,
            metrics,
            order_by,
            limit: self.config.default_limit,
        }
    }

    /// Collect temporal and area columns when the question mentions them.
    /// Both kinds accumulate, in column order, without duplicates.
    fn detect_group_by(&self, question: &str, columns: &[ColumnMetadata]) -> Vec<String> {
        let wants_time = contains_any(question, &self.config.temporal_markers);
        let wants_area = contains_any(question, &self.config.area_markers);

        let mut candidates: Vec<String> = Vec::new();
        for column in columns {
            let name = column.name.to_lowercase();
            let is_time = wants_time && contains_any(&name, &self.config.temporal_markers);
            let is_area = wants_area && contains_any(&name, &self.config.area_markers);
            if (is_time || is_area) && !candidates.contains(&column.name) {
                candidates.push(column.name.clone());
            }
        }
        candidates
    }

    /// One metric per aggregation whose keywords appear in the question.
    ///
    /// Non-count aggregations bind to the first numeric column, index or not,
    /// and are skipped when the dataset has none. Falls back to a row count.
    fn detect_metrics(&self, question: &str, dataset: &DatasetMeta) -> Vec<QueryMetric> {
        let numeric_column = dataset.numeric_columns().next();

        let mut metrics = Vec::new();
        for agg in Aggregation::ALL {
            if !contains_any(question, self.config.metric_keywords.for_aggregation(agg)) {
                continue;
            }
            match (agg, numeric_column) {
                (Aggregation::Count, _) => metrics.push(QueryMetric::count_rows()),
                (_, Some(column)) => metrics.push(QueryMetric::of(agg, column.name.clone())),
                (_, None) => {
                    debug!(%agg, "no numeric column to aggregate, skipping");
                }
            }
        }

        if metrics.is_empty() {
            metrics.push(QueryMetric::count_rows());
        }
        metrics
    }

    /// An equality filter on the first year-like column when the raw
    /// question names a year
    fn detect_filters(&self, question: &str, columns: &[ColumnMetadata]) -> Vec<QueryFilter> {
        let Some(year) = YEAR_PATTERN
            .captures(question)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<i64>().ok())
        else {
            return vec![];
        };

        columns
            .iter()
            .find(|c| contains_any(&c.name.to_lowercase(), &self.config.temporal_markers))
            .map(|c| vec![QueryFilter::new(c.name.clone(), FilterOp::Eq, Value::Int(year))])
            .unwrap_or_default()
    }

    /// Order by the first metric's column (descending for superlatives),
    /// else by the first group-by column
    fn detect_order(
        &self,
        question: &str,
        group_by: &[String],
        metrics: &[QueryMetric],
    ) -> Vec<QueryOrder> {
        if let Some(column) = metrics.first().and_then(|m| m.column.as_ref()) {
            let direction = if contains_any(question, &self.config.descending_markers) {
                Direction::Desc
            } else {
                Direction::Asc
            };
            return vec![QueryOrder::new(column.clone(), direction)];
        }

        group_by
            .first()
            .map(|column| vec![QueryOrder::new(column.clone(), Direction::Asc)])
            .unwrap_or_default()
    }
}
