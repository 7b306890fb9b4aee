//! Insight sentence rendering

use serde::{Deserialize, Serialize};

use crate::executor::ExecutionSummary;
use crate::spec::QueryMetric;

/// Language of the rendered insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Settings for [`InsightSummarizer`]
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizerConfig {
    pub locale: Locale,
}

/// Renders a one-sentence insight from an execution summary
#[derive(Debug, Clone, Default)]
pub struct InsightSummarizer {
    config: SummarizerConfig,
}

impl InsightSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SummarizerConfig) -> Self {
        Self { config }
    }

    /// Describe what was computed for `question`.
    ///
    /// With metrics, names each `agg(column)` pair (`rows` for a row count)
    /// and the returned row count; otherwise only the row count.
    pub fn summarize(&self, question: &str, summary: &ExecutionSummary) -> String {
        let returned = summary.returned_rows;

        if summary.metrics.is_empty() {
            return match self.config.locale {
                Locale::Ja => format!("質問『{}』に対し {} 件のレコードを返却しました。", question, returned),
                Locale::En => format!("Returned {} records for the question \"{}\".", returned, question),
            };
        }

        let computed = summary
            .metrics
            .iter()
            .map(describe_metric)
            .collect::<Vec<_>>()
            .join(", ");

        match self.config.locale {
            Locale::Ja => format!(
                "質問『{}』に対し、{} を計算しました。返却件数: {}件。",
                question, computed, returned
            ),
            Locale::En => format!(
                "For the question \"{}\", computed {}. Rows returned: {}.",
                question, computed, returned
            ),
        }
    }
}

fn describe_metric(metric: &QueryMetric) -> String {
    format!("{}({})", metric.agg, metric.column.as_deref().unwrap_or("rows"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Aggregation;

    fn summary(metrics: Vec<QueryMetric>, returned_rows: usize) -> ExecutionSummary {
        ExecutionSummary {
            requested_rows: 10,
            returned_rows,
            metrics,
            ..Default::default()
        }
    }

    #[test]
    fn test_metrics_sentence() {
        let text = InsightSummarizer::new().summarize(
            "区別人口の合計",
            &summary(
                vec![QueryMetric::of(Aggregation::Sum, "population"), QueryMetric::count_rows()],
                3,
            ),
        );
        assert_eq!(
            text,
            "質問『区別人口の合計』に対し、sum(population), count(rows) を計算しました。返却件数: 3件。"
        );
    }

    #[test]
    fn test_row_count_sentence() {
        let text = InsightSummarizer::new().summarize("一覧", &summary(vec![], 7));
        assert_eq!(text, "質問『一覧』に対し 7 件のレコードを返却しました。");
    }

    #[test]
    fn test_english_locale() {
        let summarizer = InsightSummarizer::with_config(SummarizerConfig { locale: Locale::En });
        let text = summarizer.summarize(
            "average population",
            &summary(vec![QueryMetric::of(Aggregation::Avg, "population")], 1),
        );
        assert_eq!(
            text,
            "For the question \"average population\", computed avg(population). Rows returned: 1."
        );
        assert_eq!(
            summarizer.summarize("all rows", &summary(vec![], 0)),
            "Returned 0 records for the question \"all rows\"."
        );
    }
}
