//! Keyword configuration for the rule-based generator
//!
//! The heuristics are data, not code: every keyword list can be replaced
//! from a YAML config to target another locale or vocabulary.

use serde::{Deserialize, Serialize};

use crate::spec::Aggregation;

/// Keyword lists that trigger each aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricKeywords {
    pub avg: Vec<String>,
    pub sum: Vec<String>,
    pub max: Vec<String>,
    pub min: Vec<String>,
    pub count: Vec<String>,
}

impl Default for MetricKeywords {
    fn default() -> Self {
        Self {
            avg: words(&["平均", "average", "mean"]),
            sum: words(&["合計", "総", "sum", "total"]),
            max: words(&["最大", "highest", "max"]),
            min: words(&["最小", "lowest", "min"]),
            count: words(&["件数", "数", "count"]),
        }
    }
}

impl MetricKeywords {
    /// Keywords for a given aggregation
    pub fn for_aggregation(&self, agg: Aggregation) -> &[String] {
        match agg {
            Aggregation::Avg => &self.avg,
            Aggregation::Sum => &self.sum,
            Aggregation::Max => &self.max,
            Aggregation::Min => &self.min,
            Aggregation::Count => &self.count,
        }
    }
}

/// Settings for [`RuleBasedGenerator`](super::RuleBasedGenerator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub metric_keywords: MetricKeywords,
    /// Tokens marking a time axis, matched against the question and column names
    pub temporal_markers: Vec<String>,
    /// Tokens marking an administrative area
    pub area_markers: Vec<String>,
    /// Superlative tokens that flip the default ordering to descending
    pub descending_markers: Vec<String>,
    /// Row limit attached to every generated spec
    pub default_limit: Option<usize>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            metric_keywords: MetricKeywords::default(),
            temporal_markers: words(&["year", "年度", "年"]),
            area_markers: words(&["ward", "区"]),
            descending_markers: words(&["高い", "多い", "最大", "top", "highest", "largest"]),
            default_limit: Some(20),
        }
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

/// Case-insensitive "contains any" over a keyword list; `haystack` must
/// already be lower-cased. Blank keywords never match.
pub(crate) fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords
        .iter()
        .filter(|k| !k.trim().is_empty())
        .any(|k| haystack.contains(&k.to_lowercase()))
}
