//! Captured (question, dataset, query spec) examples

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dataset::{ColumnMetadata, DatasetMeta};
use crate::error::{read_to_string, ParseError};
use crate::spec::QuerySpec;

/// Dataset metadata recorded alongside an example
///
/// Only `id` takes part in matching. Columns are kept so the example can be
/// replayed through the rule-based generator during evaluation; anything
/// else the store recorded is carried through untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExampleMeta {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub columns: Vec<ColumnMetadata>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ExampleMeta {
    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Default::default()
        }
    }

    /// View as dataset metadata (id 0 when the example carries none)
    pub fn to_dataset_meta(&self) -> DatasetMeta {
        DatasetMeta::new(self.id.unwrap_or_default(), self.columns.clone())
    }
}

impl From<&DatasetMeta> for ExampleMeta {
    fn from(meta: &DatasetMeta) -> Self {
        Self {
            id: Some(meta.id),
            columns: meta.columns.clone(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A historical question with the query spec that answered it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainsetExample {
    pub question: String,
    #[serde(default)]
    pub dataset_meta: ExampleMeta,
    pub query_spec: QuerySpec,
}

impl TrainsetExample {
    pub fn new(question: impl Into<String>, dataset_meta: ExampleMeta, query_spec: QuerySpec) -> Self {
        Self {
            question: question.into(),
            dataset_meta,
            query_spec,
        }
    }
}

/// An ordered, read-only set of examples
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trainset {
    examples: Vec<TrainsetExample>,
}

impl Trainset {
    pub fn new(examples: Vec<TrainsetExample>) -> Self {
        Self { examples }
    }

    /// Parse a trainset from a JSON array of examples
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        if !document.is_array() {
            return Err(ParseError::NotAList { what: "trainset examples" });
        }
        Ok(serde_json::from_value(document)?)
    }

    /// Load a trainset from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        Self::from_json_str(&read_to_string(path)?)
    }

    pub fn examples(&self) -> &[TrainsetExample] {
        &self.examples
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrainsetExample> {
        self.examples.iter()
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}

impl FromIterator<TrainsetExample> for Trainset {
    fn from_iter<I: IntoIterator<Item = TrainsetExample>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::Aggregation;

    #[test]
    fn test_parse_trainset() {
        let json = r#"[
            {
                "question": "average population by ward",
                "dataset_meta": {"id": 3, "slug": "population"},
                "query_spec": {"group_by": ["ward"], "metrics": [{"agg": "avg", "column": "population"}]}
            },
            {
                "question": "how many rows",
                "query_spec": {}
            }
        ]"#;

        let trainset = Trainset::from_json_str(json).unwrap();
        assert_eq!(trainset.len(), 2);

        let first = &trainset.examples()[0];
        assert_eq!(first.dataset_meta.id, Some(3));
        assert_eq!(first.dataset_meta.extra["slug"], "population");
        assert_eq!(first.query_spec.metrics[0].agg, Aggregation::Avg);

        let second = &trainset.examples()[1];
        assert_eq!(second.dataset_meta.id, None);
        assert!(second.query_spec.metrics.is_empty());
    }

    #[test]
    fn test_parse_trainset_requires_list() {
        let err = Trainset::from_json_str(r#"{"question": "x"}"#).unwrap_err();
        assert!(matches!(err, ParseError::NotAList { .. }));
    }

    #[test]
    fn test_parse_trainset_invalid_spec() {
        let json = r#"[{"question": "q", "query_spec": {"metrics": [{"agg": "median"}]}}]"#;
        assert!(matches!(
            Trainset::from_json_str(json),
            Err(ParseError::Json { .. })
        ));
    }
}
