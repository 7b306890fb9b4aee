//! Nearest-neighbor prediction over captured examples

use std::collections::HashSet;
use tracing::debug;

use crate::dataset::DatasetMeta;
use crate::spec::QuerySpec;
use crate::trainset::{Trainset, TrainsetExample};

/// Predicts a query spec by finding the most similar captured question
///
/// An example scores the number of shared lower-cased whitespace tokens with
/// the incoming question, plus one when it was recorded against the same
/// dataset. The first example with the highest score wins; a best score of
/// zero is no match.
#[derive(Debug, Clone)]
pub struct CompiledPredictor {
    version: String,
    trainset: Trainset,
}

impl CompiledPredictor {
    pub fn new(version: impl Into<String>, trainset: Trainset) -> Self {
        Self {
            version: version.into(),
            trainset,
        }
    }

    /// The compiled artifact version, used as provenance tag
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn trainset(&self) -> &Trainset {
        &self.trainset
    }

    /// Return the spec of the best-matching example, or `None`
    pub fn predict(&self, question: &str, dataset: &DatasetMeta) -> Option<QuerySpec> {
        let tokens = tokenize(question);

        let mut best: Option<(&TrainsetExample, usize)> = None;
        for example in self.trainset.iter() {
            let score = score_example(&tokens, example, dataset);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((example, score));
            }
        }

        match best {
            Some((example, score)) if score > 0 => {
                debug!(
                    version = %self.version,
                    score,
                    matched = %example.question,
                    "compiled predictor matched"
                );
                Some(example.query_spec.clone())
            }
            _ => {
                debug!(version = %self.version, "compiled predictor found no match");
                None
            }
        }
    }
}

fn tokenize(text: &str) -> HashSet<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn score_example(tokens: &HashSet<String>, example: &TrainsetExample, dataset: &DatasetMeta) -> usize {
    let overlap = tokenize(&example.question).intersection(tokens).count();
    let same_dataset = example.dataset_meta.id == Some(dataset.id);
    overlap + usize::from(same_dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::{Aggregation, QueryMetric};
    use crate::trainset::ExampleMeta;

    fn spec_with(agg: Aggregation) -> QuerySpec {
        QuerySpec {
            metrics: vec![QueryMetric::of(agg, "population")],
            ..Default::default()
        }
    }

    fn predictor() -> CompiledPredictor {
        let trainset = Trainset::new(vec![
            TrainsetExample::new("total population by ward", ExampleMeta::with_id(1), spec_with(Aggregation::Sum)),
            TrainsetExample::new("average population by ward", ExampleMeta::with_id(2), spec_with(Aggregation::Avg)),
            TrainsetExample::new("Max Population", ExampleMeta::default(), spec_with(Aggregation::Max)),
        ]);
        CompiledPredictor::new("interactive-compiled-test", trainset)
    }

    #[test]
    fn test_predict_best_overlap() {
        let spec = predictor()
            .predict("average population per ward", &DatasetMeta::new(9, vec![]))
            .unwrap();
        assert_eq!(spec.metrics[0].agg, Aggregation::Avg);
    }

    #[test]
    fn test_dataset_id_breaks_ties() {
        // "population" overlaps all three; dataset 2 adds one point
        let spec = predictor()
            .predict("population", &DatasetMeta::new(2, vec![]))
            .unwrap();
        assert_eq!(spec.metrics[0].agg, Aggregation::Avg);
    }

    #[test]
    fn test_first_example_wins_ties() {
        let spec = predictor()
            .predict("POPULATION", &DatasetMeta::new(9, vec![]))
            .unwrap();
        assert_eq!(spec.metrics[0].agg, Aggregation::Sum);
    }

    #[test]
    fn test_zero_score_is_no_match() {
        assert!(predictor()
            .predict("人口の合計", &DatasetMeta::new(9, vec![]))
            .is_none());
    }

    #[test]
    fn test_dataset_match_alone_counts() {
        let spec = predictor().predict("", &DatasetMeta::new(1, vec![])).unwrap();
        assert_eq!(spec.metrics[0].agg, Aggregation::Sum);
    }

    #[test]
    fn test_empty_trainset_never_matches() {
        let predictor = CompiledPredictor::new("v", Trainset::default());
        assert!(predictor.predict("population", &DatasetMeta::new(1, vec![])).is_none());
    }
}
