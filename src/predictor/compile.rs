//! Offline evaluation and compilation of a trainset
//!
//! A compiled program is the trainset plus its version tag and the scores
//! measured when it was built. Persisting the artifact is left to the caller;
//! [`CompiledProgram`] serializes to JSON and loads back with
//! [`CompiledProgram::from_file`].

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

use super::compiled::CompiledPredictor;
use super::error::CompileError;
use crate::dataset::DatasetMeta;
use crate::error::{read_to_string, ParseError};
use crate::generator::RuleBasedGenerator;
use crate::spec::QuerySpec;
use crate::trainset::Trainset;

/// Prefix of generated artifact versions
pub const COMPILED_VERSION_PREFIX: &str = "interactive-compiled";

// ============================================================================
// Scoring
// ============================================================================

/// Similarity of a predicted spec to a target spec, in `0.0..=1.0`.
///
/// Each of group_by, metrics, filters and order_by contributes the share of
/// the target's items that the prediction also contains (1 when both are
/// empty). Matching limits contribute one more point. The total is divided
/// by five.
pub fn score_query_spec(predicted: &QuerySpec, target: &QuerySpec) -> f64 {
    let clauses = [
        clause_score(&predicted.group_by, &target.group_by),
        clause_score(&predicted.metrics, &target.metrics),
        clause_score(&predicted.filters, &target.filters),
        clause_score(&predicted.order_by, &target.order_by),
    ];
    let limit = if predicted.limit == target.limit { 1.0 } else { 0.0 };

    (clauses.iter().sum::<f64>() + limit) / 5.0
}

fn clause_score<T: Serialize>(predicted: &[T], target: &[T]) -> f64 {
    if predicted.is_empty() && target.is_empty() {
        return 1.0;
    }

    // Items compare by their JSON form, so float filter values still match
    let items = |list: &[T]| -> HashSet<String> {
        list.iter()
            .filter_map(|item| serde_json::to_string(item).ok())
            .collect()
    };
    let predicted = items(predicted);
    let target = items(target);

    predicted.intersection(&target).count() as f64 / target.len().max(1) as f64
}

/// Mean score of `predict` over every example; 0 for an empty trainset
pub fn evaluate_trainset<F>(trainset: &Trainset, mut predict: F) -> f64
where
    F: FnMut(&str, &DatasetMeta) -> QuerySpec,
{
    if trainset.is_empty() {
        return 0.0;
    }

    let total: f64 = trainset
        .iter()
        .map(|example| {
            let meta = example.dataset_meta.to_dataset_meta();
            let predicted = predict(&example.question, &meta);
            score_query_spec(&predicted, &example.query_spec)
        })
        .sum();

    total / trainset.len() as f64
}

// ============================================================================
// Compilation
// ============================================================================

/// A compiled trainset with its measured scores
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledProgram {
    pub version: String,
    /// Score of the rule-based generator alone
    pub baseline_score: f64,
    /// Score of compiled prediction with generator fallback
    pub compiled_score: f64,
    pub trainset: Trainset,
}

impl CompiledProgram {
    /// Parse a compiled program from JSON
    pub fn from_json_str(json: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a compiled program from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        Self::from_json_str(&read_to_string(path)?)
    }

    /// Pretty-printed JSON form
    pub fn to_json_string(&self) -> Result<String, ParseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn into_predictor(self) -> CompiledPredictor {
        CompiledPredictor::new(self.version, self.trainset)
    }
}

impl From<CompiledProgram> for CompiledPredictor {
    fn from(program: CompiledProgram) -> Self {
        program.into_predictor()
    }
}

/// Compile `trainset` into a versioned program.
///
/// Without an explicit `version` the artifact is named
/// `interactive-compiled-{YYYYmmddHHMMSS}` in UTC.
pub fn compile_program(
    trainset: &Trainset,
    version: Option<&str>,
    generator: &RuleBasedGenerator,
) -> Result<CompiledProgram, CompileError> {
    if trainset.is_empty() {
        warn!("refusing to compile an empty trainset");
        return Err(CompileError::EmptyTrainset);
    }

    let version = match version {
        Some(v) => v.to_string(),
        None => format!(
            "{}-{}",
            COMPILED_VERSION_PREFIX,
            Utc::now().format("%Y%m%d%H%M%S")
        ),
    };

    let baseline_score = evaluate_trainset(trainset, |q, meta| generator.generate(q, meta));

    let predictor = CompiledPredictor::new(version.clone(), trainset.clone());
    let compiled_score = evaluate_trainset(trainset, |q, meta| {
        predictor
            .predict(q, meta)
            .unwrap_or_else(|| generator.generate(q, meta))
    });

    info!(
        version = %version,
        examples = trainset.len(),
        baseline = baseline_score,
        compiled = compiled_score,
        "compiled interactive program"
    );

    Ok(CompiledProgram {
        version,
        baseline_score,
        compiled_score,
        trainset: trainset.clone(),
    })
}
