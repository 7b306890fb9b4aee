//! Question → spec → result → insight

use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::ProgramError;
use crate::config::EngineConfig;
use crate::dataset::{DatasetSnapshot, Row};
use crate::executor::{ExecutionSummary, QueryExecutor};
use crate::predictor::{CompiledPredictor, ProgramSelector};
use crate::spec::QuerySpec;
use crate::summarizer::InsightSummarizer;

/// A question about one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveRequest {
    pub dataset_id: i64,
    pub question: String,
    /// Caller-supplied tags, passed through to the audit record untouched
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

impl InteractiveRequest {
    pub fn new(dataset_id: i64, question: impl Into<String>) -> Self {
        Self {
            dataset_id,
            question: question.into(),
            provider: None,
            model: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>, model: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self.model = Some(model.into());
        self
    }
}

/// Everything produced for one question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractiveResponse {
    pub dataset_id: i64,
    pub question: String,
    pub query_spec: QuerySpec,
    pub data: Vec<Row>,
    pub columns: Vec<String>,
    pub stats: ExecutionSummary,
    pub insight: String,
    /// Provenance tag of the spec: a compiled version or the fallback tag
    pub program_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl InteractiveResponse {
    /// The record the audit store persists for this answer
    pub fn analysis_record(&self) -> AnalysisRecord {
        AnalysisRecord {
            dataset_id: self.dataset_id,
            question: self.question.clone(),
            query_spec: self.query_spec.clone(),
            result_summary: self.stats.clone(),
            provider: self.provider.clone(),
            model: self.model.clone(),
            program_version: self.program_version.clone(),
        }
    }
}

/// Audit entry for one answered question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub dataset_id: i64,
    pub question: String,
    pub query_spec: QuerySpec,
    pub result_summary: ExecutionSummary,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub program_version: String,
}

/// Chains selection, execution and summarization
#[derive(Debug, Clone, Default)]
pub struct InteractiveProgram {
    selector: ProgramSelector,
    executor: QueryExecutor,
    summarizer: InsightSummarizer,
}

impl InteractiveProgram {
    pub fn new(selector: ProgramSelector, summarizer: InsightSummarizer) -> Self {
        Self {
            selector,
            executor: QueryExecutor::new(),
            summarizer,
        }
    }

    /// Build a program from configuration, optionally with a compiled predictor
    pub fn from_config(config: &EngineConfig, predictor: Option<CompiledPredictor>) -> Self {
        Self::new(config.build_selector(predictor), config.build_summarizer())
    }

    pub fn selector(&self) -> &ProgramSelector {
        &self.selector
    }

    /// Answer `request` against `snapshot`, which must hold the requested
    /// dataset
    pub fn run(
        &self,
        request: &InteractiveRequest,
        snapshot: &DatasetSnapshot,
    ) -> Result<InteractiveResponse, ProgramError> {
        if request.dataset_id != snapshot.meta.id {
            return Err(ProgramError::DatasetMismatch {
                requested: request.dataset_id,
                loaded: snapshot.meta.id,
            });
        }

        let selection = self.selector.select(&request.question, &snapshot.meta);
        let result = self.executor.execute_snapshot(snapshot, &selection.spec)?;
        let insight = self.summarizer.summarize(&request.question, &result.summary);

        info!(
            dataset_id = request.dataset_id,
            program_version = selection.provenance.tag(),
            returned_rows = result.summary.returned_rows,
            "answered question"
        );

        Ok(InteractiveResponse {
            dataset_id: request.dataset_id,
            question: request.question.clone(),
            query_spec: selection.spec,
            data: result.data,
            columns: result.columns,
            stats: result.summary,
            insight,
            program_version: selection.provenance.tag().to_string(),
            provider: request.provider.clone(),
            model: request.model.clone(),
        })
    }
}
