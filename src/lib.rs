//! nlquery - Answer natural-language questions over tabular datasets
//!
//! This library provides:
//! - Query specification types (QuerySpec, QueryFilter, QueryMetric, QueryOrder)
//! - Dataset snapshots with CSV ingestion and column inference
//! - Rule-based question → spec generation
//! - Nearest-neighbor prediction from captured examples, with offline compilation
//! - In-memory query execution
//! - One-sentence insight summaries
//!
//! # Architecture
//!
//! **Noun modules** (data structures):
//! - `spec/` - query specification (QuerySpec, Aggregation, FilterOp, Direction)
//! - `dataset/` - cell values, column metadata, row snapshots
//! - `trainset/` - captured question/spec examples
//!
//! **Verb modules** (transformations):
//! - `parser/` - YAML → EngineConfig
//! - `generator/` - question + columns → QuerySpec (keyword heuristics)
//! - `predictor/` - question + trainset → QuerySpec, with generator fallback
//! - `executor/` - QuerySpec + rows → ExecutionResult
//! - `summarizer/` - ExecutionSummary → insight sentence
//! - `program/` - all of the above for one request
//!
//! # Example
//!
//! ```ignore
//! use nlquery::{parser, DatasetSnapshot, InteractiveProgram, InteractiveRequest};
//!
//! let config = parser::parse_config_file("nlquery.yaml")?;
//! let snapshot = DatasetSnapshot::from_csv_path(1, "population.csv", None)?;
//! let program = InteractiveProgram::from_config(&config, None);
//! let response = program.run(&InteractiveRequest::new(1, "区別人口の合計は?"), &snapshot)?;
//! println!("{}", response.insight);
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod executor;
pub mod generator;
pub mod parser;
pub mod predictor;
pub mod program;
pub mod spec;
pub mod summarizer;
pub mod trainset;

// Re-export commonly used types
pub use config::EngineConfig;
pub use dataset::{
    extract_index_cols, infer_columns, parse_value, ColumnMetadata, ColumnType, DatasetMeta,
    DatasetSnapshot, Row, Value,
};
pub use error::ParseError;
pub use executor::{
    parse_spec, validate_spec, Clause, ExecutionResult, ExecutionSummary, QueryExecutor,
    QueryValidationError,
};
pub use generator::{GeneratorConfig, MetricKeywords, RuleBasedGenerator};
pub use predictor::{
    compile_program, evaluate_trainset, score_query_spec, CompileError, CompiledPredictor,
    CompiledProgram, ProgramSelector, Provenance, Selection, RULE_BASED_TAG,
};
pub use program::{
    AnalysisRecord, InteractiveProgram, InteractiveRequest, InteractiveResponse, ProgramError,
};
pub use spec::{Aggregation, Direction, FilterOp, QueryFilter, QueryMetric, QueryOrder, QuerySpec};
pub use summarizer::{InsightSummarizer, Locale, SummarizerConfig};
pub use trainset::{ExampleMeta, Trainset, TrainsetExample};
