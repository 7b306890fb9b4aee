//! Predictor error types

use thiserror::Error;

/// Errors raised while compiling a trainset into a program
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// There is nothing to compile
    #[error("Cannot compile an empty trainset")]
    EmptyTrainset,
}
