//! Interactive program error types

use thiserror::Error;

use crate::executor::QueryValidationError;

/// Errors that can occur while answering a question
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProgramError {
    /// The snapshot handed in belongs to another dataset
    #[error("Request targets dataset {requested} but snapshot holds dataset {loaded}")]
    DatasetMismatch { requested: i64, loaded: i64 },
    /// The selected spec does not fit the dataset
    #[error(transparent)]
    Validation(#[from] QueryValidationError),
}
