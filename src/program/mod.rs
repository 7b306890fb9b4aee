//! Interactive analysis program
//!
//! Wires the selector, executor and summarizer into one call per question
//! and produces the audit record for it.

mod error;
mod run;

pub use error::ProgramError;
pub use run::{AnalysisRecord, InteractiveProgram, InteractiveRequest, InteractiveResponse};
