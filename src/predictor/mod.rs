//! Compiled prediction and program selection
//!
//! A [`CompiledPredictor`] answers questions that resemble captured
//! examples. [`ProgramSelector`] tries it first and falls back to the
//! rule-based generator, recording which path produced the spec.
//! [`compile_program`] builds the compiled artifact offline.

mod compile;
mod compiled;
mod error;
mod select;

pub use compile::{
    compile_program,
    evaluate_trainset,
    score_query_spec,
    CompiledProgram,
    COMPILED_VERSION_PREFIX,
};
pub use compiled::CompiledPredictor;
pub use error::CompileError;
pub use select::{ProgramSelector, Provenance, Selection, RULE_BASED_TAG};
