//! Training set types (nouns)
//!
//! Previously captured question/spec pairs consumed by the compiled
//! predictor.

mod example;

pub use example::{ExampleMeta, Trainset, TrainsetExample};
