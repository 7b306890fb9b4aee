//! Rule-based generator (verb module)
//!
//! Question + dataset columns → QuerySpec, using keyword heuristics.

mod config;
mod generate;

pub use config::{GeneratorConfig, MetricKeywords};
pub use generate::RuleBasedGenerator;
