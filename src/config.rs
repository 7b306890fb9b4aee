//! Engine configuration
//!
//! Every section is optional in YAML; missing fields keep the built-in
//! defaults.

use serde::{Deserialize, Serialize};

use crate::generator::{GeneratorConfig, RuleBasedGenerator};
use crate::predictor::{CompiledPredictor, ProgramSelector, RULE_BASED_TAG};
use crate::summarizer::{InsightSummarizer, SummarizerConfig};

/// Top-level configuration of the question-answering pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub generator: GeneratorConfig,
    pub summarizer: SummarizerConfig,
    /// Provenance tag reported when the rule-based generator answers
    pub fallback_tag: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            summarizer: SummarizerConfig::default(),
            fallback_tag: RULE_BASED_TAG.to_string(),
        }
    }
}

impl EngineConfig {
    pub fn build_generator(&self) -> RuleBasedGenerator {
        RuleBasedGenerator::with_config(self.generator.clone())
    }

    /// A selector over the configured generator, trying `predictor` first
    /// when one is given
    pub fn build_selector(&self, predictor: Option<CompiledPredictor>) -> ProgramSelector {
        let selector = ProgramSelector::new(self.build_generator()).with_fallback_tag(self.fallback_tag.clone());
        match predictor {
            Some(predictor) => selector.with_predictor(predictor),
            None => selector,
        }
    }

    pub fn build_summarizer(&self) -> InsightSummarizer {
        InsightSummarizer::with_config(self.summarizer.clone())
    }
}
