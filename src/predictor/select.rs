//! Choosing between the compiled predictor and the rule-based generator

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::compiled::CompiledPredictor;
use crate::dataset::DatasetMeta;
use crate::generator::RuleBasedGenerator;
use crate::spec::QuerySpec;

/// Provenance tag reported when the rule-based generator produced the spec
pub const RULE_BASED_TAG: &str = "rule-based-v1";

/// Which path produced a query spec
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Provenance {
    /// A compiled artifact matched; carries its version
    Compiled { version: String },
    /// The rule-based generator answered; carries the fallback tag
    RuleBased { tag: String },
}

impl Provenance {
    /// The tag forwarded to callers and the audit record
    pub fn tag(&self) -> &str {
        match self {
            Provenance::Compiled { version } => version,
            Provenance::RuleBased { tag } => tag,
        }
    }

    pub fn is_compiled(&self) -> bool {
        matches!(self, Provenance::Compiled { .. })
    }
}

/// A selected spec together with where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub spec: QuerySpec,
    pub provenance: Provenance,
}

/// Tries the compiled predictor first, then falls back to the generator
#[derive(Debug, Clone)]
pub struct ProgramSelector {
    predictor: Option<CompiledPredictor>,
    generator: RuleBasedGenerator,
    fallback_tag: String,
}

impl Default for ProgramSelector {
    fn default() -> Self {
        Self::new(RuleBasedGenerator::default())
    }
}

impl ProgramSelector {
    /// A selector with no compiled predictor
    pub fn new(generator: RuleBasedGenerator) -> Self {
        Self {
            predictor: None,
            generator,
            fallback_tag: RULE_BASED_TAG.to_string(),
        }
    }

    pub fn with_predictor(mut self, predictor: CompiledPredictor) -> Self {
        self.predictor = Some(predictor);
        self
    }

    pub fn with_fallback_tag(mut self, tag: impl Into<String>) -> Self {
        self.fallback_tag = tag.into();
        self
    }

    pub fn predictor(&self) -> Option<&CompiledPredictor> {
        self.predictor.as_ref()
    }

    pub fn generator(&self) -> &RuleBasedGenerator {
        &self.generator
    }

    /// Produce a spec for `question`. Never fails: the generator is total.
    pub fn select(&self, question: &str, dataset: &DatasetMeta) -> Selection {
        if let Some(predictor) = &self.predictor {
            if let Some(spec) = predictor.predict(question, dataset) {
                debug!(version = predictor.version(), "selected compiled prediction");
                return Selection {
                    spec,
                    provenance: Provenance::Compiled {
                        version: predictor.version().to_string(),
                    },
                };
            }
        }

        debug!(tag = %self.fallback_tag, "falling back to rule-based generator");
        Selection {
            spec: self.generator.generate(question, dataset),
            provenance: Provenance::RuleBased {
                tag: self.fallback_tag.clone(),
            },
        }
    }
}
