//! Mamdani fuzzy inference: membership curves, fuzzification, rule evaluation and centroid
//! defuzzification over a discretized output domain.

pub mod config;
pub mod defuzzify;
pub mod fuzzifier;
pub mod inference;
pub mod membership;
pub mod registry;
pub mod rules;

pub use config::{EngineConfig, EngineConfigError, SUITABILITY};
pub use defuzzify::Centroid;
pub use fuzzifier::FuzzifiedInput;
pub use inference::{ActivatedRule, AggregatedOutput, Inference, OutputCurve};
pub use membership::MembershipShape;
pub use registry::{
    FuzzyRegistry, FuzzySet, LinguisticVariable, OutputDomain, OutputDomainSpec, VariableRole,
};
pub use rules::{Conclusion, Condition, Rule, RuleBase};

use serde::Serialize;
use tracing::debug;

use super::domain::CandidateAttributes;
use inference::BaseCurves;

/// Validated, immutable inference engine. Safe to share across threads.
#[derive(Debug, Clone)]
pub struct FuzzyEngine {
    registry: FuzzyRegistry,
    rules: RuleBase,
    base: BaseCurves,
}

/// Every intermediate produced while scoring one candidate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineEvaluation {
    pub fuzzified: FuzzifiedInput,
    pub inference: Inference,
    pub centroid: Centroid,
}

impl FuzzyEngine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineConfigError> {
        let EngineConfig {
            variables,
            rules,
            output_domain,
        } = config;

        let registry = FuzzyRegistry::new(variables, output_domain)?;
        let rules = RuleBase::new(rules, &registry)?;
        let base = BaseCurves::sample(&registry);

        debug!(
            variables = registry.variables().len(),
            rules = rules.len(),
            samples = registry.domain().len(),
            "fuzzy engine initialized"
        );

        Ok(Self {
            registry,
            rules,
            base,
        })
    }

    pub fn registry(&self) -> &FuzzyRegistry {
        &self.registry
    }

    pub fn rules(&self) -> &RuleBase {
        &self.rules
    }

    pub fn fuzzify(&self, attributes: &CandidateAttributes) -> FuzzifiedInput {
        fuzzifier::fuzzify(&self.registry, attributes)
    }

    pub fn infer(&self, fuzzified: &FuzzifiedInput) -> Inference {
        inference::infer(&self.rules, &self.base, fuzzified)
    }

    pub fn centroid(&self, aggregated: &AggregatedOutput) -> Centroid {
        defuzzify::centroid(aggregated, self.registry.domain())
    }

    pub fn defuzzify(&self, aggregated: &AggregatedOutput) -> f64 {
        self.centroid(aggregated).value
    }

    /// Run fuzzify, infer and defuzzify in sequence, keeping each stage's output.
    pub fn evaluate(&self, attributes: &CandidateAttributes) -> EngineEvaluation {
        let fuzzified = self.fuzzify(attributes);
        let inference = self.infer(&fuzzified);
        let centroid = self.centroid(&inference.aggregated);
        EngineEvaluation {
            fuzzified,
            inference,
            centroid,
        }
    }
}
