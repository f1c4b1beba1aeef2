use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::fuzzifier::FuzzifiedInput;
use super::registry::FuzzyRegistry;
use super::rules::RuleBase;

/// Rule that fired for a candidate, kept for explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivatedRule {
    pub rule_name: String,
    pub strength: f64,
    pub output_set: String,
    pub description: String,
}

/// Membership of one output set sampled over the output domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputCurve {
    pub set: String,
    pub membership: Vec<f64>,
}

impl OutputCurve {
    pub fn peak(&self) -> f64 {
        self.membership.iter().copied().fold(0.0, f64::max)
    }
}

/// Per-set clipped curves after max-min composition, in output declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedOutput {
    curves: Vec<OutputCurve>,
}

impl AggregatedOutput {
    pub fn from_curves(curves: Vec<OutputCurve>) -> Self {
        Self { curves }
    }

    pub fn curves(&self) -> &[OutputCurve] {
        &self.curves
    }

    pub fn curve(&self, set: &str) -> Option<&OutputCurve> {
        self.curves.iter().find(|curve| curve.set == set)
    }

    /// Pointwise maximum across every set.
    pub fn combined(&self) -> Vec<f64> {
        let len = self
            .curves
            .iter()
            .map(|curve| curve.membership.len())
            .max()
            .unwrap_or(0);
        let mut combined = vec![0.0; len];
        for curve in &self.curves {
            for (slot, &value) in combined.iter_mut().zip(&curve.membership) {
                *slot = f64::max(*slot, value);
            }
        }
        combined
    }

    pub fn is_silent(&self) -> bool {
        self.curves
            .iter()
            .all(|curve| curve.membership.iter().all(|&value| value == 0.0))
    }
}

/// Result of running the rule base against one fuzzified input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inference {
    pub aggregated: AggregatedOutput,
    /// Fired rules in rule-base declaration order.
    pub activated: Vec<ActivatedRule>,
}

/// Unclipped output curves, sampled once when the engine is built.
#[derive(Debug, Clone)]
pub(crate) struct BaseCurves {
    curves: Vec<OutputCurve>,
    index: BTreeMap<String, usize>,
}

impl BaseCurves {
    pub(crate) fn sample(registry: &FuzzyRegistry) -> Self {
        let domain = registry.domain().values();
        let curves: Vec<OutputCurve> = registry
            .output()
            .sets
            .iter()
            .map(|set| OutputCurve {
                set: set.name.clone(),
                membership: domain.iter().map(|&x| set.membership(x)).collect(),
            })
            .collect();
        let index = curves
            .iter()
            .enumerate()
            .map(|(idx, curve)| (curve.set.clone(), idx))
            .collect();
        Self { curves, index }
    }

    fn silent(&self) -> AggregatedOutput {
        AggregatedOutput {
            curves: self
                .curves
                .iter()
                .map(|curve| OutputCurve {
                    set: curve.set.clone(),
                    membership: vec![0.0; curve.membership.len()],
                })
                .collect(),
        }
    }
}

pub(crate) fn infer(rules: &RuleBase, base: &BaseCurves, input: &FuzzifiedInput) -> Inference {
    let mut aggregated = base.silent();
    let mut activated = Vec::new();

    for rule in rules.iter() {
        let strength = rule.strength(input);
        if strength <= 0.0 {
            continue;
        }
        let Some(&idx) = base.index.get(&rule.conclusion.set) else {
            continue;
        };

        // Mamdani implication clips the base curve; rules sharing a conclusion combine by max.
        let target = &mut aggregated.curves[idx].membership;
        for (slot, &reference) in target.iter_mut().zip(&base.curves[idx].membership) {
            *slot = f64::max(*slot, f64::min(reference, strength));
        }

        activated.push(ActivatedRule {
            rule_name: rule.name.clone(),
            strength,
            output_set: rule.conclusion.set.clone(),
            description: rule.description.clone(),
        });
    }

    Inference {
        aggregated,
        activated,
    }
}
