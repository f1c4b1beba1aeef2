use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::registry::{FuzzyRegistry, VariableRole};
use super::rules::normalize_tag;
use crate::workflows::screening::domain::CandidateAttributes;

/// Degrees of membership for one candidate, keyed by fuzzy-set name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuzzifiedInput {
    degrees: BTreeMap<String, f64>,
    skills: BTreeSet<String>,
}

impl FuzzifiedInput {
    pub fn new<I, S>(degrees: BTreeMap<String, f64>, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            degrees,
            skills: skills
                .into_iter()
                .map(|skill| normalize_tag(skill.as_ref()))
                .filter(|skill| !skill.is_empty())
                .collect(),
        }
    }

    /// Membership degree for `set`; sets that were not fuzzified read as zero.
    pub fn degree(&self, set: &str) -> f64 {
        self.degrees.get(set).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, set: &str) -> bool {
        self.degrees.contains_key(set)
    }

    pub fn has_skill(&self, skill: &str) -> bool {
        self.skills.contains(&normalize_tag(skill))
    }

    pub fn degrees(&self) -> &BTreeMap<String, f64> {
        &self.degrees
    }

    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }
}

/// Evaluate every input set against the matching crisp attribute.
///
/// Match-ratio variables are skipped when the attribute is absent, so rules that depend on a
/// requirement profile stay silent when no profile was supplied.
pub fn fuzzify(registry: &FuzzyRegistry, attributes: &CandidateAttributes) -> FuzzifiedInput {
    let mut degrees = BTreeMap::new();

    for variable in registry.inputs() {
        let Some(value) = crisp_value(attributes, variable.role) else {
            continue;
        };
        for set in &variable.sets {
            degrees.insert(set.name.clone(), set.membership(value));
        }
    }

    FuzzifiedInput::new(degrees, &attributes.skills)
}

fn crisp_value(attributes: &CandidateAttributes, role: VariableRole) -> Option<f64> {
    let value = match role {
        VariableRole::Experience => Some(attributes.years_experience),
        VariableRole::Specialization => Some(attributes.specialization),
        VariableRole::Flexibility => Some(attributes.flexibility),
        VariableRole::SkillMatch => attributes.skill_match,
        VariableRole::ScheduleMatch => attributes.schedule_match,
        VariableRole::Output => None,
    }?;

    Some(if value.is_finite() { value } else { 0.0 })
}
