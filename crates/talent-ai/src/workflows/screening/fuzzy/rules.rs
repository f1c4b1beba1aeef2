use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::config::EngineConfigError;
use super::fuzzifier::FuzzifiedInput;
use super::registry::{FuzzyRegistry, VariableRole};

/// Single antecedent of a rule. All conditions of a rule are AND-ed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    /// Degree of membership in a registered set of `variable`.
    Membership { variable: VariableRole, set: String },
    /// Crisp check that the candidate lists `skill`.
    SkillPresence { skill: String },
    /// Fraction of `skills` the candidate lists.
    SkillOverlap { skills: Vec<String> },
}

impl Condition {
    pub fn membership(variable: VariableRole, set: impl Into<String>) -> Self {
        Condition::Membership {
            variable,
            set: set.into(),
        }
    }

    pub fn skill(skill: impl Into<String>) -> Self {
        Condition::SkillPresence {
            skill: skill.into(),
        }
    }

    pub fn skill_overlap<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::SkillOverlap {
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }

    pub fn degree(&self, input: &FuzzifiedInput) -> f64 {
        match self {
            Condition::Membership { set, .. } => input.degree(set),
            Condition::SkillPresence { skill } => {
                if input.has_skill(skill) {
                    1.0
                } else {
                    0.0
                }
            }
            Condition::SkillOverlap { skills } => {
                let wanted: BTreeSet<String> = skills
                    .iter()
                    .map(|skill| normalize_tag(skill))
                    .filter(|skill| !skill.is_empty())
                    .collect();
                if wanted.is_empty() {
                    return 0.0;
                }
                let matched = wanted.iter().filter(|skill| input.has_skill(skill)).count();
                matched as f64 / wanted.len() as f64
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Condition::Membership { set, .. } => set.clone(),
            Condition::SkillPresence { skill } => format!("has skill {skill}"),
            Condition::SkillOverlap { skills } => format!("knows {}", skills.join("/")),
        }
    }
}

/// Output variable and set a rule concludes into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conclusion {
    pub variable: String,
    pub set: String,
}

impl Conclusion {
    pub fn new(variable: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            set: set.into(),
        }
    }
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub conditions: Vec<Condition>,
    pub conclusion: Conclusion,
    pub description: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

impl Rule {
    pub fn new(
        name: impl Into<String>,
        conditions: Vec<Condition>,
        conclusion: Conclusion,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            conditions,
            conclusion,
            description: description.into(),
            weight: default_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Fuzzy AND (minimum) over the conditions, scaled by the rule weight.
    pub fn strength(&self, input: &FuzzifiedInput) -> f64 {
        let degree = self
            .conditions
            .iter()
            .map(|condition| condition.degree(input))
            .fold(1.0_f64, f64::min);
        (degree * self.weight).clamp(0.0, 1.0)
    }

    fn validate(&self, registry: &FuzzyRegistry) -> Result<(), EngineConfigError> {
        if self.conditions.is_empty() {
            return Err(EngineConfigError::EmptyRule(self.name.clone()));
        }
        if !(self.weight > 0.0 && self.weight <= 1.0) {
            return Err(EngineConfigError::InvalidWeight {
                rule: self.name.clone(),
                weight: self.weight,
            });
        }

        for condition in &self.conditions {
            match condition {
                Condition::Membership { variable, set } => {
                    let owner = registry.variable_of(set).ok_or_else(|| {
                        EngineConfigError::UnknownSet {
                            rule: self.name.clone(),
                            set: set.clone(),
                        }
                    })?;
                    if owner.role != *variable || variable.is_output() {
                        return Err(EngineConfigError::SetVariableMismatch {
                            rule: self.name.clone(),
                            set: set.clone(),
                            expected: variable.label().to_string(),
                        });
                    }
                }
                Condition::SkillPresence { skill } if skill.trim().is_empty() => {
                    return Err(EngineConfigError::EmptySkillCondition(self.name.clone()));
                }
                Condition::SkillOverlap { skills }
                    if skills.is_empty() || skills.iter().any(|skill| skill.trim().is_empty()) =>
                {
                    return Err(EngineConfigError::EmptySkillCondition(self.name.clone()));
                }
                Condition::SkillPresence { .. } | Condition::SkillOverlap { .. } => {}
            }
        }

        let output = registry.output();
        if self.conclusion.variable != output.name {
            return Err(EngineConfigError::SetVariableMismatch {
                rule: self.name.clone(),
                set: self.conclusion.set.clone(),
                expected: output.name.clone(),
            });
        }
        match registry.variable_of(&self.conclusion.set) {
            Some(owner) if owner.role.is_output() => Ok(()),
            Some(_) => Err(EngineConfigError::SetVariableMismatch {
                rule: self.name.clone(),
                set: self.conclusion.set.clone(),
                expected: output.name.clone(),
            }),
            None => Err(EngineConfigError::UnknownSet {
                rule: self.name.clone(),
                set: self.conclusion.set.clone(),
            }),
        }
    }
}

/// Ordered, validated rule collection.
#[derive(Debug, Clone)]
pub struct RuleBase {
    rules: Vec<Rule>,
}

impl RuleBase {
    pub fn new(rules: Vec<Rule>, registry: &FuzzyRegistry) -> Result<Self, EngineConfigError> {
        let mut names = BTreeSet::new();
        for rule in &rules {
            if !names.insert(rule.name.as_str()) {
                return Err(EngineConfigError::DuplicateRule(rule.name.clone()));
            }
            rule.validate(registry)?;
        }
        Ok(Self { rules })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }
}

pub(crate) fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::screening::fuzzy::registry::{
        FuzzySet, LinguisticVariable, OutputDomainSpec,
    };
    use std::collections::BTreeMap;

    fn registry() -> FuzzyRegistry {
        FuzzyRegistry::new(
            vec![
                LinguisticVariable::new(
                    "experience",
                    VariableRole::Experience,
                    vec![FuzzySet::trapezoidal("experience.middle", 1.0, 3.0, 5.0, 7.0)],
                ),
                LinguisticVariable::new(
                    "flexibility",
                    VariableRole::Flexibility,
                    vec![FuzzySet::trapezoidal("flexibility.high", 0.6, 0.8, 1.0, 1.0)],
                ),
                LinguisticVariable::new(
                    "suitability",
                    VariableRole::Output,
                    vec![FuzzySet::trapezoidal(
                        "suitability.excellent",
                        60.0,
                        80.0,
                        100.0,
                        100.0,
                    )],
                ),
            ],
            OutputDomainSpec::default(),
        )
        .expect("valid registry")
    }

    fn excellent() -> Conclusion {
        Conclusion::new("suitability", "suitability.excellent")
    }

    fn input(degrees: &[(&str, f64)], skills: &[&str]) -> FuzzifiedInput {
        let degrees: BTreeMap<String, f64> = degrees
            .iter()
            .map(|(name, degree)| (name.to_string(), *degree))
            .collect();
        FuzzifiedInput::new(degrees, skills.iter().map(|skill| skill.to_string()))
    }

    #[test]
    fn strength_is_minimum_of_conditions() {
        let rule = Rule::new(
            "middle_flexible",
            vec![
                Condition::membership(VariableRole::Experience, "experience.middle"),
                Condition::membership(VariableRole::Flexibility, "flexibility.high"),
            ],
            excellent(),
            "",
        );
        let fuzzified = input(&[("experience.middle", 0.8), ("flexibility.high", 0.35)], &[]);
        assert_eq!(rule.strength(&fuzzified), 0.35);
    }

    #[test]
    fn weight_scales_strength() {
        let rule = Rule::new(
            "weighted",
            vec![Condition::membership(
                VariableRole::Experience,
                "experience.middle",
            )],
            excellent(),
            "",
        )
        .with_weight(0.5);
        let fuzzified = input(&[("experience.middle", 0.8)], &[]);
        assert!((rule.strength(&fuzzified) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn absent_set_reads_as_zero() {
        let rule = Rule::new(
            "flexible",
            vec![Condition::membership(
                VariableRole::Flexibility,
                "flexibility.high",
            )],
            excellent(),
            "",
        );
        assert_eq!(rule.strength(&input(&[], &[])), 0.0);
    }

    #[test]
    fn skill_conditions_are_case_insensitive() {
        let fuzzified = input(&[], &["rust", "python"]);
        assert_eq!(Condition::skill("Rust").degree(&fuzzified), 1.0);
        assert_eq!(Condition::skill("Go").degree(&fuzzified), 0.0);
        let overlap = Condition::skill_overlap(["Python", "Go", "Rust", "Java"]);
        assert_eq!(overlap.degree(&fuzzified), 0.5);
    }

    #[test]
    fn blank_overlap_entries_do_not_dilute_the_ratio() {
        let fuzzified = input(&[], &["rust"]);
        let overlap = Condition::skill_overlap(["Rust", " "]);
        assert_eq!(overlap.degree(&fuzzified), 1.0);
    }

    #[test]
    fn rule_base_rejects_overlap_with_blank_skill() {
        let rule = Rule::new(
            "padded",
            vec![Condition::skill_overlap(["Rust", " "])],
            excellent(),
            "",
        );
        let err = RuleBase::new(vec![rule], &registry()).expect_err("blank skill entry");
        assert!(matches!(err, EngineConfigError::EmptySkillCondition(name) if name == "padded"));

        let rule = Rule::new(
            "nothing",
            vec![Condition::skill_overlap(Vec::<String>::new())],
            excellent(),
            "",
        );
        let err = RuleBase::new(vec![rule], &registry()).expect_err("no skills");
        assert!(matches!(err, EngineConfigError::EmptySkillCondition(_)));
    }

    #[test]
    fn rule_base_rejects_rules_without_conditions() {
        let rule = Rule::new("empty", Vec::new(), excellent(), "");
        let err = RuleBase::new(vec![rule], &registry()).expect_err("empty rule");
        assert!(matches!(err, EngineConfigError::EmptyRule(name) if name == "empty"));
    }

    #[test]
    fn rule_base_rejects_unknown_sets() {
        let rule = Rule::new(
            "lead",
            vec![Condition::membership(
                VariableRole::Experience,
                "experience.lead",
            )],
            excellent(),
            "",
        );
        let err = RuleBase::new(vec![rule], &registry()).expect_err("unknown set");
        assert!(matches!(err, EngineConfigError::UnknownSet { set, .. } if set == "experience.lead"));
    }

    #[test]
    fn rule_base_rejects_set_under_wrong_variable() {
        let rule = Rule::new(
            "mixed_up",
            vec![Condition::membership(
                VariableRole::Flexibility,
                "experience.middle",
            )],
            excellent(),
            "",
        );
        let err = RuleBase::new(vec![rule], &registry()).expect_err("role mismatch");
        assert!(matches!(err, EngineConfigError::SetVariableMismatch { .. }));
    }

    #[test]
    fn rule_base_rejects_input_set_as_conclusion() {
        let rule = Rule::new(
            "backwards",
            vec![Condition::membership(
                VariableRole::Experience,
                "experience.middle",
            )],
            Conclusion::new("suitability", "flexibility.high"),
            "",
        );
        let err = RuleBase::new(vec![rule], &registry()).expect_err("input conclusion");
        assert!(matches!(err, EngineConfigError::SetVariableMismatch { .. }));
    }

    #[test]
    fn rule_base_rejects_out_of_range_weight() {
        let rule = Rule::new(
            "heavy",
            vec![Condition::skill("Rust")],
            excellent(),
            "",
        )
        .with_weight(1.5);
        let err = RuleBase::new(vec![rule], &registry()).expect_err("weight above one");
        assert!(matches!(err, EngineConfigError::InvalidWeight { .. }));
    }

    #[test]
    fn rule_base_rejects_duplicate_names() {
        let rule = Rule::new("dup", vec![Condition::skill("Rust")], excellent(), "");
        let err =
            RuleBase::new(vec![rule.clone(), rule], &registry()).expect_err("duplicate rule");
        assert!(matches!(err, EngineConfigError::DuplicateRule(name) if name == "dup"));
    }
}
