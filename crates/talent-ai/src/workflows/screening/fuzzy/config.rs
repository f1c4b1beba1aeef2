use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::registry::{FuzzySet, LinguisticVariable, OutputDomainSpec, VariableRole};
use super::rules::{Conclusion, Condition, Rule};

/// Name of the output variable in the bundled rule base.
pub const SUITABILITY: &str = "suitability";

/// Linguistic variables, rules and output resolution handed to the engine at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub variables: Vec<LinguisticVariable>,
    pub rules: Vec<Rule>,
    #[serde(default)]
    pub output_domain: OutputDomainSpec,
}

impl EngineConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EngineConfigError> {
        serde_json::from_reader(reader).map_err(EngineConfigError::Parse)
    }

    pub fn from_path(path: &Path) -> Result<Self, EngineConfigError> {
        let file = File::open(path).map_err(|source| EngineConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Bundled rule base for screening software engineers.
    pub fn candidate_screening() -> Self {
        Self {
            variables: vec![
                LinguisticVariable::new(
                    "experience",
                    VariableRole::Experience,
                    vec![
                        FuzzySet::trapezoidal("experience.junior", 0.0, 0.0, 2.0, 4.0),
                        FuzzySet::trapezoidal("experience.middle", 1.0, 3.0, 5.0, 7.0),
                        FuzzySet::trapezoidal("experience.senior", 4.0, 6.0, 10.0, 10.0),
                    ],
                ),
                LinguisticVariable::new(
                    "specialization",
                    VariableRole::Specialization,
                    vec![
                        FuzzySet::trapezoidal("specialization.backend", 0.0, 0.0, 0.4, 0.6),
                        FuzzySet::trapezoidal("specialization.frontend", 0.3, 0.5, 0.7, 0.9),
                        FuzzySet::trapezoidal("specialization.fullstack", 0.6, 0.8, 1.0, 1.0),
                    ],
                ),
                LinguisticVariable::new(
                    "flexibility",
                    VariableRole::Flexibility,
                    vec![
                        FuzzySet::trapezoidal("flexibility.low", 0.0, 0.0, 0.2, 0.5),
                        FuzzySet::trapezoidal("flexibility.medium", 0.3, 0.5, 0.7, 0.9),
                        FuzzySet::trapezoidal("flexibility.high", 0.6, 0.8, 1.0, 1.0),
                    ],
                ),
                LinguisticVariable::new(
                    "skill_match",
                    VariableRole::SkillMatch,
                    vec![
                        FuzzySet::trapezoidal("skill_match.none", 0.0, 0.0, 0.25, 0.5),
                        FuzzySet::triangular("skill_match.partial", 0.25, 0.5, 0.75),
                        FuzzySet::trapezoidal("skill_match.full", 0.5, 0.75, 1.0, 1.0),
                    ],
                ),
                LinguisticVariable::new(
                    "schedule_match",
                    VariableRole::ScheduleMatch,
                    vec![
                        FuzzySet::trapezoidal("schedule_match.none", 0.0, 0.0, 0.3, 0.6),
                        FuzzySet::trapezoidal("schedule_match.full", 0.4, 0.7, 1.0, 1.0),
                    ],
                ),
                LinguisticVariable::new(
                    SUITABILITY,
                    VariableRole::Output,
                    vec![
                        FuzzySet::trapezoidal("suitability.poor", 0.0, 0.0, 20.0, 40.0),
                        FuzzySet::trapezoidal("suitability.average", 25.0, 40.0, 60.0, 75.0),
                        FuzzySet::trapezoidal("suitability.excellent", 60.0, 80.0, 100.0, 100.0),
                    ],
                ),
            ],
            rules: default_rules(),
            output_domain: OutputDomainSpec::default(),
        }
    }
}

fn experience(set: &str) -> Condition {
    Condition::membership(VariableRole::Experience, format!("experience.{set}"))
}

fn specialization(set: &str) -> Condition {
    Condition::membership(VariableRole::Specialization, format!("specialization.{set}"))
}

fn flexibility(set: &str) -> Condition {
    Condition::membership(VariableRole::Flexibility, format!("flexibility.{set}"))
}

fn suitability(set: &str) -> Conclusion {
    Conclusion::new(SUITABILITY, format!("suitability.{set}"))
}

fn default_rules() -> Vec<Rule> {
    vec![
        Rule::new(
            "junior_any_flexibility",
            vec![experience("junior")],
            suitability("average"),
            "Junior developers fit routine tasks",
        ),
        Rule::new(
            "junior_high_flexibility",
            vec![experience("junior"), flexibility("high")],
            suitability("excellent"),
            "Junior with a highly flexible schedule is a strong pick",
        ),
        Rule::new(
            "junior_fullstack",
            vec![experience("junior"), specialization("fullstack")],
            suitability("excellent"),
            "Junior fullstack developers are promising",
        ),
        Rule::new(
            "middle_backend",
            vec![experience("middle"), specialization("backend")],
            suitability("excellent"),
            "Middle backend developers are in high demand",
        ),
        Rule::new(
            "middle_frontend",
            vec![experience("middle"), specialization("frontend")],
            suitability("excellent"),
            "Middle frontend developers are in demand",
        ),
        Rule::new(
            "middle_fullstack",
            vec![experience("middle"), specialization("fullstack")],
            suitability("excellent"),
            "Middle fullstack developers cover the whole stack",
        ),
        Rule::new(
            "middle_low_flexibility",
            vec![experience("middle"), flexibility("low")],
            suitability("average"),
            "Middle developer with a rigid schedule is an average fit",
        ),
        Rule::new(
            "senior_any_type",
            vec![experience("senior")],
            suitability("excellent"),
            "Senior developers handle complex work",
        ),
        Rule::new(
            "senior_low_flexibility",
            vec![experience("senior"), flexibility("low")],
            suitability("average"),
            "Senior with a rigid schedule has limited placement options",
        ),
        Rule::new(
            "any_level_high_flexibility",
            vec![flexibility("high")],
            suitability("excellent"),
            "High schedule flexibility is valued at every level",
        ),
        Rule::new(
            "any_level_low_flexibility",
            vec![flexibility("low")],
            suitability("poor"),
            "Low schedule flexibility reduces attractiveness",
        ),
        Rule::new(
            "any_level_fullstack",
            vec![specialization("fullstack")],
            suitability("excellent"),
            "Fullstack developers are always in demand",
        ),
        Rule::new(
            "junior_backend_only",
            vec![experience("junior"), specialization("backend")],
            suitability("poor"),
            "Junior backend without other skills is a weak fit",
        ),
        Rule::new(
            "senior_rust_specialist",
            vec![experience("senior"), Condition::skill("Rust")],
            suitability("excellent"),
            "Senior engineers with Rust experience are scarce",
        ),
        Rule::new(
            "middle_polyglot_backend",
            vec![
                experience("middle"),
                Condition::skill_overlap(["Python", "Java", "Go", "Rust"]),
            ],
            suitability("excellent"),
            "Middle developers spanning several backend languages",
        )
        .with_weight(0.8),
        Rule::new(
            "full_skill_match",
            vec![Condition::membership(
                VariableRole::SkillMatch,
                "skill_match.full",
            )],
            suitability("excellent"),
            "Candidate covers the required skills",
        ),
        Rule::new(
            "partial_skill_match",
            vec![Condition::membership(
                VariableRole::SkillMatch,
                "skill_match.partial",
            )],
            suitability("average"),
            "Candidate covers part of the required skills",
        ),
        Rule::new(
            "missing_required_skills",
            vec![Condition::membership(
                VariableRole::SkillMatch,
                "skill_match.none",
            )],
            suitability("poor"),
            "Candidate lacks the required skills",
        ),
        Rule::new(
            "schedule_mismatch",
            vec![Condition::membership(
                VariableRole::ScheduleMatch,
                "schedule_match.none",
            )],
            suitability("poor"),
            "Candidate does not offer the required work formats",
        ),
    ]
}

/// Static configuration problems detected while building the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineConfigError {
    #[error("failed to read engine configuration {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid engine configuration: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("fuzzy set '{set}' is {shape} and needs {expected} parameters, got {actual}")]
    ParameterCount {
        set: String,
        shape: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("fuzzy set '{set}' has non-finite parameters")]
    NonFiniteParameter { set: String },
    #[error("fuzzy set '{set}' breakpoints must be non-decreasing: {parameters:?}")]
    UnorderedParameters { set: String, parameters: Vec<f64> },
    #[error("fuzzy set '{0}' is defined more than once")]
    DuplicateSet(String),
    #[error("linguistic variable '{0}' has no fuzzy sets")]
    EmptyVariable(String),
    #[error("variables '{first}' and '{second}' both claim the {role} role")]
    DuplicateVariable {
        role: &'static str,
        first: String,
        second: String,
    },
    #[error("no output variable configured")]
    MissingOutputVariable,
    #[error("output domain [{start}, {end}] with {samples} samples is invalid")]
    InvalidOutputDomain { start: f64, end: f64, samples: usize },
    #[error("rule '{0}' has no conditions")]
    EmptyRule(String),
    #[error("rule '{0}' is defined more than once")]
    DuplicateRule(String),
    #[error("rule '{rule}' references unknown fuzzy set '{set}'")]
    UnknownSet { rule: String, set: String },
    #[error("rule '{rule}' uses fuzzy set '{set}' outside variable '{expected}'")]
    SetVariableMismatch {
        rule: String,
        set: String,
        expected: String,
    },
    #[error("rule '{0}' has a skill condition without skills")]
    EmptySkillCondition(String),
    #[error("rule '{rule}' weight {weight} must be within (0, 1]")]
    InvalidWeight { rule: String, weight: f64 },
}
