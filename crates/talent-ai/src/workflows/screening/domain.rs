use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for candidates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl std::fmt::Display for CandidateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Candidate record as supplied by the record store or an API caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub years_experience: Option<u32>,
    #[serde(default)]
    pub work_formats: Vec<String>,
    #[serde(default)]
    pub expected_salary: Option<u32>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: CandidateId(id.into()),
            name: name.into(),
            skills: Vec::new(),
            level: None,
            years_experience: None,
            work_formats: Vec::new(),
            expected_salary: None,
        }
    }

    pub fn with_years(mut self, years: u32) -> Self {
        self.years_experience = Some(years);
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_work_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.work_formats = formats.into_iter().map(Into::into).collect();
        self
    }
}

/// Vacancy requirements a candidate can optionally be scored against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementProfile {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub formats: Vec<String>,
}

impl RequirementProfile {
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.formats.is_empty()
    }
}

/// Crisp inputs consumed by the fuzzifier.
///
/// `skill_match` and `schedule_match` are only present when a requirement profile lists the
/// corresponding tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandidateAttributes {
    pub years_experience: f64,
    pub specialization: f64,
    pub flexibility: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_match: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_match: Option<f64>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
}
