use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::config::EngineConfigError;
use super::membership::{self, MembershipShape};

/// Named membership curve, e.g. `experience.senior`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySet {
    pub name: String,
    pub shape: MembershipShape,
    pub parameters: Vec<f64>,
}

impl FuzzySet {
    pub fn new(name: impl Into<String>, shape: MembershipShape, parameters: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            shape,
            parameters,
        }
    }

    pub fn triangular(name: impl Into<String>, a: f64, b: f64, c: f64) -> Self {
        Self::new(name, MembershipShape::Triangular, vec![a, b, c])
    }

    pub fn trapezoidal(name: impl Into<String>, a: f64, b: f64, c: f64, d: f64) -> Self {
        Self::new(name, MembershipShape::Trapezoidal, vec![a, b, c, d])
    }

    pub fn gaussian(name: impl Into<String>, mean: f64, sigma: f64) -> Self {
        Self::new(name, MembershipShape::Gaussian, vec![mean, sigma])
    }

    pub fn membership(&self, x: f64) -> f64 {
        membership::evaluate(x, self.shape, &self.parameters)
    }

    fn validate(&self) -> Result<(), EngineConfigError> {
        let expected = self.shape.arity();
        if self.parameters.len() != expected {
            return Err(EngineConfigError::ParameterCount {
                set: self.name.clone(),
                shape: self.shape.label(),
                expected,
                actual: self.parameters.len(),
            });
        }

        if self.parameters.iter().any(|value| !value.is_finite()) {
            return Err(EngineConfigError::NonFiniteParameter {
                set: self.name.clone(),
            });
        }

        if self.shape.requires_ordered_parameters()
            && self.parameters.windows(2).any(|pair| pair[0] > pair[1])
        {
            return Err(EngineConfigError::UnorderedParameters {
                set: self.name.clone(),
                parameters: self.parameters.clone(),
            });
        }

        Ok(())
    }
}

/// Dimension a linguistic variable partitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableRole {
    Experience,
    Specialization,
    Flexibility,
    SkillMatch,
    ScheduleMatch,
    Output,
}

impl VariableRole {
    pub const fn label(self) -> &'static str {
        match self {
            VariableRole::Experience => "experience",
            VariableRole::Specialization => "specialization",
            VariableRole::Flexibility => "flexibility",
            VariableRole::SkillMatch => "skill_match",
            VariableRole::ScheduleMatch => "schedule_match",
            VariableRole::Output => "output",
        }
    }

    pub const fn is_output(self) -> bool {
        matches!(self, VariableRole::Output)
    }
}

/// Group of overlapping fuzzy sets covering one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinguisticVariable {
    pub name: String,
    pub role: VariableRole,
    pub sets: Vec<FuzzySet>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, role: VariableRole, sets: Vec<FuzzySet>) -> Self {
        Self {
            name: name.into(),
            role,
            sets,
        }
    }
}

/// Range and resolution of the discretized output universe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutputDomainSpec {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

impl Default for OutputDomainSpec {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 100.0,
            samples: 1001,
        }
    }
}

/// Evenly spaced sample points, both ends included.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputDomain {
    values: Vec<f64>,
}

impl OutputDomain {
    pub fn new(spec: OutputDomainSpec) -> Result<Self, EngineConfigError> {
        let OutputDomainSpec {
            start,
            end,
            samples,
        } = spec;
        // Scores are percentages, so the universe has to sit inside [0, 100].
        if samples < 2
            || !start.is_finite()
            || !end.is_finite()
            || start >= end
            || start < 0.0
            || end > 100.0
        {
            return Err(EngineConfigError::InvalidOutputDomain {
                start,
                end,
                samples,
            });
        }

        let step = (end - start) / (samples - 1) as f64;
        let mut values: Vec<f64> = (0..samples).map(|i| start + step * i as f64).collect();
        // Pin the last sample so accumulated rounding never leaves the range.
        if let Some(last) = values.last_mut() {
            *last = end;
        }

        Ok(Self { values })
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn start(&self) -> f64 {
        self.values.first().copied().unwrap_or_default()
    }

    pub fn end(&self) -> f64 {
        self.values.last().copied().unwrap_or_default()
    }
}

/// Immutable lookup of every fuzzy set the engine knows about.
#[derive(Debug, Clone)]
pub struct FuzzyRegistry {
    variables: Vec<LinguisticVariable>,
    index: BTreeMap<String, (usize, usize)>,
    output: usize,
    domain: OutputDomain,
}

impl FuzzyRegistry {
    pub fn new(
        variables: Vec<LinguisticVariable>,
        domain: OutputDomainSpec,
    ) -> Result<Self, EngineConfigError> {
        let domain = OutputDomain::new(domain)?;
        let mut index = BTreeMap::new();
        let mut roles = BTreeMap::new();

        for (variable_idx, variable) in variables.iter().enumerate() {
            if variable.sets.is_empty() {
                return Err(EngineConfigError::EmptyVariable(variable.name.clone()));
            }
            if let Some(previous) = roles.insert(variable.role, variable_idx) {
                return Err(EngineConfigError::DuplicateVariable {
                    role: variable.role.label(),
                    first: variables[previous].name.clone(),
                    second: variable.name.clone(),
                });
            }

            for (set_idx, set) in variable.sets.iter().enumerate() {
                set.validate()?;
                if index
                    .insert(set.name.clone(), (variable_idx, set_idx))
                    .is_some()
                {
                    return Err(EngineConfigError::DuplicateSet(set.name.clone()));
                }
            }
        }

        let output = roles
            .get(&VariableRole::Output)
            .copied()
            .ok_or(EngineConfigError::MissingOutputVariable)?;

        Ok(Self {
            variables,
            index,
            output,
            domain,
        })
    }

    pub fn set(&self, name: &str) -> Option<&FuzzySet> {
        self.index
            .get(name)
            .map(|&(variable, set)| &self.variables[variable].sets[set])
    }

    /// Variable that owns the named set.
    pub fn variable_of(&self, set: &str) -> Option<&LinguisticVariable> {
        self.index
            .get(set)
            .map(|&(variable, _)| &self.variables[variable])
    }

    pub fn variable(&self, role: VariableRole) -> Option<&LinguisticVariable> {
        self.variables.iter().find(|variable| variable.role == role)
    }

    pub fn variables(&self) -> &[LinguisticVariable] {
        &self.variables
    }

    pub fn inputs(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.variables
            .iter()
            .filter(|variable| !variable.role.is_output())
    }

    pub fn output(&self) -> &LinguisticVariable {
        &self.variables[self.output]
    }

    pub fn domain(&self) -> &OutputDomain {
        &self.domain
    }
}
