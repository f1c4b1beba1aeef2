//! Candidate screening: fuzzy suitability scoring, ranking and explanation.

pub mod domain;
pub mod fuzzy;
pub mod records;
pub mod router;
pub mod scoring;
pub mod specialization;

#[cfg(test)]
mod tests;

pub use domain::{Candidate, CandidateAttributes, CandidateId, RequirementProfile};
pub use fuzzy::{EngineConfig, EngineConfigError, FuzzyEngine};
pub use records::{load_candidates, read_candidates, CandidateImportError};
pub use router::{screening_router, RankRequest, RankResponse, ScoreRequest};
pub use scoring::{
    CandidateScorer, RankingSummary, RecommendationTier, ScoreExplanation, ScoreResult, TierPolicy,
};
pub use specialization::{SkillCatalog, WorkFormatCatalog};
