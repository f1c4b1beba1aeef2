use std::sync::Arc;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::domain::{Candidate, CandidateAttributes, CandidateId, RequirementProfile};
use super::fuzzy::{
    ActivatedRule, AggregatedOutput, Centroid, EngineConfig, EngineConfigError, FuzzifiedInput,
    FuzzyEngine,
};
use super::specialization::{schedule_overlap, skill_overlap, SkillCatalog, WorkFormatCatalog};
use crate::config::ScreeningConfig;

pub const DEFAULT_EXCELLENT_THRESHOLD: f64 = 70.0;
pub const DEFAULT_GOOD_THRESHOLD: f64 = 40.0;

/// Coarse recommendation attached to a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Excellent,
    Good,
    Low,
}

impl RecommendationTier {
    pub const fn label(self) -> &'static str {
        match self {
            RecommendationTier::Excellent => "excellent",
            RecommendationTier::Good => "good",
            RecommendationTier::Low => "low",
        }
    }
}

/// Step function from score to tier, with the text shown to reviewers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub excellent_threshold: f64,
    pub good_threshold: f64,
    pub excellent_label: String,
    pub good_label: String,
    pub low_label: String,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            excellent_threshold: DEFAULT_EXCELLENT_THRESHOLD,
            good_threshold: DEFAULT_GOOD_THRESHOLD,
            excellent_label: "Excellent match - high priority".to_string(),
            good_label: "Good match - recommended for review".to_string(),
            low_label: "Low match - not recommended".to_string(),
        }
    }
}

impl TierPolicy {
    pub fn with_thresholds(excellent_threshold: f64, good_threshold: f64) -> Self {
        Self {
            excellent_threshold,
            good_threshold,
            ..Self::default()
        }
    }

    pub fn classify(&self, score: f64) -> RecommendationTier {
        if score >= self.excellent_threshold {
            RecommendationTier::Excellent
        } else if score >= self.good_threshold {
            RecommendationTier::Good
        } else {
            RecommendationTier::Low
        }
    }

    pub fn recommendation(&self, tier: RecommendationTier) -> &str {
        match tier {
            RecommendationTier::Excellent => &self.excellent_label,
            RecommendationTier::Good => &self.good_label,
            RecommendationTier::Low => &self.low_label,
        }
    }
}

/// Final suitability of one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub candidate_id: CandidateId,
    pub candidate_name: String,
    pub final_score: f64,
    /// Strongest first; rules of equal strength keep rule-base order.
    pub activated_rules: Vec<ActivatedRule>,
    pub recommendation_tier: RecommendationTier,
    pub recommendation: String,
}

impl ScoreResult {
    pub fn top_rule(&self) -> Option<&ActivatedRule> {
        self.activated_rules.first()
    }
}

/// Score plus every pipeline intermediate, for diagnostic output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreExplanation {
    pub result: ScoreResult,
    pub attributes: CandidateAttributes,
    pub fuzzified: FuzzifiedInput,
    pub aggregated: AggregatedOutput,
    /// Height of the combined output curve.
    pub combined_peak: f64,
    pub centroid: Centroid,
}

/// Candidate names grouped by tier, in ranking order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSummary {
    pub total: usize,
    pub excellent: Vec<String>,
    pub good: Vec<String>,
    pub low: Vec<String>,
}

impl RankingSummary {
    pub fn from_results(results: &[ScoreResult]) -> Self {
        let mut summary = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            let bucket = match result.recommendation_tier {
                RecommendationTier::Excellent => &mut summary.excellent,
                RecommendationTier::Good => &mut summary.good,
                RecommendationTier::Low => &mut summary.low,
            };
            bucket.push(result.candidate_name.clone());
        }
        summary
    }
}

/// Runs candidates through the fuzzy engine and ranks them.
#[derive(Debug, Clone)]
pub struct CandidateScorer {
    engine: Arc<FuzzyEngine>,
    tiers: TierPolicy,
    skills: SkillCatalog,
    formats: WorkFormatCatalog,
    parallel: bool,
}

impl CandidateScorer {
    pub fn new(engine: Arc<FuzzyEngine>, tiers: TierPolicy) -> Self {
        Self {
            engine,
            tiers,
            skills: SkillCatalog::default(),
            formats: WorkFormatCatalog::default(),
            parallel: false,
        }
    }

    /// Build the engine from the configured rulebook, or the bundled one when none is set.
    pub fn from_config(config: &ScreeningConfig) -> Result<Self, EngineConfigError> {
        let engine_config = match &config.engine_config {
            Some(path) => {
                info!(path = %path.display(), "loading fuzzy rulebook");
                EngineConfig::from_path(path)?
            }
            None => EngineConfig::candidate_screening(),
        };
        let engine = FuzzyEngine::new(engine_config)?;
        Ok(Self::new(Arc::new(engine), config.tiers.clone())
            .with_parallelism(config.parallel_batch))
    }

    pub fn with_parallelism(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_catalogs(mut self, skills: SkillCatalog, formats: WorkFormatCatalog) -> Self {
        self.skills = skills;
        self.formats = formats;
        self
    }

    pub fn engine(&self) -> &FuzzyEngine {
        &self.engine
    }

    pub fn tiers(&self) -> &TierPolicy {
        &self.tiers
    }

    /// Crisp attributes for the fuzzifier. Missing years read as zero.
    pub fn attributes(
        &self,
        candidate: &Candidate,
        profile: Option<&RequirementProfile>,
    ) -> CandidateAttributes {
        let (skill_match, schedule_match) = match profile {
            Some(profile) => (
                skill_overlap(&candidate.skills, &profile.skills),
                schedule_overlap(&self.formats, &candidate.work_formats, &profile.formats),
            ),
            None => (None, None),
        };

        CandidateAttributes {
            years_experience: f64::from(candidate.years_experience.unwrap_or(0)),
            specialization: self.skills.specialization(&candidate.skills),
            flexibility: self.formats.flexibility(&candidate.work_formats),
            skill_match,
            schedule_match,
            skills: candidate.skills.iter().cloned().collect(),
        }
    }

    pub fn score(&self, candidate: &Candidate, profile: Option<&RequirementProfile>) -> ScoreResult {
        self.explain(candidate, profile).result
    }

    pub fn explain(
        &self,
        candidate: &Candidate,
        profile: Option<&RequirementProfile>,
    ) -> ScoreExplanation {
        let attributes = self.attributes(candidate, profile);
        let evaluation = self.engine.evaluate(&attributes);

        // The output domain is validated to lie inside [0, 100]; this only absorbs rounding.
        let final_score = evaluation.centroid.value.clamp(0.0, 100.0);
        let mut activated_rules = evaluation.inference.activated;
        activated_rules.sort_by(|a, b| b.strength.total_cmp(&a.strength));

        let recommendation_tier = self.tiers.classify(final_score);
        let result = ScoreResult {
            candidate_id: candidate.id.clone(),
            candidate_name: candidate.name.clone(),
            final_score,
            activated_rules,
            recommendation_tier,
            recommendation: self.tiers.recommendation(recommendation_tier).to_string(),
        };

        debug!(
            candidate = %result.candidate_id,
            score = result.final_score,
            fired = result.activated_rules.len(),
            "candidate scored"
        );

        let aggregated = evaluation.inference.aggregated;
        let combined_peak = aggregated.combined().into_iter().fold(0.0, f64::max);

        ScoreExplanation {
            result,
            attributes,
            fuzzified: evaluation.fuzzified,
            aggregated,
            combined_peak,
            centroid: evaluation.centroid,
        }
    }

    /// Score every candidate and sort by descending score; ties keep input order.
    pub fn score_batch(
        &self,
        candidates: &[Candidate],
        profile: Option<&RequirementProfile>,
    ) -> Vec<ScoreResult> {
        let mut results: Vec<ScoreResult> = if self.parallel {
            candidates
                .par_iter()
                .map(|candidate| self.score(candidate, profile))
                .collect()
        } else {
            candidates
                .iter()
                .map(|candidate| self.score(candidate, profile))
                .collect()
        };

        results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

        info!(
            candidates = results.len(),
            parallel = self.parallel,
            "candidate batch ranked"
        );
        results
    }

    pub fn summarize(&self, results: &[ScoreResult]) -> RankingSummary {
        RankingSummary::from_results(results)
    }
}
