use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::screening::fuzzy::{EngineConfig, FuzzyEngine};
use crate::workflows::screening::{
    screening_router, Candidate, CandidateScorer, RequirementProfile, TierPolicy,
};

pub(super) fn engine() -> Arc<FuzzyEngine> {
    Arc::new(
        FuzzyEngine::new(EngineConfig::candidate_screening()).expect("bundled rulebook is valid"),
    )
}

pub(super) fn scorer() -> CandidateScorer {
    CandidateScorer::new(engine(), TierPolicy::default())
}

pub(super) fn parallel_scorer() -> CandidateScorer {
    scorer().with_parallelism(true)
}

/// Four years, Python and JavaScript, remote and hybrid.
pub(super) fn middle_fullstack() -> Candidate {
    Candidate::new("cand-middle", "Middle Fullstack")
        .with_years(4)
        .with_skills(["Python", "JavaScript"])
        .with_work_formats(["remote", "hybrid"])
}

pub(super) fn rigid_middle_fullstack() -> Candidate {
    let mut candidate = middle_fullstack();
    candidate.id.0 = "cand-rigid".to_string();
    candidate.name = "Rigid Middle Fullstack".to_string();
    candidate.work_formats.clear();
    candidate
}

pub(super) fn newcomer() -> Candidate {
    Candidate::new("cand-new", "Newcomer")
}

/// Nine years of Java and C++, any work format.
pub(super) fn senior_backend() -> Candidate {
    Candidate::new("cand-senior", "Senior Backend")
        .with_years(9)
        .with_skills(["Java", "C++"])
        .with_work_formats(["удалённый", "очно", "гибридный"])
}

pub(super) fn roster() -> Vec<Candidate> {
    vec![
        newcomer(),
        middle_fullstack(),
        rigid_middle_fullstack(),
        senior_backend(),
    ]
}

pub(super) fn rust_office_profile() -> RequirementProfile {
    RequirementProfile {
        skills: vec!["Rust".to_string(), "Go".to_string()],
        formats: vec!["office".to_string()],
    }
}

pub(super) fn router() -> axum::Router {
    screening_router(Arc::new(scorer()))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1 << 20)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
