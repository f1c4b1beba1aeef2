use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{Candidate, RequirementProfile};
use super::scoring::{CandidateScorer, RankingSummary, ScoreResult};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoreRequest {
    pub candidate: Candidate,
    #[serde(default)]
    pub profile: Option<RequirementProfile>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RankRequest {
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub profile: Option<RequirementProfile>,
    /// Keep only the first `top` results after ranking.
    #[serde(default)]
    pub top: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankResponse {
    pub generated_at: DateTime<Utc>,
    pub results: Vec<ScoreResult>,
    pub summary: RankingSummary,
}

/// Router exposing scoring, ranking and explanation endpoints.
pub fn screening_router(scorer: Arc<CandidateScorer>) -> Router {
    Router::new()
        .route("/api/v1/candidates/score", post(score_handler))
        .route("/api/v1/candidates/rank", post(rank_handler))
        .route("/api/v1/candidates/explain", post(explain_handler))
        .with_state(scorer)
}

pub(crate) async fn score_handler(
    State(scorer): State<Arc<CandidateScorer>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    if let Some(response) = reject_unnamed(std::slice::from_ref(&request.candidate)) {
        return response;
    }
    let result = scorer.score(&request.candidate, request.profile.as_ref());
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn rank_handler(
    State(scorer): State<Arc<CandidateScorer>>,
    axum::Json(request): axum::Json<RankRequest>,
) -> Response {
    if let Some(response) = reject_unnamed(&request.candidates) {
        return response;
    }

    // Batches run on rayon, so keep them off the async workers.
    let ranked = tokio::task::spawn_blocking(move || {
        let mut results = scorer.score_batch(&request.candidates, request.profile.as_ref());
        if let Some(top) = request.top {
            results.truncate(top);
        }
        let summary = scorer.summarize(&results);
        (results, summary)
    })
    .await;

    let (results, summary) = match ranked {
        Ok(ranked) => ranked,
        Err(err) => {
            error!(error = %err, "ranking task failed");
            let payload = json!({ "error": "ranking failed" });
            return (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response();
        }
    };

    let payload = RankResponse {
        generated_at: Utc::now(),
        results,
        summary,
    };
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn explain_handler(
    State(scorer): State<Arc<CandidateScorer>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    if let Some(response) = reject_unnamed(std::slice::from_ref(&request.candidate)) {
        return response;
    }
    let explanation = scorer.explain(&request.candidate, request.profile.as_ref());
    (StatusCode::OK, axum::Json(explanation)).into_response()
}

fn reject_unnamed(candidates: &[Candidate]) -> Option<Response> {
    let unnamed = candidates
        .iter()
        .find(|candidate| candidate.name.trim().is_empty())?;
    let payload = json!({
        "error": "candidate name must not be empty",
        "candidate_id": unnamed.id.0,
    });
    Some((StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response())
}
