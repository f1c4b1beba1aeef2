use super::common::*;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use std::sync::Arc;

use crate::workflows::screening::{screening_router, RankRequest, ScoreRequest};

fn post(uri: &str, payload: &impl serde::Serialize) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(payload).expect("serializable")))
        .expect("request builds")
}

#[tokio::test]
async fn score_route_returns_result() {
    let request = ScoreRequest {
        candidate: senior_backend(),
        profile: None,
    };

    let response = router()
        .oneshot(post("/api/v1/candidates/score", &request))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("candidate_id"), Some(&json!("cand-senior")));
    assert_eq!(payload.get("recommendation_tier"), Some(&json!("excellent")));
    assert!(payload
        .get("activated_rules")
        .and_then(Value::as_array)
        .is_some_and(|rules| !rules.is_empty()));
}

#[tokio::test]
async fn rank_route_orders_and_summarizes() {
    let request = RankRequest {
        candidates: roster(),
        profile: None,
        top: Some(3),
    };

    let response = router()
        .oneshot(post("/api/v1/candidates/rank", &request))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let results = payload
        .get("results")
        .and_then(Value::as_array)
        .expect("results array");
    assert_eq!(results.len(), 3);

    let scores: Vec<f64> = results
        .iter()
        .filter_map(|result| result.get("final_score").and_then(Value::as_f64))
        .collect();
    assert!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
    assert_eq!(payload["summary"]["total"], json!(3));
    assert!(payload.get("generated_at").and_then(Value::as_str).is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn rank_route_scores_large_parallel_batches() {
    let candidates: Vec<_> = (0..200)
        .map(|index| {
            let mut candidate = if index % 2 == 0 {
                senior_backend()
            } else {
                newcomer()
            };
            candidate.id.0 = format!("cand-{index:04}");
            candidate
        })
        .collect();
    let request = RankRequest {
        candidates,
        profile: None,
        top: None,
    };

    let response = screening_router(Arc::new(parallel_scorer()))
        .oneshot(post("/api/v1/candidates/rank", &request))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["summary"]["total"], json!(200));
    assert_eq!(payload["results"][0]["candidate_id"], json!("cand-0000"));
    assert_eq!(payload["results"][199]["candidate_id"], json!("cand-0199"));
}

#[tokio::test]
async fn explain_route_includes_intermediates() {
    let request = ScoreRequest {
        candidate: middle_fullstack(),
        profile: Some(rust_office_profile()),
    };

    let response = router()
        .oneshot(post("/api/v1/candidates/explain", &request))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload["fuzzified"]["degrees"]
        .get("experience.middle")
        .is_some());
    assert_eq!(payload["attributes"]["skill_match"], json!(0.0));
    assert!(payload["centroid"]["denominator"].as_f64().unwrap_or_default() > 0.0);
}

#[tokio::test]
async fn unnamed_candidates_are_rejected() {
    let mut candidate = newcomer();
    candidate.name = "  ".to_string();
    let request = ScoreRequest {
        candidate,
        profile: None,
    };

    let response = router()
        .oneshot(post("/api/v1/candidates/score", &request))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("candidate_id"), Some(&json!("cand-new")));
}

#[tokio::test]
async fn malformed_json_is_a_client_error() {
    let response = router()
        .oneshot(
            Request::post("/api/v1/candidates/rank")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"candidates\": 7}"))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert!(response.status().is_client_error());
}
