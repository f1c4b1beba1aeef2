use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use talent_ai::config::ScreeningConfig;
use talent_ai::error::AppError;
use talent_ai::workflows::screening::{load_candidates, Candidate, CandidateScorer};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_scorer(config: &ScreeningConfig) -> Result<CandidateScorer, AppError> {
    CandidateScorer::from_config(config).map_err(AppError::from)
}

/// Candidates from `--csv`, falling back to `TALENT_CANDIDATES_CSV`.
pub(crate) fn load_roster(
    csv: Option<PathBuf>,
    config: &ScreeningConfig,
) -> Result<Vec<Candidate>, AppError> {
    let path = csv
        .or_else(|| config.candidates_csv.clone())
        .ok_or_else(|| {
            AppError::Usage(
                "no candidate CSV given (pass --csv or set TALENT_CANDIDATES_CSV)".to_string(),
            )
        })?;
    load_candidates(&path).map_err(AppError::from)
}

pub(crate) fn find_candidate<'a>(candidates: &'a [Candidate], name: &str) -> Option<&'a Candidate> {
    let wanted = name.trim().to_lowercase();
    candidates
        .iter()
        .find(|candidate| candidate.name.trim().to_lowercase() == wanted)
}
