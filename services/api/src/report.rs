use crate::infra::{build_scorer, find_candidate, load_roster};
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use talent_ai::config::{AppConfig, ScreeningConfig};
use talent_ai::error::AppError;
use talent_ai::telemetry;
use talent_ai::workflows::screening::{
    Candidate, RankingSummary, RequirementProfile, ScoreExplanation, ScoreResult,
};

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Candidate CSV export (defaults to TALENT_CANDIDATES_CSV)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Required skills, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) skills: Vec<String>,
    /// Required work formats, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) formats: Vec<String>,
    /// Only print the best N candidates
    #[arg(long)]
    pub(crate) top: Option<usize>,
}

#[derive(Args, Debug)]
pub(crate) struct ExplainArgs {
    /// Candidate CSV export (defaults to TALENT_CANDIDATES_CSV)
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Candidate name as written in the export
    #[arg(long)]
    pub(crate) name: String,
    /// Required skills, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) skills: Vec<String>,
    /// Required work formats, comma separated
    #[arg(long, value_delimiter = ',')]
    pub(crate) formats: Vec<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full diagnostic breakdown for every sample candidate.
    #[arg(long)]
    pub(crate) explain: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        csv,
        skills,
        formats,
        top,
    } = args;

    let config = cli_config()?;
    let candidates = load_roster(csv, &config.screening)?;
    let scorer = build_scorer(&config.screening)?;
    let profile = requirement_profile(skills, formats);

    let mut results = scorer.score_batch(&candidates, profile.as_ref());
    if let Some(top) = top {
        results.truncate(top);
    }
    let summary = scorer.summarize(&results);

    println!(
        "Candidate ranking ({} candidates, generated {})",
        candidates.len(),
        Local::now().format("%Y-%m-%d %H:%M")
    );
    if let Some(profile) = &profile {
        render_profile(profile);
    }
    render_ranking(&results);
    render_summary(&summary);
    Ok(())
}

pub(crate) fn run_explain(args: ExplainArgs) -> Result<(), AppError> {
    let ExplainArgs {
        csv,
        name,
        skills,
        formats,
    } = args;

    let config = cli_config()?;
    let candidates = load_roster(csv, &config.screening)?;
    let candidate = find_candidate(&candidates, &name)
        .ok_or_else(|| AppError::NotFound(format!("candidate '{name}'")))?;
    let scorer = build_scorer(&config.screening)?;
    let profile = requirement_profile(skills, formats);

    if let Some(profile) = &profile {
        render_profile(profile);
    }
    render_explanation(candidate, &scorer.explain(candidate, profile.as_ref()));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let scorer = build_scorer(&ScreeningConfig::default())?;
    let candidates = demo_candidates();

    println!("Fuzzy candidate screening demo");
    let results = scorer.score_batch(&candidates, None);
    for result in &results {
        println!(
            "\n{}\n  Score: {:.1}% - {}",
            result.candidate_name, result.final_score, result.recommendation
        );
        if let Some(rule) = result.top_rule() {
            println!(
                "  Leading rule: {} (strength {:.2})",
                rule.description, rule.strength
            );
        }
    }

    if args.explain {
        for candidate in &candidates {
            render_explanation(candidate, &scorer.explain(candidate, None));
        }
    }

    render_summary(&scorer.summarize(&results));
    Ok(())
}

/// Loads configuration and installs the subscriber so import warnings reach stderr.
fn cli_config() -> Result<AppConfig, AppError> {
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    Ok(config)
}

/// Sample roster covering a flexible middle fullstack, a rigid senior and a junior.
pub(crate) fn demo_candidates() -> Vec<Candidate> {
    vec![
        Candidate::new("demo-1", "Middle Fullstack, fully flexible")
            .with_years(4)
            .with_skills(["Python", "JavaScript", "TypeScript"])
            .with_work_formats(["удалённый", "гибридный", "очно"]),
        Candidate::new("demo-2", "Senior Backend, office only")
            .with_years(8)
            .with_skills(["Java", "C++"])
            .with_work_formats(["очно"]),
        Candidate::new("demo-3", "Junior Backend")
            .with_years(1)
            .with_skills(["Python"])
            .with_work_formats(["удалённый"]),
    ]
}

fn requirement_profile(skills: Vec<String>, formats: Vec<String>) -> Option<RequirementProfile> {
    let profile = RequirementProfile { skills, formats };
    (!profile.is_empty()).then_some(profile)
}

fn render_profile(profile: &RequirementProfile) {
    println!(
        "Requirements: skills [{}] | formats [{}]",
        profile.skills.join(", "),
        profile.formats.join(", ")
    );
}

fn render_ranking(results: &[ScoreResult]) {
    for (position, result) in results.iter().enumerate() {
        println!(
            "{:>3}. {:<32} {:>5.1}%  {}",
            position + 1,
            result.candidate_name,
            result.final_score,
            result.recommendation
        );
        if let Some(rule) = result.top_rule() {
            println!(
                "     leading rule: {} (strength {:.2})",
                rule.description, rule.strength
            );
        }
    }
}

fn render_summary(summary: &RankingSummary) {
    println!("\nSummary: {} candidates", summary.total);
    for (label, names) in [
        ("Excellent", &summary.excellent),
        ("Good", &summary.good),
        ("Low", &summary.low),
    ] {
        if names.is_empty() {
            println!("- {label}: none");
        } else {
            println!("- {label} ({}): {}", names.len(), names.join(", "));
        }
    }
}

fn render_explanation(candidate: &Candidate, explanation: &ScoreExplanation) {
    let attributes = &explanation.attributes;
    println!("\nDiagnostics for {} ({})", candidate.name, candidate.id);
    println!(
        "  Inputs: years {:.0} | specialization {:.2} | flexibility {:.2}",
        attributes.years_experience, attributes.specialization, attributes.flexibility
    );
    if let Some(ratio) = attributes.skill_match {
        println!("  Skill coverage: {:.0}%", ratio * 100.0);
    }
    if let Some(ratio) = attributes.schedule_match {
        println!("  Format coverage: {:.0}%", ratio * 100.0);
    }

    println!("  Memberships:");
    for (set, degree) in explanation.fuzzified.degrees() {
        if *degree > 0.0 {
            println!("    - {set}: {degree:.3}");
        }
    }

    println!("  Fired rules:");
    if explanation.result.activated_rules.is_empty() {
        println!("    none");
    }
    for rule in &explanation.result.activated_rules {
        println!(
            "    - {} -> {} ({:.3}): {}",
            rule.rule_name, rule.output_set, rule.strength, rule.description
        );
    }

    println!("  Output sets:");
    for curve in explanation.aggregated.curves() {
        println!("    - {}: peak {:.3}", curve.set, curve.peak());
    }
    println!(
        "  Centroid: {:.2} / {:.2} = {:.1}% (combined peak {:.3})",
        explanation.centroid.numerator,
        explanation.centroid.denominator,
        explanation.result.final_score,
        explanation.combined_peak
    );
    println!("  Recommendation: {}", explanation.result.recommendation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use talent_ai::workflows::screening::RecommendationTier;

    #[test]
    fn demo_roster_puts_flexible_fullstack_first() {
        let scorer = build_scorer(&ScreeningConfig::default()).expect("bundled rulebook");
        let results = scorer.score_batch(&demo_candidates(), None);

        assert_eq!(results[0].candidate_id.0, "demo-1");
        assert_eq!(results[0].recommendation_tier, RecommendationTier::Excellent);
        assert_eq!(
            results.last().map(|result| result.candidate_id.0.as_str()),
            Some("demo-3")
        );
    }

    #[test]
    fn cli_config_installs_the_subscriber() {
        cli_config().expect("config loads and telemetry starts");
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn empty_requirements_yield_no_profile() {
        assert!(requirement_profile(Vec::new(), Vec::new()).is_none());
        let profile = requirement_profile(vec!["Rust".to_string()], Vec::new())
            .expect("skills make a profile");
        assert_eq!(profile.skills, vec!["Rust"]);
    }
}
