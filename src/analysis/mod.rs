// src/analysis/mod.rs
//! Candidate-job feedback derivation: comparison, recommendations,
//! assembly, and prompt rendering.

pub mod comparator;
pub mod feedback;
pub mod prompts;
pub mod recommend;

pub use comparator::{compare, PlaceholderScoring, ScoringStrategy, SkillLevel};
pub use feedback::{assemble, AnalysisError, ChatContext, FeedbackResult, MATCH_THRESHOLD};
pub use recommend::recommend;

use crate::ats::AtsClient;
use anyhow::{Context, Result};
use tracing::info;

/// Feedback record plus the profile details the API layer echoes back.
#[derive(Debug, Clone)]
pub struct CandidateAnalysis {
    pub feedback: FeedbackResult,
    pub candidate_email: Option<String>,
}

/// Run the full analysis pipeline for a stored profile against a job:
/// fetch both records, obtain the provider's match score, partition skills,
/// derive recommendations, and assemble the immutable feedback record.
pub async fn analyze_candidate(
    ats: &AtsClient,
    profile_key: &str,
    job_key: &str,
) -> Result<CandidateAnalysis> {
    info!("Starting analysis of profile {} against job {}", profile_key, job_key);

    let profile = ats
        .get_profile(profile_key)
        .await
        .context("Failed to load candidate profile")?;
    let job = ats.get_job(job_key).await.context("Failed to load job")?;

    let score = ats.score_profile(profile_key, job_key).await;

    let (gaps, strengths) = compare(profile.skill_names(), job.skill_names(), &PlaceholderScoring);
    let recommendations = recommend(&gaps);

    let feedback = assemble(
        score,
        &profile.info.display_name(),
        job.title(),
        profile.detected_language(),
        gaps,
        strengths,
        recommendations,
    )?;

    info!(
        "Analysis complete for {}: score {}, {} gaps, {} strengths",
        feedback.candidate_name,
        feedback.score,
        feedback.gaps.len(),
        feedback.strengths.len()
    );

    Ok(CandidateAnalysis {
        candidate_email: profile.info.email.clone(),
        feedback,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // End to end through the pure pipeline: a candidate holding only Python
    // against a job wanting Python and Kubernetes, scored 0.42 upstream.
    #[test]
    fn test_feedback_pipeline_end_to_end() {
        let (gaps, strengths) = compare(["Python"], ["Python", "Kubernetes"], &PlaceholderScoring);
        let recommendations = recommend(&gaps);
        let feedback = assemble(
            0.42,
            "Ada Lovelace",
            "Platform Engineer",
            "en",
            gaps,
            strengths,
            recommendations,
        )
        .unwrap();

        assert!(!feedback.matched);
        assert!(feedback.strengths.is_empty());
        // Held-but-short Python is a gap too, ranked below missing Kubernetes.
        assert_eq!(feedback.gaps.len(), 2);
        assert_eq!(feedback.gaps[0].name, "Kubernetes");
        assert_eq!(feedback.gaps[0].candidate_level, 0);
        assert_eq!(feedback.gaps[1].name, "Python");
        assert_eq!(feedback.gaps[1].candidate_level, 65);
        assert_eq!(feedback.recommendations.len(), 2);
        assert!(feedback.recommendations[0]
            .starts_with("Build foundational knowledge in Kubernetes"));

        let email_prompt = prompts::render_email_prompt(&feedback);
        assert!(email_prompt.contains("Ada Lovelace"));
        assert!(email_prompt.contains("Kubernetes"));

        let chat_prompt = prompts::render_chat_system_prompt(&feedback.chat_context());
        assert!(chat_prompt.contains("- Kubernetes: Candidate level 0%, Required 70%"));
        assert!(chat_prompt.contains("Analysis pending."));
    }
}
