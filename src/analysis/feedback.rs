// src/analysis/feedback.rs
//! Assembly of the per-analysis feedback record

use crate::analysis::comparator::SkillLevel;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scores at or above this count as a match.
pub const MATCH_THRESHOLD: f64 = 0.5;

const MAX_SKILL_LEVEL: u8 = 100;
const NAME_PLACEHOLDER: &str = "Candidate";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("match score {0} is outside [0.0, 1.0]")]
    InvalidScore(f64),
    #[error("invalid skill data: {0}")]
    Validation(String),
}

/// Aggregate result of one candidate/job analysis. Constructed once by
/// [`assemble`], never mutated afterwards; consumed by the prompt builder
/// and returned to API callers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResult {
    pub score: f64,
    pub matched: bool,
    pub detected_language: String,
    pub candidate_name: String,
    pub job_title: String,
    pub gaps: Vec<SkillLevel>,
    pub strengths: Vec<SkillLevel>,
    pub recommendations: Vec<String>,
}

/// Context handed to the coaching chat, echoing what the analysis derived.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatContext {
    #[serde(default)]
    pub candidate_name: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub skill_gaps: Vec<SkillLevel>,
    #[serde(default)]
    pub strengths: Vec<SkillLevel>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl FeedbackResult {
    pub fn chat_context(&self) -> ChatContext {
        ChatContext {
            candidate_name: self.candidate_name.clone(),
            job_title: self.job_title.clone(),
            skill_gaps: self.gaps.clone(),
            strengths: self.strengths.clone(),
            recommendations: self.recommendations.clone(),
        }
    }
}

/// Aggregate comparator and recommender output into a [`FeedbackResult`].
///
/// Pure construction plus the match-threshold comparison. The externally
/// sourced score is rejected (not clamped) when outside `[0.0, 1.0]`, since
/// `matched` derives from it. Levels above 100 are a caller contract
/// violation. An empty candidate name falls back to a placeholder.
pub fn assemble(
    score: f64,
    candidate_name: &str,
    job_title: &str,
    detected_language: &str,
    gaps: Vec<SkillLevel>,
    strengths: Vec<SkillLevel>,
    recommendations: Vec<String>,
) -> Result<FeedbackResult, AnalysisError> {
    // NaN fails the range check as well.
    if !(0.0..=1.0).contains(&score) {
        return Err(AnalysisError::InvalidScore(score));
    }

    for skill in gaps.iter().chain(&strengths) {
        if skill.candidate_level > MAX_SKILL_LEVEL || skill.required_level > MAX_SKILL_LEVEL {
            return Err(AnalysisError::Validation(format!(
                "skill level out of range for {}",
                skill.name
            )));
        }
    }

    let candidate_name = if candidate_name.trim().is_empty() {
        NAME_PLACEHOLDER.to_string()
    } else {
        candidate_name.to_string()
    };

    Ok(FeedbackResult {
        score,
        matched: score >= MATCH_THRESHOLD,
        detected_language: detected_language.to_string(),
        candidate_name,
        job_title: job_title.to_string(),
        gaps,
        strengths,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assemble_with_score(score: f64) -> Result<FeedbackResult, AnalysisError> {
        assemble(score, "Ada", "Engineer", "en", vec![], vec![], vec![])
    }

    #[test]
    fn test_matched_tracks_threshold() {
        assert!(!assemble_with_score(0.42).unwrap().matched);
        assert!(!assemble_with_score(0.49).unwrap().matched);
        assert!(assemble_with_score(0.5).unwrap().matched);
        assert!(assemble_with_score(1.0).unwrap().matched);
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        assert!(matches!(
            assemble_with_score(1.2),
            Err(AnalysisError::InvalidScore(_))
        ));
        assert!(matches!(
            assemble_with_score(-0.1),
            Err(AnalysisError::InvalidScore(_))
        ));
        assert!(matches!(
            assemble_with_score(f64::NAN),
            Err(AnalysisError::InvalidScore(_))
        ));
    }

    #[test]
    fn test_empty_name_falls_back_to_placeholder() {
        let result = assemble(0.3, "  ", "Engineer", "en", vec![], vec![], vec![]).unwrap();
        assert_eq!(result.candidate_name, "Candidate");
    }

    #[test]
    fn test_overscaled_level_rejected() {
        let gaps = vec![SkillLevel {
            name: "Rust".to_string(),
            candidate_level: 120,
            required_level: 70,
        }];
        let result = assemble(0.3, "Ada", "Engineer", "en", gaps, vec![], vec![]);
        assert!(matches!(result, Err(AnalysisError::Validation(_))));
    }

    #[test]
    fn test_chat_context_mirrors_result() {
        let result = assemble(
            0.3,
            "Ada",
            "Engineer",
            "fr",
            vec![],
            vec![],
            vec!["Keep going.".to_string()],
        )
        .unwrap();
        let context = result.chat_context();

        assert_eq!(context.candidate_name, "Ada");
        assert_eq!(context.job_title, "Engineer");
        assert_eq!(context.recommendations, result.recommendations);
    }
}
