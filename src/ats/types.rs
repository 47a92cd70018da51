// src/ats/types.rs
//! Wire types for the applicant-tracking provider

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provider responses wrap their payload in `{code, message, data}`; a
/// non-200 `code` signals failure even on HTTP 200.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Skill {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInfo {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub summary: Option<String>,
}

impl ProfileInfo {
    /// Display name: first + last, then a summary prefix, then "Candidate".
    pub fn display_name(&self) -> String {
        let full_name = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string();
        if !full_name.is_empty() {
            return full_name;
        }

        match self.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary.chars().take(50).collect(),
            _ => "Candidate".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub info: ProfileInfo,
    #[serde(default)]
    pub skills: Vec<Skill>,
    pub text_language: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name.as_str())
    }

    pub fn detected_language(&self) -> &str {
        self.text_language.as_deref().unwrap_or("en")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Location {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub key: String,
    pub name: Option<String>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub location: Location,
    pub created_at: Option<DateTime<Utc>>,
}

impl Job {
    pub fn skill_names(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(|s| s.name.as_str())
    }

    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or("Position")
    }
}

/// Listing shapes surfaced to the API layer.
#[derive(Debug, Clone, Serialize)]
pub struct JobSummary {
    pub key: String,
    pub title: String,
    pub company: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSummary {
    pub key: String,
    pub name: String,
    pub email: String,
}

/// Scoring payload: `predictions[i]` belongs to `profiles[i]`, the match
/// probability is the second element of the pair.
#[derive(Debug, Default, Deserialize)]
pub struct ScoringData {
    #[serde(default)]
    pub predictions: Vec<Vec<f64>>,
    #[serde(default)]
    pub profiles: Vec<ScoredProfile>,
}

#[derive(Debug, Deserialize)]
pub struct ScoredProfile {
    #[serde(default)]
    pub key: String,
}

impl ScoringData {
    /// Extract the match score for one profile, rounded to 2 decimals.
    pub fn score_for(&self, profile_key: &str) -> Option<f64> {
        let index = self.profiles.iter().position(|p| p.key == profile_key)?;
        let prediction = self.predictions.get(index)?;
        if prediction.len() < 2 {
            return None;
        }
        Some((prediction[1] * 100.0).round() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_full_name() {
        let info = ProfileInfo {
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            ..Default::default()
        };
        assert_eq!(info.display_name(), "Ada Lovelace");
    }

    #[test]
    fn test_display_name_falls_back_to_summary_prefix() {
        let info = ProfileInfo {
            summary: Some("Seasoned engineer with a decade of experience building distributed systems".to_string()),
            ..Default::default()
        };
        let name = info.display_name();
        assert_eq!(name.chars().count(), 50);
        assert!(name.starts_with("Seasoned engineer"));
    }

    #[test]
    fn test_display_name_last_resort_placeholder() {
        assert_eq!(ProfileInfo::default().display_name(), "Candidate");
    }

    #[test]
    fn test_score_extraction_matches_profile_by_key() {
        let data: ScoringData = serde_json::from_value(serde_json::json!({
            "predictions": [[0.9, 0.123], [0.8, 0.456]],
            "profiles": [{"key": "a"}, {"key": "b"}]
        }))
        .unwrap();

        assert_eq!(data.score_for("b"), Some(0.46));
        assert_eq!(data.score_for("a"), Some(0.12));
        assert_eq!(data.score_for("missing"), None);
    }

    #[test]
    fn test_score_extraction_rejects_short_prediction() {
        let data: ScoringData = serde_json::from_value(serde_json::json!({
            "predictions": [[0.9]],
            "profiles": [{"key": "a"}]
        }))
        .unwrap();
        assert_eq!(data.score_for("a"), None);
    }

    #[test]
    fn test_job_title_fallback() {
        let job: Job = serde_json::from_value(serde_json::json!({"key": "j1"})).unwrap();
        assert_eq!(job.title(), "Position");
    }
}
