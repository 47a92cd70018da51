// src/ats/client.rs
//! HTTP client for the applicant-tracking provider

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::ats::types::{
    Envelope, Job, JobSummary, Profile, ProfileSummary, ScoringData,
};

const JOBS_ENDPOINT: &str = "/jobs/storing";
const PROFILES_ENDPOINT: &str = "/profiles/storing";
const JOB_ENDPOINT: &str = "/job/indexing";
const PROFILE_ENDPOINT: &str = "/profile/indexing";
const SCORING_ENDPOINT: &str = "/profiles/scoring";

const LIST_LIMIT: u32 = 20;
const SCORING_LIMIT: u32 = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fallback when the provider cannot score the pair.
const DEFAULT_SCORE: f64 = 0.5;

pub struct AtsClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    user_email: String,
    source_key: String,
    board_key: String,
}

impl AtsClient {
    pub fn new(
        base_url: String,
        api_key: String,
        user_email: String,
        source_key: String,
        board_key: String,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
            user_email,
            source_key,
            board_key,
        })
    }

    /// List jobs stored on the configured board.
    pub async fn list_jobs(&self) -> Result<Vec<JobSummary>> {
        let board_keys = serde_json::json!([self.board_key]).to_string();
        let jobs: Vec<Job> = self
            .get(
                JOBS_ENDPOINT,
                &[
                    ("board_keys", board_keys.as_str()),
                    ("limit", &LIST_LIMIT.to_string()),
                ],
            )
            .await
            .context("Failed to fetch jobs")?;

        Ok(jobs
            .into_iter()
            .map(|job| JobSummary {
                key: job.key.clone(),
                title: job.name.clone().unwrap_or_else(|| "Untitled".to_string()),
                company: job
                    .tags
                    .first()
                    .and_then(|tag| tag.value.clone())
                    .unwrap_or_default(),
                location: job
                    .location
                    .text
                    .clone()
                    .unwrap_or_else(|| "Remote".to_string()),
            })
            .collect())
    }

    /// List profiles stored in the configured source.
    pub async fn list_profiles(&self) -> Result<Vec<ProfileSummary>> {
        let source_keys = serde_json::json!([self.source_key]).to_string();
        let profiles: Vec<Profile> = self
            .get(
                PROFILES_ENDPOINT,
                &[
                    ("source_keys", source_keys.as_str()),
                    ("limit", &LIST_LIMIT.to_string()),
                    ("return_profile", "true"),
                ],
            )
            .await
            .context("Failed to fetch profiles")?;

        Ok(profiles
            .into_iter()
            .map(|profile| ProfileSummary {
                key: profile.key.clone(),
                name: profile.info.display_name(),
                email: profile.info.email.clone().unwrap_or_default(),
            })
            .collect())
    }

    pub async fn get_profile(&self, profile_key: &str) -> Result<Profile> {
        self.get(
            PROFILE_ENDPOINT,
            &[
                ("source_key", self.source_key.as_str()),
                ("key", profile_key),
            ],
        )
        .await
        .with_context(|| format!("Profile not found: {profile_key}"))
    }

    pub async fn get_job(&self, job_key: &str) -> Result<Job> {
        self.get(
            JOB_ENDPOINT,
            &[("board_key", self.board_key.as_str()), ("key", job_key)],
        )
        .await
        .with_context(|| format!("Job not found: {job_key}"))
    }

    /// Score a profile against a job via the provider's scoring endpoint.
    ///
    /// The provider scores the whole source at once; the pair's score is the
    /// prediction at the profile's index. Any failure here degrades to
    /// [`DEFAULT_SCORE`] rather than failing the analysis.
    pub async fn score_profile(&self, profile_key: &str, job_key: &str) -> f64 {
        let source_keys = serde_json::json!([self.source_key]).to_string();
        let result: Result<ScoringData> = self
            .get(
                SCORING_ENDPOINT,
                &[
                    ("source_keys", source_keys.as_str()),
                    ("board_key", self.board_key.as_str()),
                    ("job_key", job_key),
                    ("limit", &SCORING_LIMIT.to_string()),
                ],
            )
            .await;

        match result {
            Ok(data) => match data.score_for(profile_key) {
                Some(score) => {
                    info!("Provider scored profile {} at {}", profile_key, score);
                    score
                }
                None => {
                    warn!(
                        "No prediction for profile {} against job {}, using default score",
                        profile_key, job_key
                    );
                    DEFAULT_SCORE
                }
            },
            Err(e) => {
                warn!("Scoring request failed, using default score: {}", e);
                DEFAULT_SCORE
            }
        }
    }

    /// GET an enveloped payload with the provider's auth headers.
    async fn get<R>(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .header("X-API-KEY", &self.api_key)
            .header("X-USER-EMAIL", &self.user_email)
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Provider returned HTTP {}: {}", status, error_text);
        }

        let envelope: Envelope<R> = response
            .json()
            .await
            .context("Failed to parse provider response")?;

        if envelope.code != 200 {
            anyhow::bail!("Provider error {}: {}", envelope.code, envelope.message);
        }

        envelope
            .data
            .context("Provider response carried no data")
    }
}
