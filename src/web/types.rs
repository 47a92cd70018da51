// src/web/types.rs

use crate::analysis::{ChatContext, SkillLevel};
use crate::ats::types::{JobSummary, ProfileSummary};
use crate::llm::ChatTurn;
use futures::stream::Stream;
use rocket::http::ContentType;
use rocket::response::stream::TextStream;
use rocket::response::{self, Responder};
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct AnalyzeRequest {
    pub profile_key: String,
    pub job_key: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct CandidateInfo {
    pub name: String,
    pub email: Option<String>,
}

/// Single analyze contract surfaced to clients. Field names and the 5-item
/// gap/strength truncation are load-bearing for existing consumers.
#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub score: f64,
    pub threshold: f64,
    pub matched: bool,
    pub detected_language: String,
    pub candidate: CandidateInfo,
    pub skill_gaps: Vec<SkillLevel>,
    pub strengths: Vec<SkillLevel>,
    pub recommendations: Vec<String>,
    pub email: String,
    pub video_url: Option<String>,
    pub chat_context: ChatContext,
}

#[derive(Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    #[serde(default)]
    pub context: ChatContext,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct JobsResponse {
    pub jobs: Vec<JobSummary>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ProfilesResponse {
    pub profiles: Vec<ProfileSummary>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StatusResponse {
    pub message: String,
    pub status: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

impl ErrorResponse {
    pub fn new(error: String, error_code: &str, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            error,
            error_code: error_code.to_string(),
            suggestions,
        }
    }
}

/// Chat body stream with the headers the streaming client convention
/// expects alongside the frames.
pub struct ChatStream<S>(pub TextStream<S>);

impl<'r, S> Responder<'r, 'r> for ChatStream<S>
where
    S: Stream<Item = String> + Send + 'r,
{
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'r> {
        Response::build_from(self.0.respond_to(request)?)
            .header(ContentType::Plain)
            .raw_header("X-Vercel-AI-Data-Stream", "v1")
            .ok()
    }
}
