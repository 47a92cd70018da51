// src/web/handlers.rs
//! Request handlers behind the route declarations in `web/mod.rs`

use crate::analysis::{self, prompts, AnalysisError, MATCH_THRESHOLD};
use crate::ats::AtsClient;
use crate::llm::{LlmClient, CHAT_MAX_TOKENS, EMAIL_MAX_TOKENS};
use crate::streaming;
use crate::video;
use crate::web::types::{
    AnalysisResponse, AnalyzeRequest, CandidateInfo, ChatRequest, ChatStream, ErrorResponse,
    HealthResponse, JobsResponse, ProfilesResponse, StatusResponse,
};
use futures::future;
use futures::stream::{Stream, StreamExt};
use rocket::response::stream::TextStream;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};
use uuid::Uuid;

pub async fn list_jobs_handler(
    ats: &State<AtsClient>,
) -> Result<Json<JobsResponse>, Json<ErrorResponse>> {
    match ats.list_jobs().await {
        Ok(jobs) => Ok(Json(JobsResponse { jobs })),
        Err(e) => {
            error!("Failed to list jobs: {}", e);
            Err(Json(ErrorResponse::new(
                format!("Failed to fetch jobs: {e}"),
                "JOBS_FETCH_FAILED",
                vec!["Verify provider credentials and board key".to_string()],
            )))
        }
    }
}

pub async fn list_profiles_handler(
    ats: &State<AtsClient>,
) -> Result<Json<ProfilesResponse>, Json<ErrorResponse>> {
    match ats.list_profiles().await {
        Ok(profiles) => Ok(Json(ProfilesResponse { profiles })),
        Err(e) => {
            error!("Failed to list profiles: {}", e);
            Err(Json(ErrorResponse::new(
                format!("Failed to fetch profiles: {e}"),
                "PROFILES_FETCH_FAILED",
                vec!["Verify provider credentials and source key".to_string()],
            )))
        }
    }
}

/// Full rejection-with-feedback pipeline: analyze the stored profile
/// against the job, generate the rejection email, kick off the optional
/// avatar video, and hand back the feedback plus coaching-chat context.
pub async fn analyze_handler(
    request: Json<AnalyzeRequest>,
    ats: &State<AtsClient>,
    llm: &State<LlmClient>,
) -> Result<Json<AnalysisResponse>, Json<ErrorResponse>> {
    let request_id = Uuid::new_v4();
    info!(
        "[{}] Analyze requested: profile {} against job {}",
        request_id, request.profile_key, request.job_key
    );

    let analysis = analysis::analyze_candidate(ats, &request.profile_key, &request.job_key)
        .await
        .map_err(|e| {
            error!("[{}] Analysis failed: {:#}", request_id, e);
            let error_code = match e.downcast_ref::<AnalysisError>() {
                Some(AnalysisError::InvalidScore(_)) => "INVALID_SCORE",
                Some(AnalysisError::Validation(_)) => "VALIDATION_ERROR",
                None => "ANALYSIS_FAILED",
            };
            Json(ErrorResponse::new(
                format!("Analysis failed: {e}"),
                error_code,
                vec!["Check that the profile and job keys exist".to_string()],
            ))
        })?;

    let feedback = analysis.feedback;

    let email = llm
        .complete(&prompts::render_email_prompt(&feedback), EMAIL_MAX_TOKENS)
        .await
        .map_err(|e| {
            error!("[{}] Email generation failed: {:#}", request_id, e);
            Json(ErrorResponse::new(
                format!("Email generation failed: {e}"),
                "EMAIL_GENERATION_FAILED",
                vec!["Try again in a few moments".to_string()],
            ))
        })?;

    let video_url = video::generate_video(
        &feedback.candidate_name,
        &feedback.job_title,
        &feedback.detected_language,
    )
    .await;

    let chat_context = feedback.chat_context();

    Ok(Json(AnalysisResponse {
        score: feedback.score,
        threshold: MATCH_THRESHOLD,
        matched: feedback.matched,
        detected_language: feedback.detected_language,
        candidate: CandidateInfo {
            name: feedback.candidate_name,
            email: analysis.candidate_email,
        },
        skill_gaps: feedback.gaps,
        strengths: feedback.strengths,
        recommendations: feedback.recommendations,
        email,
        video_url,
        chat_context,
    }))
}

/// Streaming coaching chat. Frames from the encoder go out eagerly, one
/// per model delta; an upstream failure logs and ends the body without the
/// finish frame. Client disconnects drop the stream, which releases the
/// model connection.
pub async fn chat_handler(
    request: Json<ChatRequest>,
    llm: &State<LlmClient>,
) -> Result<ChatStream<impl Stream<Item = String>>, Json<ErrorResponse>> {
    let request_id = Uuid::new_v4();
    let ChatRequest { messages, context } = request.into_inner();

    info!(
        "[{}] Coaching chat with {} prior turns for {}",
        request_id,
        messages.len(),
        if context.candidate_name.is_empty() {
            "unknown candidate"
        } else {
            &context.candidate_name
        }
    );

    let system_prompt = prompts::render_chat_system_prompt(&context);

    let deltas = llm
        .stream_chat(&system_prompt, &messages, CHAT_MAX_TOKENS)
        .await
        .map_err(|e| {
            error!("[{}] Failed to open chat stream: {:#}", request_id, e);
            Json(ErrorResponse::new(
                format!("Chat stream failed: {e}"),
                "CHAT_STREAM_FAILED",
                vec!["Try again in a few moments".to_string()],
            ))
        })?;

    let frames = streaming::encode(deltas)
        .inspect(move |frame| {
            if let Err(e) = frame {
                error!("[{}] {}", request_id, e);
            }
        })
        .take_while(|frame| future::ready(frame.is_ok()))
        .filter_map(|frame| future::ready(frame.ok()));

    Ok(ChatStream(TextStream::from(frames)))
}

pub async fn root_handler() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "Anti-Ghosting HR Agent API".to_string(),
        status: "running".to_string(),
    })
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}
