// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use types::*;

use crate::ats::AtsClient;
use crate::config::{EnvironmentConfig, Secrets};
use crate::llm::LlmClient;
use anyhow::Result;
use futures::stream::Stream;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Request, Response, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new("Access-Control-Allow-Credentials", "true"));
    }
}

#[get("/jobs")]
pub async fn list_jobs(
    ats: &State<AtsClient>,
) -> Result<Json<JobsResponse>, Json<ErrorResponse>> {
    handlers::list_jobs_handler(ats).await
}

#[get("/profiles")]
pub async fn list_profiles(
    ats: &State<AtsClient>,
) -> Result<Json<ProfilesResponse>, Json<ErrorResponse>> {
    handlers::list_profiles_handler(ats).await
}

#[post("/analyze", data = "<request>")]
pub async fn analyze(
    request: Json<AnalyzeRequest>,
    ats: &State<AtsClient>,
    llm: &State<LlmClient>,
) -> Result<Json<AnalysisResponse>, Json<ErrorResponse>> {
    handlers::analyze_handler(request, ats, llm).await
}

#[post("/chat", data = "<request>")]
pub async fn chat(
    request: Json<ChatRequest>,
    llm: &State<LlmClient>,
) -> Result<ChatStream<impl Stream<Item = String>>, Json<ErrorResponse>> {
    handlers::chat_handler(request, llm).await
}

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    handlers::health_handler().await
}

#[get("/")]
pub async fn root() -> Json<StatusResponse> {
    handlers::root_handler().await
}

#[options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST",
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR",
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
    ))
}

// Main server start function
pub async fn start_web_server(
    environment: EnvironmentConfig,
    secrets: Secrets,
    port: u16,
) -> Result<()> {
    let ats = AtsClient::new(
        environment.ats_base_url.clone(),
        secrets.ats_api_key,
        secrets.ats_user_email,
        environment.ats_source_key.clone(),
        environment.ats_board_key.clone(),
    )?;

    let llm = LlmClient::new(
        environment.llm_base_url.clone(),
        secrets.llm_api_key,
        environment.llm_model.clone(),
    )?;

    info!("Starting Anti-Ghosting HR Agent API server on port {}", port);
    info!("ATS provider: {}", environment.ats_base_url);
    info!("Model: {}", environment.llm_model);

    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(ats)
        .manage(llm)
        .register("/api", catchers![bad_request, internal_error])
        .mount(
            "/api",
            routes![list_jobs, list_profiles, analyze, chat, health, all_options],
        )
        .mount("/", routes![root])
        .launch()
        .await?;

    Ok(())
}
