// src/video.rs
//! Avatar video stub
//!
//! Placeholder integration with an avatar-video provider. Generation takes
//! minutes and needs status polling, so this never blocks the analysis:
//! without a configured key it returns no URL, and with one it only kicks
//! off the render and still returns no URL. Failures are logged, never
//! propagated.

use tracing::{info, warn};

const VIDEO_ENDPOINT: &str = "https://api.heygen.com/v1/video.generate";

pub async fn generate_video(candidate_name: &str, job_title: &str, _language: &str) -> Option<String> {
    let api_key = match std::env::var("HEYGEN_API_KEY") {
        Ok(key) if !key.is_empty() && key != "xxx" => key,
        _ => return None,
    };

    let script = format!(
        "Hi {candidate_name}, thank you for your interest in the {job_title} position. \
         While we've decided to move forward with other candidates at this time, \
         we want to provide you with personalized feedback to help you in your career journey. \
         Please check the email we've sent you for detailed insights."
    );

    let payload = serde_json::json!({
        "video_inputs": [{
            "character": {"type": "avatar", "avatar_id": "default"},
            "voice": {"type": "text", "input_text": script, "voice_id": "default"},
        }],
        "dimension": {"width": 1280, "height": 720},
    });

    let client = match reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to create video client: {}", e);
            return None;
        }
    };

    match client
        .post(VIDEO_ENDPOINT)
        .header("X-Api-Key", api_key)
        .json(&payload)
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => {
            let body: serde_json::Value = response.json().await.unwrap_or_default();
            if let Some(video_id) = body.pointer("/data/video_id").and_then(|v| v.as_str()) {
                // TODO: poll the status endpoint and surface the finished URL.
                info!("Avatar video queued: {}", video_id);
            }
            None
        }
        Ok(response) => {
            warn!("Video provider returned HTTP {}", response.status());
            None
        }
        Err(e) => {
            warn!("Video generation failed: {}", e);
            None
        }
    }
}
