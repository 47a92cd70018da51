// src/llm.rs
//! Anthropic Messages API client: one blocking completion call for the
//! rejection email, one streaming call for the coaching chat.

use anyhow::{Context, Result};
use futures::stream::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::pin::Pin;
use tracing::trace;

const MESSAGES_ENDPOINT: &str = "/v1/messages";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const EMAIL_MAX_TOKENS: u32 = 500;
pub const CHAT_MAX_TOKENS: u32 = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the coaching conversation, append-only from the caller's
/// perspective.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl LlmClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            api_key,
            model,
        })
    }

    /// Single blocking completion for a one-shot prompt.
    pub async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String> {
        let payload = serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "messages": [{"role": "user", "content": prompt}],
        });

        let response = self
            .request(&payload)
            .send()
            .await
            .context("Failed to call model API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Model API returned HTTP {}: {}", status, error_text);
        }

        let message: MessageResponse = response
            .json()
            .await
            .context("Failed to parse model response")?;

        message
            .content
            .into_iter()
            .map(|block| block.text)
            .reduce(|mut acc, text| {
                acc.push_str(&text);
                acc
            })
            .context("Model response carried no content")
    }

    /// Streaming chat completion. Yields text deltas in generation order;
    /// the stream ends when the model closes the event source. Dropping the
    /// returned stream releases the underlying connection.
    pub async fn stream_chat(
        &self,
        system_prompt: &str,
        messages: &[ChatTurn],
        max_tokens: u32,
    ) -> Result<impl Stream<Item = Result<String>>> {
        let payload = serde_json::json!({
            "model": self.model,
            "max_tokens": max_tokens,
            "system": system_prompt,
            "messages": messages,
            "stream": true,
        });

        let response = self
            .request(&payload)
            .send()
            .await
            .context("Failed to open model stream")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("Model API returned HTTP {}: {}", status, error_text);
        }

        Ok(text_deltas(response))
    }

    fn request(&self, payload: &serde_json::Value) -> reqwest::RequestBuilder {
        self.client
            .post(format!("{}{}", self.base_url, MESSAGES_ENDPOINT))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(payload)
    }
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct StreamEvent {
    #[serde(rename = "type")]
    kind: String,
    delta: Option<StreamDelta>,
}

#[derive(Debug, Deserialize)]
struct StreamDelta {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

/// Pull the text out of one SSE line, ignoring every event that is not a
/// text delta.
fn parse_sse_line(line: &str) -> Option<String> {
    let data = line.strip_prefix("data: ")?;
    let event: StreamEvent = serde_json::from_str(data).ok()?;
    if event.kind != "content_block_delta" {
        return None;
    }
    let delta = event.delta?;
    if delta.kind != "text_delta" {
        return None;
    }
    Some(delta.text)
}

struct SseState {
    source: Pin<Box<dyn Stream<Item = reqwest::Result<Vec<u8>>> + Send>>,
    buffer: String,
    pending: VecDeque<String>,
    done: bool,
}

/// Decode the event-source body into a stream of text deltas.
fn text_deltas(response: reqwest::Response) -> impl Stream<Item = Result<String>> {
    let state = SseState {
        source: Box::pin(response.bytes_stream().map(|chunk| chunk.map(|b| b.to_vec()))),
        buffer: String::new(),
        pending: VecDeque::new(),
        done: false,
    };

    futures::stream::unfold(state, |mut state| async move {
        loop {
            if let Some(text) = state.pending.pop_front() {
                return Some((Ok(text), state));
            }
            if state.done {
                return None;
            }

            match state.source.next().await {
                Some(Ok(chunk)) => {
                    state.buffer.push_str(&String::from_utf8_lossy(&chunk));
                    while let Some(newline) = state.buffer.find('\n') {
                        let line = state.buffer[..newline].trim_end_matches('\r').to_string();
                        state.buffer.drain(..=newline);
                        trace!("sse line: {}", line);
                        if let Some(text) = parse_sse_line(&line) {
                            state.pending.push_back(text);
                        }
                    }
                }
                Some(Err(e)) => {
                    state.done = true;
                    return Some((
                        Err(anyhow::Error::new(e).context("Model stream failed mid-generation")),
                        state,
                    ));
                }
                None => {
                    state.done = true;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_delta_line() {
        let line = r#"data: {"type":"content_block_delta","index":0,"delta":{"type":"text_delta","text":"Hello"}}"#;
        assert_eq!(parse_sse_line(line), Some("Hello".to_string()));
    }

    #[test]
    fn test_non_delta_events_ignored() {
        assert_eq!(parse_sse_line(r#"data: {"type":"message_start"}"#), None);
        assert_eq!(parse_sse_line(r#"data: {"type":"message_stop"}"#), None);
        assert_eq!(parse_sse_line("event: content_block_delta"), None);
        assert_eq!(parse_sse_line(""), None);
    }

    #[test]
    fn test_non_text_delta_ignored() {
        let line = r#"data: {"type":"content_block_delta","delta":{"type":"input_json_delta","partial_json":"{}"}}"#;
        assert_eq!(parse_sse_line(line), None);
    }

    #[test]
    fn test_chat_turn_roles_serialize_lowercase() {
        let turn = ChatTurn {
            role: ChatRole::Assistant,
            content: "hi".to_string(),
        };
        let json = serde_json::to_value(&turn).unwrap();
        assert_eq!(json, serde_json::json!({"role": "assistant", "content": "hi"}));
    }
}
