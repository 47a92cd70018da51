// src/streaming.rs
//! Line-delimited wire framing for streamed model output
//!
//! The format is a fixed external contract consumed by a streaming client
//! convention: each text delta becomes one `0:"<json string>"` line, and a
//! single `d:{"finishReason":"stop"}` line closes a successfully completed
//! stream. Nothing here may buffer, merge, or reorder fragments.

use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use thiserror::Error;

/// Terminal frame for a normally completed stream. Never emitted on abort.
pub const FINISH_FRAME: &str = "d:{\"finishReason\":\"stop\"}\n";

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("stream aborted: {0}")]
    Aborted(String),
}

/// Frame one text delta. The fragment is JSON-encoded as a string literal so
/// newlines inside it cannot break the line-delimited protocol.
pub fn delta_frame(text: &str) -> String {
    format!("0:{}\n", serde_json::Value::String(text.to_string()))
}

enum EncodeState<S> {
    Open(Pin<Box<S>>),
    Closed,
}

/// Wrap a fragment source into the wire framing.
///
/// Each upstream fragment becomes exactly one delta frame, emitted eagerly
/// and in order. When the source ends normally, one finish frame follows and
/// the stream closes. An upstream error surfaces as
/// [`StreamError::Aborted`] and terminates the stream without a finish
/// frame; that frame means successful completion only.
pub fn encode<S>(fragments: S) -> impl Stream<Item = Result<String, StreamError>>
where
    S: Stream<Item = anyhow::Result<String>>,
{
    futures::stream::unfold(EncodeState::Open(Box::pin(fragments)), |state| async move {
        match state {
            EncodeState::Open(mut source) => match source.next().await {
                Some(Ok(text)) => Some((Ok(delta_frame(&text)), EncodeState::Open(source))),
                Some(Err(e)) => Some((
                    Err(StreamError::Aborted(e.to_string())),
                    EncodeState::Closed,
                )),
                None => Some((Ok(FINISH_FRAME.to_string()), EncodeState::Closed)),
            },
            EncodeState::Closed => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::stream;

    fn collect(fragments: Vec<anyhow::Result<String>>) -> Vec<Result<String, StreamError>> {
        block_on(encode(stream::iter(fragments)).collect())
    }

    #[test]
    fn test_exact_frame_sequence() {
        let frames = collect(vec![Ok("Hi".to_string()), Ok(" there".to_string())]);

        let frames: Vec<String> = frames.into_iter().map(|f| f.unwrap()).collect();
        assert_eq!(
            frames,
            vec![
                "0:\"Hi\"\n".to_string(),
                "0:\" there\"\n".to_string(),
                "d:{\"finishReason\":\"stop\"}\n".to_string(),
            ]
        );
    }

    #[test]
    fn test_empty_source_emits_only_finish_frame() {
        let frames = collect(vec![]);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].as_ref().unwrap(), FINISH_FRAME);
    }

    #[test]
    fn test_delta_frame_escapes_control_characters() {
        assert_eq!(delta_frame("a\nb"), "0:\"a\\nb\"\n");
        assert_eq!(delta_frame("say \"hi\""), "0:\"say \\\"hi\\\"\"\n");
    }

    #[test]
    fn test_upstream_error_aborts_without_finish_frame() {
        let frames = collect(vec![
            Ok("partial".to_string()),
            Err(anyhow::anyhow!("connection reset")),
        ]);

        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].as_ref().unwrap(), "0:\"partial\"\n");
        assert!(matches!(frames[1], Err(StreamError::Aborted(_))));
    }

    #[test]
    fn test_order_preserved_one_frame_per_fragment() {
        let fragments: Vec<anyhow::Result<String>> =
            (0..10).map(|i| Ok(format!("t{i}"))).collect();
        let frames = collect(fragments);

        assert_eq!(frames.len(), 11);
        for (i, frame) in frames[..10].iter().enumerate() {
            assert_eq!(frame.as_ref().unwrap(), &format!("0:\"t{i}\"\n"));
        }
        assert_eq!(frames[10].as_ref().unwrap(), FINISH_FRAME);
    }
}
