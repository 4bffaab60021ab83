//! OpenAI-compatible chat completion passthrough

use super::OnomaClient;
use super::error_check::check_status;
use super::sse::{SseDecoder, chunk_json};
use super::types::{ChatMessage, ChatOptions};
use crate::error::{OnomaError, OnomaResult};
use futures::{Stream, StreamExt, future, stream};
use serde_json::{Value, json};
use std::pin::Pin;
use tracing::instrument;

/// Model requested when the caller does not name one
pub const DEFAULT_CHAT_MODEL: &str = "onoma/memory";

/// Parsed `data:` chunks of a streamed completion
pub type ChatStream = Pin<Box<dyn Stream<Item = OnomaResult<Value>> + Send>>;

/// Completion object, or chunk stream when streaming was requested
pub enum ChatOutput {
    Completion(Value),
    Stream(ChatStream),
}

impl ChatOutput {
    /// The completion object, if this was a non-streaming call
    pub fn into_completion(self) -> Option<Value> {
        match self {
            Self::Completion(value) => Some(value),
            Self::Stream(_) => None,
        }
    }
}

impl std::fmt::Debug for ChatOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completion(value) => f.debug_tuple("Completion").field(value).finish(),
            Self::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

impl OnomaClient {
    /// Chat completion against the memory-aware model endpoint
    #[instrument(skip(self, messages), level = "debug")]
    pub async fn chat(&self, messages: &[ChatMessage], options: ChatOptions) -> OnomaResult<ChatOutput> {
        const PREFIX: &str = "Chat completion failed";

        let mut request_body = json!({
            "model": options.model.as_deref().unwrap_or(DEFAULT_CHAT_MODEL),
            "messages": messages,
            "stream": options.stream,
        });
        if let Some(max_tokens) = options.max_tokens {
            request_body["max_tokens"] = json!(max_tokens);
        }

        let response = self
            .http
            .post(self.url("/chat/completions"))
            .bearer_auth(&self.api_token)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| OnomaError::from(e).with_prefix(PREFIX))?;

        let response = check_status(response, PREFIX)?;

        if !options.stream {
            let completion = response
                .json::<Value>()
                .await
                .map_err(|e| OnomaError::from(e).with_prefix(PREFIX))?;
            return Ok(ChatOutput::Completion(completion));
        }

        let chunks = response
            .bytes_stream()
            .scan(SseDecoder::new(), |decoder, chunk_result| {
                let items: Vec<OnomaResult<Value>> = match chunk_result {
                    Ok(chunk) => decoder
                        .feed(&chunk)
                        .iter()
                        .filter_map(|data| chunk_json(data))
                        .map(Ok)
                        .collect(),
                    Err(e) => vec![Err(OnomaError::http(format!("Stream error: {}", e)))],
                };
                future::ready(Some(stream::iter(items)))
            })
            .flatten();

        Ok(ChatOutput::Stream(Box::pin(chunks)))
    }
}
