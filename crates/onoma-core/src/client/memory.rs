//! Memory endpoints

use super::OnomaClient;
use super::error_check::check_status;
use super::types::{
    ChatMessage, CreateMemoryRequest, ExtractRequest, ExtractResponse, Memory,
    MemorySearchResult, MemoryStats, SearchResponse, Space, SpacesResponse,
};
use crate::error::{OnomaError, OnomaResult};
use serde::de::DeserializeOwned;
use tracing::instrument;

/// Context type used when a caller does not pick one
pub const DEFAULT_CONTEXT_TYPE: &str = "user_fact";

impl OnomaClient {
    /// Semantic search over stored memories.
    ///
    /// A `limit` of `None` or `0` falls back to the configured recall limit.
    #[instrument(skip(self, query), level = "debug")]
    pub async fn search_memories(
        &self,
        query: &str,
        limit: Option<u32>,
    ) -> OnomaResult<MemorySearchResult> {
        const PREFIX: &str = "Failed to search memories";

        let limit = limit.filter(|l| *l > 0).unwrap_or(self.default_limit);
        let response = self
            .http
            .get(self.url("/memory/search"))
            .bearer_auth(&self.api_token)
            .query(&[("q", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await
            .map_err(|e| OnomaError::from(e).with_prefix(PREFIX))?;

        let response = check_status(response, PREFIX)?;
        let parsed: SearchResponse = decode(response, PREFIX).await?;
        Ok(parsed.into())
    }

    /// Aggregate counts for the account
    #[instrument(skip(self), level = "debug")]
    pub async fn get_memory_stats(&self) -> OnomaResult<MemoryStats> {
        const PREFIX: &str = "Failed to get memory stats";

        let response = self
            .http
            .get(self.url("/memory/stats"))
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| OnomaError::from(e).with_prefix(PREFIX))?;

        decode(check_status(response, PREFIX)?, PREFIX).await
    }

    /// All spaces; empty when the server omits the list
    #[instrument(skip(self), level = "debug")]
    pub async fn list_spaces(&self) -> OnomaResult<Vec<Space>> {
        const PREFIX: &str = "Failed to list spaces";

        let response = self
            .http
            .get(self.url("/spaces"))
            .bearer_auth(&self.api_token)
            .send()
            .await
            .map_err(|e| OnomaError::from(e).with_prefix(PREFIX))?;

        let parsed: SpacesResponse = decode(check_status(response, PREFIX)?, PREFIX).await?;
        Ok(parsed.spaces.unwrap_or_default())
    }

    /// Store one memory record.
    ///
    /// `context_type` of `None` stores a [`DEFAULT_CONTEXT_TYPE`] record.
    #[instrument(skip(self, content, metadata), level = "debug")]
    pub async fn create_memory(
        &self,
        content: &str,
        context_type: Option<&str>,
        metadata: Option<&serde_json::Value>,
    ) -> OnomaResult<Memory> {
        const PREFIX: &str = "Failed to create memory";

        let body = CreateMemoryRequest {
            content,
            context_type: context_type.unwrap_or(DEFAULT_CONTEXT_TYPE),
            metadata,
        };

        let response = self
            .http
            .post(self.url("/memory/contexts"))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| OnomaError::from(e).with_prefix(PREFIX))?;

        decode(check_status(response, PREFIX)?, PREFIX).await
    }

    /// Send a conversation excerpt to the extraction endpoint.
    ///
    /// The server picks out facts, stores them, and returns what it stored.
    #[instrument(skip(self, messages, metadata), fields(message_count = messages.len()), level = "debug")]
    pub async fn extract_context(
        &self,
        messages: &[ChatMessage],
        metadata: Option<&serde_json::Value>,
    ) -> OnomaResult<Vec<Memory>> {
        const PREFIX: &str = "Extract failed";

        let body = ExtractRequest { messages, metadata };

        let response = self
            .http
            .post(self.url("/memory/extract"))
            .bearer_auth(&self.api_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| OnomaError::from(e).with_prefix(PREFIX))?;

        let parsed: ExtractResponse = decode(check_status(response, PREFIX)?, PREFIX).await?;
        Ok(parsed.memories.unwrap_or_default())
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response, prefix: &str) -> OnomaResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| OnomaError::from(e).with_prefix(prefix))
}
