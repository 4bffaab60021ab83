//! HTTP client for the Onoma memory service
//!
//! Wraps the REST endpoints under `<apiUrl>/v1` (search, stats, spaces,
//! create, extract) and the OpenAI-compatible chat-completion endpoint.
//! Every call is a single bearer-authenticated request; there is no retry,
//! caching, or queuing.

mod chat;
mod error_check;
mod memory;
mod sse;
pub mod types;

pub use chat::{ChatOutput, ChatStream, DEFAULT_CHAT_MODEL};
pub use memory::DEFAULT_CONTEXT_TYPE;
pub use types::{ChatMessage, ChatOptions, Memory, MemorySearchResult, MemoryStats, Space};

use crate::config::OnomaConfig;
use crate::error::{OnomaError, OnomaResult};
use reqwest::Client;
use tracing::debug;

const USER_AGENT: &str = concat!("onoma-memory/", env!("CARGO_PKG_VERSION"));

/// Client for one Onoma account
#[derive(Clone)]
pub struct OnomaClient {
    http: Client,
    base_url: String,
    api_token: String,
    default_limit: u32,
}

impl OnomaClient {
    /// Create a client from resolved configuration
    pub fn new(config: &OnomaConfig) -> OnomaResult<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| OnomaError::config(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_http_client(config, http))
    }

    /// Create a client around an existing `reqwest::Client`
    pub fn with_http_client(config: &OnomaConfig, http: Client) -> Self {
        let base_url = format!("{}/v1", config.api_url.trim_end_matches('/'));
        debug!(base_url = %base_url, "creating onoma client");
        Self {
            http,
            base_url,
            api_token: config.api_token.clone(),
            default_limit: config.max_recall_results,
        }
    }

    /// Versioned API root, e.g. `https://api.askonoma.com/v1`
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Limit applied when a search does not name one
    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl std::fmt::Debug for OnomaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OnomaClient")
            .field("base_url", &self.base_url)
            .field("default_limit", &self.default_limit)
            .finish_non_exhaustive()
    }
}
