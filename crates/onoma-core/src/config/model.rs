//! Resolved configuration record

use super::defaults::{
    DEFAULT_API_URL, DEFAULT_AUTO_CAPTURE, DEFAULT_AUTO_RECALL, DEFAULT_DEBUG,
    DEFAULT_MAX_RECALL_RESULTS,
};
use std::collections::HashMap;
use std::fmt;

/// Validated plugin settings.
///
/// Built once at registration and shared read-only for the rest of the
/// process lifetime. `api_token` is never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct OnomaConfig {
    /// Base URL of the memory API, without the `/v1` suffix
    pub api_url: String,
    /// Bearer token for every request
    pub api_token: String,
    /// Search memory before each agent turn
    pub auto_recall: bool,
    /// Extract memories after each agent turn
    pub auto_capture: bool,
    /// Result limit for recall and the default for the search tool
    pub max_recall_results: u32,
    /// Host space name to Onoma space name
    pub space_mapping: HashMap<String, String>,
    /// Emit extra debug log lines
    pub debug: bool,
}

impl OnomaConfig {
    /// Configuration with every default and the given token
    pub fn with_token(api_token: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: api_token.into(),
            auto_recall: DEFAULT_AUTO_RECALL,
            auto_capture: DEFAULT_AUTO_CAPTURE,
            max_recall_results: DEFAULT_MAX_RECALL_RESULTS,
            space_mapping: HashMap::new(),
            debug: DEFAULT_DEBUG,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_max_recall_results(mut self, max: u32) -> Self {
        self.max_recall_results = max;
        self
    }

    /// Token with all but the first four characters hidden
    pub fn masked_token(&self) -> String {
        let visible: String = self.api_token.chars().take(4).collect();
        format!("{}****", visible)
    }
}

impl fmt::Debug for OnomaConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnomaConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &self.masked_token())
            .field("auto_recall", &self.auto_recall)
            .field("auto_capture", &self.auto_capture)
            .field("max_recall_results", &self.max_recall_results)
            .field("space_mapping", &self.space_mapping)
            .field("debug", &self.debug)
            .finish()
    }
}
