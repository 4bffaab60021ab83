//! Provider registration records
//!
//! These serialize with the host's camelCase field names so an auth result's
//! config patch can be merged into the host config as-is.

use super::auth::ProviderAuthMethod;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Wire protocol spoken by a model catalog
pub const OPENAI_COMPLETIONS_API: &str = "openai-completions";

/// Per-million-token prices
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCost {
    pub input: f64,
    pub output: f64,
    pub cache_read: f64,
    pub cache_write: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDefinition {
    pub id: String,
    pub name: String,
    pub api: String,
    pub reasoning: bool,
    /// Accepted input modalities (`text`, `image`)
    pub input: Vec<String>,
    pub cost: ModelCost,
    pub context_window: u64,
    pub max_tokens: u64,
}

/// Endpoint and models a provider serves
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelCatalog {
    pub base_url: String,
    pub api_key: String,
    pub api: String,
    pub auth_header: bool,
    pub models: Vec<ModelDefinition>,
}

impl fmt::Debug for ModelCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelCatalog")
            .field("base_url", &self.base_url)
            .field("api_key", &"****")
            .field("api", &self.api)
            .field("auth_header", &self.auth_header)
            .field("models", &self.models)
            .finish()
    }
}

/// A model provider as handed to the host
#[derive(Clone)]
pub struct ProviderRegistration {
    pub id: String,
    pub label: String,
    /// Environment variables the provider reads
    pub env_vars: Vec<String>,
    /// Only present when credentials are already known
    pub models: Option<ModelCatalog>,
    pub auth: Vec<Arc<dyn ProviderAuthMethod>>,
}

impl fmt::Debug for ProviderRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistration")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("env_vars", &self.env_vars)
            .field("models", &self.models)
            .field(
                "auth",
                &self.auth.iter().map(|a| a.id().to_string()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Stored secret for a provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Credential {
    Token { provider: String, token: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProfile {
    pub profile_id: String,
    pub credential: Credential,
}

/// Outcome of an interactive auth flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderAuthResult {
    pub profiles: Vec<AuthProfile>,
    /// Fragment to merge into the host config
    pub config_patch: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}
