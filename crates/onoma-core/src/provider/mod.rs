//! `onoma-provider`: Onoma as an OpenAI-compatible model provider
//!
//! Registers a single `auto` model that routes to the best model on the
//! server side. The model catalog is attached only when a token is already
//! known; otherwise the host offers the [`ApiKeyAuth`] flow.

pub mod auth;
pub mod types;

pub use auth::{ApiKeyAuth, ProviderAuthMethod, validate_token};
pub use types::{
    AuthProfile, Credential, ModelCatalog, ModelCost, ModelDefinition, ProviderAuthResult,
    ProviderRegistration,
};

use crate::config::defaults::{API_TOKEN_ENV, API_URL_ENV};
use crate::config::{EnvSource, ProcessEnv};
use crate::plugins::{Plugin, PluginApi, PluginKind, PluginResult};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use types::OPENAI_COMPLETIONS_API;

pub const PROVIDER_PLUGIN_ID: &str = "onoma-provider";

/// Provider id models are namespaced under (`onoma/auto`)
pub const PROVIDER_ID: &str = "onoma";

/// Completion API used when neither config nor environment names one
pub const DEFAULT_COMPLETION_URL: &str = "https://completion.askonoma.com";

/// The single routed model
pub fn auto_model() -> ModelDefinition {
    ModelDefinition {
        id: "auto".to_string(),
        name: "Onoma Auto".to_string(),
        api: OPENAI_COMPLETIONS_API.to_string(),
        reasoning: true,
        input: vec!["text".to_string(), "image".to_string()],
        cost: ModelCost::default(),
        context_window: 200_000,
        max_tokens: 16_384,
    }
}

/// Catalog serving [`auto_model`] from `<api_url>/v1`
pub fn auto_model_catalog(api_url: &str, api_key: &str) -> ModelCatalog {
    ModelCatalog {
        base_url: format!("{}/v1", api_url),
        api_key: api_key.to_string(),
        api: OPENAI_COMPLETIONS_API.to_string(),
        auth_header: true,
        models: vec![auto_model()],
    }
}

pub(crate) fn trim_trailing_slashes(url: &str) -> &str {
    url.trim_end_matches('/')
}

/// Token and URL as the provider resolves them
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderSettings {
    /// Empty when no token is known
    pub api_token: String,
    /// Without trailing slashes
    pub api_url: String,
}

impl std::fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("has_token", &!self.api_token.is_empty())
            .field("api_url", &self.api_url)
            .finish()
    }
}

/// Config string, then environment, then default. Unknown keys are ignored.
pub fn resolve_provider_settings(raw: Option<&Value>, env: &dyn EnvSource) -> ProviderSettings {
    let string_key = |key: &str| {
        raw.and_then(|v| v.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let api_token = string_key("apiToken")
        .or_else(|| env.non_empty_var(API_TOKEN_ENV))
        .unwrap_or_default();
    let api_url = string_key("apiUrl")
        .or_else(|| env.non_empty_var(API_URL_ENV))
        .unwrap_or_else(|| DEFAULT_COMPLETION_URL.to_string());

    ProviderSettings {
        api_token,
        api_url: trim_trailing_slashes(&api_url).to_string(),
    }
}

pub struct OnomaProviderPlugin {
    env: Arc<dyn EnvSource + Send + Sync>,
}

impl OnomaProviderPlugin {
    pub fn new() -> Self {
        Self::with_env(Arc::new(ProcessEnv))
    }

    pub fn with_env(env: Arc<dyn EnvSource + Send + Sync>) -> Self {
        Self { env }
    }
}

impl Default for OnomaProviderPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for OnomaProviderPlugin {
    fn id(&self) -> &str {
        PROVIDER_PLUGIN_ID
    }

    fn name(&self) -> &str {
        "Onoma"
    }

    fn description(&self) -> &str {
        "AI model provider powered by Onoma"
    }

    fn kind(&self) -> Option<PluginKind> {
        Some(PluginKind::Provider)
    }

    fn register(&self, api: &mut dyn PluginApi) -> PluginResult<()> {
        let settings = resolve_provider_settings(api.plugin_config(), self.env.as_ref());
        let models = (!settings.api_token.is_empty())
            .then(|| auto_model_catalog(&settings.api_url, &settings.api_token));

        debug!(
            api_url = %settings.api_url,
            with_models = models.is_some(),
            "registering onoma provider"
        );

        api.register_provider(ProviderRegistration {
            id: PROVIDER_ID.to_string(),
            label: "Onoma".to_string(),
            env_vars: vec![API_TOKEN_ENV.to_string(), API_URL_ENV.to_string()],
            models,
            auth: vec![Arc::new(ApiKeyAuth::new(
                self.env.clone(),
                DEFAULT_COMPLETION_URL,
            ))],
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_settings_defaults() {
        let settings = resolve_provider_settings(None, &env(&[]));
        assert_eq!(settings.api_token, "");
        assert_eq!(settings.api_url, "https://completion.askonoma.com");
    }

    #[test]
    fn test_settings_precedence() {
        let env = env(&[
            ("ONOMA_API_TOKEN", "onm_env"),
            ("ONOMA_API_URL", "https://env.example///"),
        ]);
        let settings = resolve_provider_settings(None, &env);
        assert_eq!(settings.api_token, "onm_env");
        assert_eq!(settings.api_url, "https://env.example");

        let raw = json!({"apiToken": "onm_cfg", "apiUrl": "https://cfg.example/", "other": 1});
        let settings = resolve_provider_settings(Some(&raw), &env);
        assert_eq!(settings.api_token, "onm_cfg");
        assert_eq!(settings.api_url, "https://cfg.example");
    }

    #[test]
    fn test_settings_debug_hides_token() {
        let settings = resolve_provider_settings(None, &env(&[("ONOMA_API_TOKEN", "onm_x")]));
        assert!(!format!("{:?}", settings).contains("onm_x"));
    }

    #[test]
    fn test_auto_model_shape() {
        let value = serde_json::to_value(auto_model()).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "auto",
                "name": "Onoma Auto",
                "api": "openai-completions",
                "reasoning": true,
                "input": ["text", "image"],
                "cost": {"input": 0.0, "output": 0.0, "cacheRead": 0.0, "cacheWrite": 0.0},
                "contextWindow": 200000,
                "maxTokens": 16384
            })
        );
    }

    #[test]
    fn test_catalog_debug_hides_key() {
        let catalog = auto_model_catalog("https://x", "onm_secret");
        assert_eq!(catalog.base_url, "https://x/v1");
        assert!(!format!("{:?}", catalog).contains("onm_secret"));
    }
}
