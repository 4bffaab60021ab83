//! Interactive API-key setup for the provider

use super::types::{AuthProfile, Credential, ProviderAuthResult};
use super::{PROVIDER_ID, auto_model_catalog, trim_trailing_slashes};
use crate::config::EnvSource;
use crate::config::defaults::{API_TOKEN_ENV, API_URL_ENV};
use crate::plugins::{PluginError, PluginResult, Prompter, TextPrompt};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Prefix every Onoma API token carries
pub const TOKEN_PREFIX: &str = "onm_";

/// One way of obtaining provider credentials
#[async_trait]
pub trait ProviderAuthMethod: Send + Sync {
    fn id(&self) -> &str;

    fn label(&self) -> &str;

    fn hint(&self) -> &str {
        ""
    }

    /// Flow kind understood by the host
    fn kind(&self) -> &str {
        "custom"
    }

    async fn run(&self, prompter: &dyn Prompter) -> PluginResult<ProviderAuthResult>;
}

/// `None` when the answer is an Onoma token
pub fn validate_token(value: &str) -> Option<String> {
    if value.trim().starts_with(TOKEN_PREFIX) {
        None
    } else {
        Some(format!("Must start with {}", TOKEN_PREFIX))
    }
}

/// Prompts for a token and URL and produces an `onoma:default` profile
pub struct ApiKeyAuth {
    env: Arc<dyn EnvSource + Send + Sync>,
    default_url: String,
}

impl ApiKeyAuth {
    pub fn new(env: Arc<dyn EnvSource + Send + Sync>, default_url: impl Into<String>) -> Self {
        Self {
            env,
            default_url: default_url.into(),
        }
    }
}

#[async_trait]
impl ProviderAuthMethod for ApiKeyAuth {
    fn id(&self) -> &str {
        "api_key"
    }

    fn label(&self) -> &str {
        "API Key"
    }

    fn hint(&self) -> &str {
        "Enter your Onoma API token (onm_...)"
    }

    async fn run(&self, prompter: &dyn Prompter) -> PluginResult<ProviderAuthResult> {
        let token_prompt = TextPrompt::new("Onoma API Token")
            .with_initial_value(self.env.non_empty_var(API_TOKEN_ENV).unwrap_or_default())
            .with_validator(validate_token);
        let answer = prompter.text(token_prompt.clone()).await?;
        if let Some(message) = token_prompt.check(&answer) {
            return Err(PluginError::InvalidInput(message));
        }
        let token = answer.trim().to_string();

        let url = prompter
            .text(
                TextPrompt::new("Onoma API URL").with_initial_value(
                    self.env
                        .non_empty_var(API_URL_ENV)
                        .unwrap_or_else(|| self.default_url.clone()),
                ),
            )
            .await?;
        let api_url = trim_trailing_slashes(&url);
        debug!(api_url = %api_url, "onoma provider credentials collected");

        let catalog = auto_model_catalog(api_url, &token);
        Ok(ProviderAuthResult {
            profiles: vec![AuthProfile {
                profile_id: format!("{}:default", PROVIDER_ID),
                credential: Credential::Token {
                    provider: PROVIDER_ID.to_string(),
                    token,
                },
            }],
            config_patch: json!({
                "models": { "providers": { PROVIDER_ID: catalog } }
            }),
            default_model: Some(format!("{}/auto", PROVIDER_ID)),
            notes: vec!["Onoma \"auto\" routes to the best model automatically.".to_string()],
        })
    }
}
