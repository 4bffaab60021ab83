//! Host contract
//!
//! The host runtime implements [`PluginApi`] (and [`Prompter`] for
//! interactive auth). Plugins register their pieces through it during
//! `register`.

use super::PluginResult;
use crate::hooks::Hook;
use crate::provider::ProviderRegistration;
use crate::tools::Tool;
use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;

/// Registration surface a host exposes to one plugin
pub trait PluginApi {
    /// Raw plugin config as the host stores it
    fn plugin_config(&self) -> Option<&serde_json::Value>;

    fn register_tool(&mut self, tool: Arc<dyn Tool>);

    fn register_hook(&mut self, hook: Arc<dyn Hook>);

    fn register_cli(&mut self, cli: Arc<dyn CliHandler>);

    fn register_service(&mut self, service: Arc<dyn PluginService>);

    fn register_provider(&mut self, provider: ProviderRegistration);
}

/// A background service started and stopped with the host
pub trait PluginService: Send + Sync {
    fn id(&self) -> &str;

    fn start(&self);

    fn stop(&self);
}

/// A top-level command group the host adds to its CLI
#[async_trait]
pub trait CliHandler: Send + Sync {
    /// Command name on the host CLI (e.g. `onoma`)
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Subcommand names
    fn commands(&self) -> Vec<&'static str>;

    /// Run with the words after the command name; returns the exit code
    async fn run(
        &self,
        args: &[String],
        stdout: &mut (dyn Write + Send),
        stderr: &mut (dyn Write + Send),
    ) -> i32;
}

/// Returns an error message for a rejected answer
pub type Validator = fn(&str) -> Option<String>;

/// One free-text question for the user
#[derive(Debug, Clone)]
pub struct TextPrompt {
    pub message: String,
    pub initial_value: String,
    pub validate: Option<Validator>,
}

impl TextPrompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            initial_value: String::new(),
            validate: None,
        }
    }

    pub fn with_initial_value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Apply the validator, if any
    pub fn check(&self, answer: &str) -> Option<String> {
        self.validate.and_then(|validate| validate(answer))
    }
}

/// Interactive input supplied by the host
#[async_trait]
pub trait Prompter: Send + Sync {
    async fn text(&self, prompt: TextPrompt) -> PluginResult<String>;
}
