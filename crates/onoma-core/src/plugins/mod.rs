//! Plugin entry points
//!
//! Provides:
//! - the host contract ([`PluginApi`] and friends)
//! - [`OnomaPlugin`], the memory plugin
//! - re-export of [`OnomaProviderPlugin`], the model provider plugin

mod api;
mod onoma;

pub use api::{CliHandler, PluginApi, PluginService, Prompter, TextPrompt, Validator};
pub use onoma::{OnomaCli, OnomaPlugin, OnomaService};

pub use crate::hooks::Hook;
pub use crate::provider::OnomaProviderPlugin;

use crate::error::OnomaError;
use serde::{Deserialize, Serialize};

/// Plugin result type
pub type PluginResult<T> = Result<T, PluginError>;

/// Plugin error types
#[derive(Debug, thiserror::Error)]
pub enum PluginError {
    /// Configuration could not be resolved; registration stops
    #[error("Plugin '{plugin}' configuration failed: {source}")]
    Config {
        plugin: String,
        #[source]
        source: OnomaError,
    },

    /// Plugin initialization failed
    #[error("Plugin '{name}' initialization failed: {reason}")]
    InitFailed { name: String, reason: String },

    /// An interactive answer was rejected
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The host could not complete a request
    #[error("Plugin host error: {0}")]
    Host(String),
}

impl PluginError {
    /// The underlying configuration error, if this is one
    pub fn config_error(&self) -> Option<&OnomaError> {
        match self {
            PluginError::Config { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// What a plugin contributes to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PluginKind {
    /// Long-term memory
    Memory,
    /// Model provider
    Provider,
}

/// Main plugin trait
pub trait Plugin: Send + Sync {
    /// Stable identifier
    fn id(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    fn kind(&self) -> Option<PluginKind> {
        None
    }

    /// Register everything this plugin provides
    fn register(&self, api: &mut dyn PluginApi) -> PluginResult<()>;
}
