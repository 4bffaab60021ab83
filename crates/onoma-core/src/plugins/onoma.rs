//! The `onoma` memory plugin

use super::api::{CliHandler, PluginApi, PluginService};
use super::{Plugin, PluginError, PluginKind, PluginResult};
use crate::client::OnomaClient;
use crate::commands::{MemoryCommand, render};
use crate::config::{EnvSource, ProcessEnv, parse_config_with_env};
use crate::hooks::{CaptureHook, RecallHook};
use crate::tools::{RememberTool, SearchTool};
use async_trait::async_trait;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info};

pub const PLUGIN_ID: &str = "onoma";

/// Wires config, client, tools, hooks, CLI and service into the host
pub struct OnomaPlugin {
    env: Arc<dyn EnvSource + Send + Sync>,
}

impl OnomaPlugin {
    /// Plugin reading the process environment
    pub fn new() -> Self {
        Self::with_env(Arc::new(ProcessEnv))
    }

    /// Plugin reading an explicit environment
    pub fn with_env(env: Arc<dyn EnvSource + Send + Sync>) -> Self {
        Self { env }
    }
}

impl Default for OnomaPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for OnomaPlugin {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn name(&self) -> &str {
        "Onoma"
    }

    fn description(&self) -> &str {
        "Onoma memory integration - Automatic context recall and capture"
    }

    fn kind(&self) -> Option<PluginKind> {
        Some(PluginKind::Memory)
    }

    fn register(&self, api: &mut dyn PluginApi) -> PluginResult<()> {
        let config = parse_config_with_env(api.plugin_config(), self.env.as_ref()).map_err(
            |source| PluginError::Config {
                plugin: PLUGIN_ID.to_string(),
                source,
            },
        )?;
        let config = Arc::new(config);
        let client = Arc::new(OnomaClient::new(&config).map_err(|e| PluginError::InitFailed {
            name: PLUGIN_ID.to_string(),
            reason: e.to_string(),
        })?);

        api.register_tool(Arc::new(SearchTool::new(client.clone(), config.clone())));
        api.register_tool(Arc::new(RememberTool::new(client.clone(), config.clone())));

        if config.auto_recall {
            api.register_hook(Arc::new(RecallHook::new(client.clone(), config.clone())));
        }
        if config.auto_capture {
            api.register_hook(Arc::new(CaptureHook::new(client.clone(), config.clone())));
        }

        api.register_cli(Arc::new(OnomaCli::new(client)));
        api.register_service(Arc::new(OnomaService));

        debug!(
            auto_recall = config.auto_recall,
            auto_capture = config.auto_capture,
            "onoma plugin registered"
        );
        Ok(())
    }
}

/// `onoma search|spaces|stats` on the host CLI
pub struct OnomaCli {
    client: Arc<OnomaClient>,
}

impl OnomaCli {
    pub fn new(client: Arc<OnomaClient>) -> Self {
        Self { client }
    }

    /// Render one command into the given writers and return the exit code
    pub async fn execute(
        &self,
        command: &MemoryCommand,
        stdout: &mut (dyn Write + Send),
        stderr: &mut (dyn Write + Send),
    ) -> i32 {
        match render(&self.client, command).await {
            Ok(text) => match stdout.write_all(text.as_bytes()).and_then(|()| stdout.flush()) {
                Ok(()) => 0,
                Err(e) => {
                    let _ = writeln!(stderr, "Failed to write output: {}", e);
                    1
                }
            },
            Err(failure) => {
                let _ = writeln!(stderr, "{}", failure);
                1
            }
        }
    }
}

#[async_trait]
impl CliHandler for OnomaCli {
    fn name(&self) -> &str {
        PLUGIN_ID
    }

    fn description(&self) -> &str {
        "Onoma memory operations"
    }

    fn commands(&self) -> Vec<&'static str> {
        vec!["search", "spaces", "stats"]
    }

    async fn run(
        &self,
        args: &[String],
        stdout: &mut (dyn Write + Send),
        stderr: &mut (dyn Write + Send),
    ) -> i32 {
        match MemoryCommand::from_args(args) {
            Some(command) => self.execute(&command, stdout, stderr).await,
            None => {
                let _ = writeln!(stderr, "Usage: onoma <search <query>|spaces|stats>");
                1
            }
        }
    }
}

/// Lifecycle service; only reports state
#[derive(Debug, Clone, Copy, Default)]
pub struct OnomaService;

impl PluginService for OnomaService {
    fn id(&self) -> &str {
        PLUGIN_ID
    }

    fn start(&self) {
        info!("onoma: connected");
    }

    fn stop(&self) {
        info!("onoma: stopped");
    }
}
