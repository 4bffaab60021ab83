//! Plugin configuration
//!
//! The host hands the plugin a free-form JSON object. [`parse_config`] turns it,
//! together with the process environment, into an immutable [`OnomaConfig`].

pub mod defaults;
pub mod env;
pub mod model;
pub mod resolver;

pub use env::{EnvSource, ProcessEnv, resolve_env_vars};
pub use model::OnomaConfig;
pub use resolver::{ALLOWED_KEYS, parse_config, parse_config_with_env};
