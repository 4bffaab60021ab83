//! Onoma memory for agent runtimes
//!
//! Two plugins ship from this crate:
//! - [`OnomaPlugin`] (`onoma`): automatic recall and capture, the
//!   `onoma_search` / `onoma_remember` tools, and the `onoma` CLI group
//! - [`OnomaProviderPlugin`] (`onoma-provider`): Onoma as an
//!   OpenAI-compatible model provider
//!
//! A host implements [`PluginApi`] and calls `register` on each.

pub use onoma_core::*;

/// Every plugin this crate provides, reading the process environment
pub fn all_plugins() -> Vec<Box<dyn Plugin>> {
    vec![
        Box::new(OnomaPlugin::new()),
        Box::new(OnomaProviderPlugin::new()),
    ]
}
