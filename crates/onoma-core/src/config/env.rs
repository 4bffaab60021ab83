//! Environment lookups and `${VAR}` placeholder substitution

use crate::error::{OnomaError, OnomaResult};
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

/// Source of environment variables.
///
/// Resolution only ever reads through this trait, so tests can supply a map
/// instead of mutating the process environment.
pub trait EnvSource {
    /// Look up a variable; `None` when unset
    fn var(&self, name: &str) -> Option<String>;

    /// Look up a variable, treating the empty string as unset
    fn non_empty_var(&self, name: &str) -> Option<String> {
        self.var(name).filter(|v| !v.is_empty())
    }
}

/// The real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl EnvSource for HashMap<&str, &str> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }
}

/// Replace every `${VAR}` in `value` with the variable's value.
///
/// Fails on the first placeholder whose variable is unset or empty.
pub fn resolve_env_vars(value: &str, env: &dyn EnvSource) -> OnomaResult<String> {
    let mut missing: Option<String> = None;
    let resolved = PLACEHOLDER.replace_all(value, |caps: &Captures<'_>| {
        let name = &caps[1];
        match env.non_empty_var(name) {
            Some(v) => v,
            None => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    match missing {
        Some(var) => Err(OnomaError::unresolved_env_var(var)),
        None => Ok(resolved.into_owned()),
    }
}
