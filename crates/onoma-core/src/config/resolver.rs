//! Raw plugin config + environment → [`OnomaConfig`]

use super::defaults::{
    API_TOKEN_ENV, API_URL_ENV, DEFAULT_API_URL, DEFAULT_AUTO_CAPTURE, DEFAULT_AUTO_RECALL,
    DEFAULT_DEBUG, DEFAULT_MAX_RECALL_RESULTS,
};
use super::env::{EnvSource, ProcessEnv, resolve_env_vars};
use super::model::OnomaConfig;
use crate::error::{OnomaError, OnomaResult};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

/// Keys accepted in the plugin config object
pub const ALLOWED_KEYS: &[&str] = &[
    "apiUrl",
    "apiToken",
    "autoRecall",
    "autoCapture",
    "maxRecallResults",
    "spaceMapping",
    "debug",
];

const CONFIG_LABEL: &str = "onoma config";

/// Resolve plugin config against the process environment
pub fn parse_config(raw: Option<&Value>) -> OnomaResult<OnomaConfig> {
    parse_config_with_env(raw, &ProcessEnv)
}

/// Resolve plugin config against an explicit environment.
///
/// Anything that is not a JSON object is treated as an empty object.
pub fn parse_config_with_env(raw: Option<&Value>, env: &dyn EnvSource) -> OnomaResult<OnomaConfig> {
    let empty = Map::new();
    let cfg = raw.and_then(Value::as_object).unwrap_or(&empty);

    assert_allowed_keys(cfg, ALLOWED_KEYS, CONFIG_LABEL)?;

    let api_token = match non_empty_string(cfg, "apiToken")? {
        Some(token) => Some(resolve_env_vars(token, env)?),
        None => env.non_empty_var(API_TOKEN_ENV),
    }
    .filter(|t| !t.is_empty())
    .ok_or_else(|| {
        OnomaError::missing_credential(format!(
            "onoma: apiToken is required (set in plugin config or {} env var)",
            API_TOKEN_ENV
        ))
    })?;

    let api_url = match non_empty_string(cfg, "apiUrl")? {
        Some(url) => resolve_env_vars(url, env)?,
        None => env
            .non_empty_var(API_URL_ENV)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
    };

    let config = OnomaConfig {
        api_url,
        api_token,
        auto_recall: optional_bool(cfg, "autoRecall")?.unwrap_or(DEFAULT_AUTO_RECALL),
        auto_capture: optional_bool(cfg, "autoCapture")?.unwrap_or(DEFAULT_AUTO_CAPTURE),
        max_recall_results: optional_count(cfg, "maxRecallResults")?
            .unwrap_or(DEFAULT_MAX_RECALL_RESULTS),
        space_mapping: optional_mapping(cfg, "spaceMapping")?.unwrap_or_default(),
        debug: optional_bool(cfg, "debug")?.unwrap_or(DEFAULT_DEBUG),
    };

    debug!(api_url = %config.api_url, "resolved onoma config");
    Ok(config)
}

fn assert_allowed_keys(cfg: &Map<String, Value>, allowed: &[&str], label: &str) -> OnomaResult<()> {
    let unknown: Vec<String> = cfg
        .keys()
        .filter(|k| !allowed.contains(&k.as_str()))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(OnomaError::unknown_config_keys(label, unknown))
    }
}

/// A string value, with `None` for absent, `null`, or empty.
fn non_empty_string<'a>(cfg: &'a Map<String, Value>, key: &str) -> OnomaResult<Option<&'a str>> {
    match cfg.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(type_error(key, "a string")),
    }
}

fn optional_bool(cfg: &Map<String, Value>, key: &str) -> OnomaResult<Option<bool>> {
    match cfg.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(type_error(key, "a boolean")),
    }
}

fn optional_count(cfg: &Map<String, Value>, key: &str) -> OnomaResult<Option<u32>> {
    match cfg.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| type_error(key, "a non-negative integer")),
    }
}

fn optional_mapping(
    cfg: &Map<String, Value>,
    key: &str,
) -> OnomaResult<Option<HashMap<String, String>>> {
    match cfg.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => map
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => Ok((k.clone(), s.clone())),
                _ => Err(type_error(key, "an object of strings")),
            })
            .collect::<OnomaResult<HashMap<_, _>>>()
            .map(Some),
        Some(_) => Err(type_error(key, "an object of strings")),
    }
}

fn type_error(key: &str, expected: &str) -> OnomaError {
    OnomaError::config_key(format!("{} {} must be {}", CONFIG_LABEL, key, expected), key)
}
