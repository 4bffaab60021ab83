//! Session identifiers attached to captured memories

use regex::Regex;
use std::sync::LazyLock;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9_]").expect("session pattern is valid"));
static UNDERSCORE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_+").expect("session pattern is valid"));

/// Turn a host session key into a storage-safe identifier.
///
/// Characters outside `[A-Za-z0-9_]` become `_`, runs of `_` collapse to one,
/// and a single leading and trailing `_` are dropped. Idempotent.
pub fn build_session_id(session_key: &str) -> String {
    let replaced = DISALLOWED.replace_all(session_key, "_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&replaced, "_");
    let trimmed = collapsed.strip_prefix('_').unwrap_or(&collapsed);
    let trimmed = trimmed.strip_suffix('_').unwrap_or(trimmed);
    trimmed.to_string()
}
