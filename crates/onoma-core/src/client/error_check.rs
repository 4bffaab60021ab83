//! Response status checking

use crate::error::{OnomaError, OnomaResult};
use reqwest::Response;

/// Pass successful responses through; turn anything else into an HTTP error
/// of the form `<prefix>: <status reason>`.
pub(super) fn check_status(response: Response, prefix: &str) -> OnomaResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_str().to_string());

    Err(OnomaError::http_status(
        format!("{}: {}", prefix, reason),
        response.url().as_str(),
        status.as_u16(),
    ))
}
