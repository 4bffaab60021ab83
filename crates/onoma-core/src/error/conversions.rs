//! From trait implementations for OnomaError conversions

use super::types::OnomaError;

impl From<serde_json::Error> for OnomaError {
    fn from(error: serde_json::Error) -> Self {
        Self::json(error.to_string())
    }
}

impl From<reqwest::Error> for OnomaError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        let url = error.url().map(|u| u.to_string());
        if error.is_decode() {
            return Self::Json {
                message: error.to_string(),
                context: url,
            };
        }
        Self::Http {
            message: error.to_string(),
            url,
            status_code,
            context: None,
        }
    }
}
