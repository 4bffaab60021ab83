//! Default values and well-known names

/// Memory API used when neither config nor environment names one
pub const DEFAULT_API_URL: &str = "https://api.askonoma.com";

/// Environment fallback for the API token
pub const API_TOKEN_ENV: &str = "ONOMA_API_TOKEN";

/// Environment fallback for the API URL
pub const API_URL_ENV: &str = "ONOMA_API_URL";

pub const DEFAULT_AUTO_RECALL: bool = true;
pub const DEFAULT_AUTO_CAPTURE: bool = true;
pub const DEFAULT_MAX_RECALL_RESULTS: u32 = 5;
pub const DEFAULT_DEBUG: bool = false;
