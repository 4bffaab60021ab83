//! Core error types and traits

use thiserror::Error;

/// Result type alias for Onoma operations
pub type OnomaResult<T> = Result<T, OnomaError>;

/// Uniform accessors shared by the crate's error types.
pub trait UnifiedError: std::error::Error + Send + Sync {
    /// Get the error code for programmatic handling
    fn error_code(&self) -> &str;

    /// Get the human-readable error message, without the category prefix
    fn message(&self) -> &str;

    /// Get optional context about the error
    fn context(&self) -> Option<&str> {
        None
    }
}

/// Main error type for the Onoma plugin
#[derive(Error, Debug, Clone)]
pub enum OnomaError {
    /// Malformed configuration value
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        key: Option<String>,
        context: Option<String>,
    },

    /// Configuration object carries keys outside the recognized set
    #[error("Configuration error: {message}")]
    UnknownConfigKeys { message: String, keys: Vec<String> },

    /// No API token in plugin config or environment
    #[error("Configuration error: {message}")]
    MissingCredential { message: String },

    /// A `${VAR}` placeholder names an unset variable
    #[error("Configuration error: {message}")]
    UnresolvedEnvVar { message: String, var: String },

    /// HTTP request errors
    #[error("HTTP error: {message}")]
    Http {
        message: String,
        url: Option<String>,
        status_code: Option<u16>,
        context: Option<String>,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        context: Option<String>,
    },
}

impl OnomaError {
    /// Whether this error belongs to the configuration family
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::UnknownConfigKeys { .. }
                | Self::MissingCredential { .. }
                | Self::UnresolvedEnvVar { .. }
        )
    }

    /// Whether this error came from talking to the remote service
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Json { .. })
    }

    /// HTTP status code, when the server answered with a failure status
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => *status_code,
            _ => None,
        }
    }
}
