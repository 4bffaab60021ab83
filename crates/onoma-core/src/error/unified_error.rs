//! UnifiedError trait implementation for OnomaError

use super::types::{OnomaError, UnifiedError};

impl UnifiedError for OnomaError {
    fn error_code(&self) -> &str {
        match self {
            Self::Config { .. } => "ONOMA_CONFIG",
            Self::UnknownConfigKeys { .. } => "ONOMA_CONFIG_UNKNOWN_KEYS",
            Self::MissingCredential { .. } => "ONOMA_CONFIG_MISSING_CREDENTIAL",
            Self::UnresolvedEnvVar { .. } => "ONOMA_CONFIG_UNRESOLVED_ENV",
            Self::Http { .. } => "ONOMA_HTTP",
            Self::Json { .. } => "ONOMA_JSON",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::Config { message, .. } => message,
            Self::UnknownConfigKeys { message, .. } => message,
            Self::MissingCredential { message } => message,
            Self::UnresolvedEnvVar { message, .. } => message,
            Self::Http { message, .. } => message,
            Self::Json { message, .. } => message,
        }
    }

    fn context(&self) -> Option<&str> {
        match self {
            Self::Config { context, .. } => context.as_deref(),
            Self::Http { context, .. } => context.as_deref(),
            Self::Json { context, .. } => context.as_deref(),
            _ => None,
        }
    }
}
