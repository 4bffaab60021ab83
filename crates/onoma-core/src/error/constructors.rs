//! Constructor methods for OnomaError

use super::types::OnomaError;

impl OnomaError {
    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            key: None,
            context: None,
        }
    }

    /// Create a configuration error tied to one config key
    pub fn config_key(message: impl Into<String>, key: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            key: Some(key.into()),
            context: None,
        }
    }

    /// Create an unknown-keys error for the config object named `label`
    pub fn unknown_config_keys(label: &str, keys: Vec<String>) -> Self {
        Self::UnknownConfigKeys {
            message: format!("{} has unknown keys: {}", label, keys.join(", ")),
            keys,
        }
    }

    /// Create a missing-credential error
    pub fn missing_credential(message: impl Into<String>) -> Self {
        Self::MissingCredential {
            message: message.into(),
        }
    }

    /// Create an unresolved-placeholder error
    pub fn unresolved_env_var(var: impl Into<String>) -> Self {
        let var = var.into();
        Self::UnresolvedEnvVar {
            message: format!("Environment variable {} is not set", var),
            var,
        }
    }

    /// Create a new HTTP error
    pub fn http(message: impl Into<String>) -> Self {
        Self::Http {
            message: message.into(),
            url: None,
            status_code: None,
            context: None,
        }
    }

    /// Create an HTTP error for a failure status returned by the server
    pub fn http_status(
        message: impl Into<String>,
        url: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::Http {
            message: message.into(),
            url: Some(url.into()),
            status_code: Some(status_code),
            context: None,
        }
    }

    /// Create a new JSON error
    pub fn json(message: impl Into<String>) -> Self {
        Self::Json {
            message: message.into(),
            context: None,
        }
    }

    /// Prefix the message with what was being attempted
    pub fn with_prefix(self, prefix: &str) -> Self {
        match self {
            Self::Http {
                message,
                url,
                status_code,
                context,
            } => Self::Http {
                message: format!("{}: {}", prefix, message),
                url,
                status_code,
                context,
            },
            Self::Json { message, context } => Self::Json {
                message: format!("{}: {}", prefix, message),
                context,
            },
            other => other,
        }
    }
}
