//! Logging configuration parsed from environment variables.

/// Observability environment configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ObservabilityEnvConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub log_filter: String,
    pub ansi: bool,
}

impl Default for ObservabilityEnvConfig {
    fn default() -> Self {
        Self {
            log_filter: "info".to_string(),
            ansi: true,
        }
    }
}

impl ObservabilityEnvConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_filter: lookup("IRL_LOG").unwrap_or_else(|| "info".to_string()),
            ansi: lookup("IRL_LOG_ANSI")
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(true),
        }
    }
}
