//! Server configuration module

use clap::Parser;

use crate::config::{
    auth::AuthConfig, db::DatabaseConfig, observability::ObservabilityConfig, server::ListenConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Storefront JSON Server configuration
#[derive(Debug, Parser)]
#[command(name = "storefront-json", about = "Storefront JSON Server", long_about = None)]
pub struct ServerConfig {
    #[command(flatten)]
    pub server: ListenConfig,

    /// Logging and slow-request settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Session and account settings.
    #[command(flatten)]
    pub auth: AuthConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::config::observability::LogFormat;

    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn defaults_apply_when_only_required_values_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--session-secret",
            SECRET,
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert_eq!(config.auth.starting_wallet, 100);
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert_eq!(config.observability.log_format, LogFormat::Compact);

        Ok(())
    }

    #[test]
    fn flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--session-secret",
            SECRET,
            "--port",
            "9090",
            "--log-format",
            "json",
            "--starting-wallet",
            "250",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:9090");
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.auth.starting_wallet, 250);

        Ok(())
    }

    #[test]
    fn short_session_secret_is_rejected() {
        let result = ServerConfig::try_parse_from([
            "storefront-json",
            "--database-url",
            "postgres://localhost/storefront",
            "--session-secret",
            "too-short",
        ]);

        assert!(result.is_err(), "expected short secret to be rejected");
    }
}
