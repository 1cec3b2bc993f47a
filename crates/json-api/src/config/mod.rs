//! Server configuration module

use boutique_app::context::AppSettings;
use clap::Parser;

use crate::config::{
    auth::AuthConfig,
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
    smtp::SmtpConfig,
};

pub(crate) mod auth;
pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;
pub(crate) mod smtp;

/// Boutique JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "boutique-json", about = "Boutique JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network and asset settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Tracing export settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Token signing settings.
    #[command(flatten)]
    pub auth: AuthConfig,

    /// Outbound mail settings.
    #[command(flatten)]
    pub smtp: SmtpConfig,
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

    /// Settings for building the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            max_connections: self.database.max_connections,
            run_migrations: self.database.run_migrations,
            tokens: self.auth.token_settings(),
            smtp: self.smtp.smtp_settings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_required_settings_are_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "boutique-json",
            "--database-url",
            "postgres://localhost/boutique",
            "--jwt-secret",
            "secret",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8080");
        assert!(!config.server.seed_on_startup);
        assert_eq!(config.server.cors_allowed_origins, vec!["*".to_string()]);
        assert_eq!(config.server.shutdown_timeout().as_secs(), 30);

        let settings = config.app_settings();

        assert_eq!(settings.max_connections, 10);
        assert!(settings.run_migrations);
        assert_eq!(settings.tokens.access_ttl, SignedDuration::from_hours(24));
        assert_eq!(settings.tokens.refresh_ttl, SignedDuration::from_hours(168));
        assert_eq!(settings.smtp.port, 587);
        assert_eq!(settings.smtp.currency, "COP");

        Ok(())
    }

    #[test]
    fn cors_origins_are_comma_separated() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "boutique-json",
            "--database-url",
            "postgres://localhost/boutique",
            "--jwt-secret",
            "secret",
            "--cors-allowed-origins",
            "http://localhost:3000,https://shop.example.com",
        ])?;

        assert_eq!(
            config.server.cors_allowed_origins,
            vec![
                "http://localhost:3000".to_string(),
                "https://shop.example.com".to_string()
            ]
        );

        Ok(())
    }
}
