//! Auth Config

use boutique_app::auth::TokenSettings;
use clap::Args;
use jiff::SignedDuration;

/// Token signing settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret used to sign access and refresh tokens
    #[arg(long, env = "JWT_SECRET", hide_env_values = true)]
    pub jwt_secret: String,

    /// Access token lifetime in hours
    #[arg(long, env = "JWT_EXPIRATION", default_value_t = 24)]
    pub jwt_expiration_hours: i64,

    /// Refresh token lifetime in hours
    #[arg(long, env = "REFRESH_TOKEN_EXPIRATION", default_value_t = 168)]
    pub refresh_token_expiration_hours: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn token_settings(&self) -> TokenSettings {
        TokenSettings {
            secret: self.jwt_secret.clone(),
            access_ttl: SignedDuration::from_hours(self.jwt_expiration_hours),
            refresh_ttl: SignedDuration::from_hours(self.refresh_token_expiration_hours),
        }
    }
}
