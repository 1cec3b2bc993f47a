//! Server Config

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Server runtime network settings.
#[derive(Debug, Args)]
pub struct ServerRuntimeConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Directory product images are served from
    #[arg(long, env = "UPLOAD_DIR", default_value = "../assets/images")]
    pub upload_dir: PathBuf,

    /// Directory holding the brand catalog files
    #[arg(long, env = "ASSETS_DIR", default_value = "../assets/products")]
    pub assets_dir: PathBuf,

    /// Seed the catalog before serving requests
    #[arg(long, env = "SEED_ON_STARTUP", default_value_t = false)]
    pub seed_on_startup: bool,

    /// Allowed CORS origins, comma separated; `*` allows any origin
    #[arg(
        long,
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub cors_allowed_origins: Vec<String>,

    /// Seconds in-flight requests get to finish after a shutdown signal
    #[arg(long, env = "SHUTDOWN_TIMEOUT_SECS", default_value = "30")]
    pub shutdown_timeout_secs: u64,
}

impl ServerRuntimeConfig {
    /// Get the socket address for binding.
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// How long a graceful shutdown may take.
    #[must_use]
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
