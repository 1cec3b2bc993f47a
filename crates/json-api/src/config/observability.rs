//! Logging and Tracing Config

use std::time::Duration;

use clap::Args;

/// How log lines are written to stdout.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// One line per event, for terminals.
    Compact,

    /// One JSON object per event, for log shippers.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// compact or json
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Requests slower than this are logged as warnings
    #[arg(long, env = "SLOW_REQUEST_THRESHOLD_MS", default_value_t = 1_000_u64)]
    pub slow_request_threshold_ms: u64,
}

/// OpenTelemetry export. Off unless `OTEL_ENABLED=true`.
#[derive(Debug, Args)]
pub struct ObservabilityConfig {
    #[arg(
        long,
        env = "OTEL_ENABLED",
        default_value_t = false,
        action = clap::ArgAction::Set
    )]
    pub otel_enabled: bool,

    /// Continue traces started by the storefront (`traceparent` header)
    #[arg(long, env = "OTEL_PARENT_PROPAGATION_ENABLED", default_value_t = false)]
    pub otel_parent_propagation_enabled: bool,

    /// OTLP gRPC collector
    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_ENDPOINT",
        default_value = "http://localhost:4317"
    )]
    pub otel_exporter_otlp_endpoint: String,

    #[arg(
        long,
        env = "OTEL_EXPORTER_OTLP_TIMEOUT_SECONDS",
        default_value_t = 3u64
    )]
    pub otel_exporter_otlp_timeout_seconds: u64,

    #[arg(long, env = "OTEL_SERVICE_NAME", default_value = "boutique-json")]
    pub otel_service_name: String,

    #[arg(
        long,
        env = "OTEL_SERVICE_VERSION",
        default_value = env!("CARGO_PKG_VERSION")
    )]
    pub otel_service_version: String,

    #[arg(
        long,
        env = "OTEL_DEPLOYMENT_ENVIRONMENT",
        default_value = "development"
    )]
    pub otel_deployment_environment: String,

    /// Fraction of root traces kept; clamped to 0.0..=1.0
    #[arg(long, env = "OTEL_TRACE_SAMPLE_RATIO", default_value_t = 1.0_f64)]
    pub otel_trace_sample_ratio: f64,
}

impl ObservabilityConfig {
    #[must_use]
    pub fn exporter_timeout(&self) -> Duration {
        Duration::from_secs(self.otel_exporter_otlp_timeout_seconds)
    }

    /// Sample ratio forced into the range the sampler accepts.
    #[must_use]
    pub fn sample_ratio(&self) -> f64 {
        if self.otel_trace_sample_ratio.is_nan() {
            return 1.0;
        }

        self.otel_trace_sample_ratio.clamp(0.0, 1.0)
    }
}
