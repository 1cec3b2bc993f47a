//! Logging subscriber initialisation.

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{
    EnvFilter,
    fmt,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

use crate::config::{ServerConfig, observability::LogFormat};

use super::ObservabilityError;

/// Targets that are only interesting when something is wrong.
const QUIET_TARGETS: [&str; 6] = ["h2", "hyper", "tonic", "opentelemetry", "sqlx::query", "lettre"];

pub(super) fn init_subscriber(
    config: &ServerConfig,
    tracer_provider: Option<&SdkTracerProvider>,
) -> Result<(), ObservabilityError> {
    let fmt_layer = match config.logging.log_format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
    };

    let otel_layer = tracer_provider.map(|provider| {
        tracing_opentelemetry::layer()
            .with_tracer(provider.tracer(config.observability.otel_service_name.clone()))
    });

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directives(&config.logging.log_level)));

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(otel_layer)
        .with(filter)
        .try_init()?;

    Ok(())
}

fn filter_directives(level: &str) -> String {
    QUIET_TARGETS
        .iter()
        .fold(level.trim().to_owned(), |mut directives, target| {
            directives.push(',');
            directives.push_str(target);
            directives.push_str("=warn");
            directives
        })
}
