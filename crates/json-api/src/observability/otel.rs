//! OTLP trace export.

use opentelemetry::KeyValue;
use opentelemetry_otlp::{SpanExporter, WithExportConfig as _};
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};

use crate::config::observability::ObservabilityConfig;

use super::ObservabilityError;

/// Batch exporter to the configured collector. Child spans follow their
/// parent's sampling decision; root spans are sampled by ratio.
pub(super) fn build_tracer_provider(
    otel: &ObservabilityConfig,
) -> Result<SdkTracerProvider, ObservabilityError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(otel.otel_exporter_otlp_endpoint.clone())
        .with_timeout(otel.exporter_timeout())
        .build()?;

    let sampler = Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(otel.sample_ratio())));

    Ok(SdkTracerProvider::builder()
        .with_resource(resource(otel))
        .with_sampler(sampler)
        .with_id_generator(RandomIdGenerator::default())
        .with_batch_exporter(exporter)
        .build())
}

fn resource(otel: &ObservabilityConfig) -> Resource {
    Resource::builder_empty()
        .with_service_name(otel.otel_service_name.clone())
        .with_attributes([
            KeyValue::new("service.version", otel.otel_service_version.clone()),
            KeyValue::new(
                "deployment.environment.name",
                otel.otel_deployment_environment.clone(),
            ),
        ])
        .build()
}
