use anyhow::{anyhow, Error};
use opentelemetry::{global, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, runtime, trace, Resource};
use tonic::metadata::{MetadataKey, MetadataMap};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::{Settings, TelemetryConfig};

const API_KEY_HEADER: &str = "x-honeycomb-team";
const SERVICE_NAME: &str = "farmhand";

/// Installs the global subscriber. `RUST_LOG` takes precedence over the configured level.
///
/// With a receiver configured, spans (including the HTTP request spans) are also exported
/// over OTLP in batches and flushed by `shutdown_tracer_provider` on exit.
pub fn init_tracer(settings: &Settings) -> Result<(), Error> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .map_err(|e| anyhow!("Invalid log level {}: {}", settings.log_level, e))?;

    let otlp_layer = match &settings.telemetry.receiver_url {
        Some(receiver_url) => {
            let tracer = otlp_tracer(receiver_url, &settings.telemetry)?;
            Some(tracing_opentelemetry::layer().with_tracer(tracer))
        }
        None => None,
    };

    let subscriber = Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .with(otlp_layer);

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to install `tracing` subscriber: {}", e))?;

    if let Some(receiver_url) = &settings.telemetry.receiver_url {
        tracing::info!(
            target = module_path!(),
            receiver_url = receiver_url.as_str(),
            "Exporting spans"
        );
    }

    Ok(())
}

fn otlp_tracer(receiver_url: &str, config: &TelemetryConfig) -> Result<trace::Tracer, Error> {
    let exporter = opentelemetry_otlp::new_exporter()
        .tonic()
        .with_endpoint(receiver_url)
        .with_metadata(headers(config)?);

    global::set_text_map_propagator(TraceContextPropagator::new());

    // Also registers the global tracer provider used by `RequestTracing`.
    let tracer = opentelemetry_otlp::new_pipeline()
        .tracing()
        .with_exporter(exporter)
        .with_trace_config(
            trace::config().with_resource(Resource::new(vec![KeyValue::new(
                "service.name",
                SERVICE_NAME,
            )])),
        )
        .install_batch(runtime::Tokio)?;

    Ok(tracer)
}

fn headers(config: &TelemetryConfig) -> Result<MetadataMap, Error> {
    let mut metadata = MetadataMap::new();

    if let Some(api_key) = &config.api_key {
        let value = api_key
            .parse()
            .map_err(|_| anyhow!("TELEMETRY_API_KEY is not a valid header value"))?;
        metadata.insert(MetadataKey::from_static(API_KEY_HEADER), value);
    }

    Ok(metadata)
}
