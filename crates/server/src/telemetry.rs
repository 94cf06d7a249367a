//! Log subscriber and OpenTelemetry tracing initialization.
//!
//! Installs a [`tracing_subscriber`] registry with an `EnvFilter`, one `fmt`
//! layer in the configured [`LogFormat`], and, when enabled, an
//! OpenTelemetry layer backed by an OTLP exporter.

use std::time::Duration;

use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{BatchSpanProcessor, Sampler, SdkTracerProvider};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{LogFormat, LoggingConfig, OtlpProtocol, TelemetryConfig};

/// Handle returned by [`init`]. Call [`TelemetryGuard::shutdown`] to flush
/// pending spans before exit.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl TelemetryGuard {
    /// Flush pending spans and shut down the exporter.
    pub fn shutdown(mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!(error = %e, "OpenTelemetry tracer provider shutdown failed");
        }
    }
}

/// Install the global tracing subscriber.
///
/// A broken OTLP exporter configuration never stops the server: the error
/// is logged and only the `fmt` layer is installed.
pub fn init(logging: &LoggingConfig, telemetry: &TelemetryConfig) -> TelemetryGuard {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = logging.format == LogFormat::Json;
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer());
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json());

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer);

    if !telemetry.enabled {
        registry.init();
        return TelemetryGuard { provider: None };
    }

    let exporter = match build_exporter(telemetry) {
        Ok(exporter) => exporter,
        Err(e) => {
            registry.init();
            tracing::error!(
                error = %e,
                endpoint = %telemetry.endpoint,
                "failed to build OTLP exporter, falling back to log-only tracing"
            );
            return TelemetryGuard { provider: None };
        }
    };

    let resource = Resource::builder()
        .with_attributes([
            KeyValue::new("service.name", telemetry.service_name.clone()),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ])
        .build();

    let provider = SdkTracerProvider::builder()
        .with_span_processor(BatchSpanProcessor::builder(exporter).build())
        .with_sampler(sampler(telemetry.sample_ratio))
        .with_resource(resource)
        .build();

    global::set_tracer_provider(provider.clone());

    let tracer = provider.tracer("slashbot");
    registry
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .init();

    info!(
        endpoint = %telemetry.endpoint,
        protocol = ?telemetry.protocol,
        sample_ratio = telemetry.sample_ratio,
        "OpenTelemetry tracing enabled"
    );

    TelemetryGuard {
        provider: Some(provider),
    }
}

fn sampler(ratio: f64) -> Sampler {
    if (ratio - 1.0).abs() < f64::EPSILON {
        Sampler::AlwaysOn
    } else if ratio <= 0.0 {
        Sampler::AlwaysOff
    } else {
        Sampler::TraceIdRatioBased(ratio)
    }
}

fn build_exporter(
    config: &TelemetryConfig,
) -> Result<opentelemetry_otlp::SpanExporter, opentelemetry::trace::TraceError> {
    let timeout = Duration::from_secs(config.timeout_seconds);

    match config.protocol {
        OtlpProtocol::Http => opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_endpoint(&config.endpoint)
            .with_timeout(timeout)
            .build(),
        OtlpProtocol::Grpc => opentelemetry_otlp::SpanExporter::builder()
            .with_tonic()
            .with_endpoint(&config.endpoint)
            .with_timeout(timeout)
            .build(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_ratio_always_samples() {
        assert!(matches!(sampler(1.0), Sampler::AlwaysOn));
    }

    #[test]
    fn zero_ratio_never_samples() {
        assert!(matches!(sampler(0.0), Sampler::AlwaysOff));
        assert!(matches!(sampler(-1.0), Sampler::AlwaysOff));
    }

    #[test]
    fn partial_ratio_is_ratio_based() {
        assert!(matches!(sampler(0.5), Sampler::TraceIdRatioBased(r) if (r - 0.5).abs() < f64::EPSILON));
    }
}
