use serde::Deserialize;

/// OTLP transport used by the span exporter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OtlpProtocol {
    #[default]
    Grpc,
    Http,
}

/// Configuration for `OpenTelemetry` distributed tracing.
///
/// When enabled, every slash command invocation span is exported via OTLP to
/// a collector (Jaeger, Grafana Tempo, etc.).
///
/// # Example
///
/// ```toml
/// [telemetry]
/// enabled = true
/// endpoint = "http://localhost:4317"
/// service_name = "slashbot"
/// sample_ratio = 1.0
/// protocol = "grpc"
/// ```
#[derive(Debug, Deserialize)]
pub struct TelemetryConfig {
    /// Whether `OpenTelemetry` tracing is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// OTLP exporter endpoint.
    #[serde(default = "default_otel_endpoint")]
    pub endpoint: String,
    /// Service name reported in traces.
    #[serde(default = "default_otel_service_name")]
    pub service_name: String,
    /// Sampling ratio (0.0 to 1.0). `1.0` traces every invocation.
    #[serde(default = "default_otel_sample_ratio")]
    pub sample_ratio: f64,
    #[serde(default)]
    pub protocol: OtlpProtocol,
    /// Exporter timeout in seconds.
    #[serde(default = "default_otel_timeout")]
    pub timeout_seconds: u64,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_otel_endpoint(),
            service_name: default_otel_service_name(),
            sample_ratio: default_otel_sample_ratio(),
            protocol: OtlpProtocol::default(),
            timeout_seconds: default_otel_timeout(),
        }
    }
}

fn default_otel_endpoint() -> String {
    "http://localhost:4317".to_owned()
}

fn default_otel_service_name() -> String {
    "slashbot".to_owned()
}

fn default_otel_sample_ratio() -> f64 {
    1.0
}

fn default_otel_timeout() -> u64 {
    10
}
