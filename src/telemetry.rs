use std::sync::Mutex;
use std::time::Instant;

use once_cell::sync::Lazy;
use opentelemetry::{KeyValue, trace::TracerProvider as _};
use opentelemetry_otlp::{Protocol, WithExportConfig, WithTonicConfig};
use opentelemetry_sdk::{
    Resource,
    trace::{RandomIdGenerator, Sampler, SdkTracerProvider},
};
use opentelemetry_semantic_conventions::{
    SCHEMA_URL,
    attribute::{SERVICE_NAME, SERVICE_VERSION},
    resource::DEPLOYMENT_ENVIRONMENT_NAME,
};
use rocket::{
    Data, Request, Response,
    fairing::{Fairing, Info, Kind},
    http::Header,
};
use tonic::metadata::{MetadataMap, MetadataValue};
use tracing::info_span;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

use crate::config::FidsConfig;

pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

static TELEMETRY_GUARD: Lazy<Mutex<Option<OtelGuard>>> = Lazy::new(|| Mutex::new(None));

pub struct TelemetryFairing;

#[derive(Clone)]
struct RequestTrace {
    span: tracing::Span,
    request_id: String,
    start_time: Instant,
}

#[rocket::async_trait]
impl Fairing for TelemetryFairing {
    fn info(&self) -> Info {
        Info {
            name: "OpenTelemetry",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        let method = request.method().to_string();
        let uri = request.uri().to_string();
        let request_id = Uuid::new_v4().to_string();

        let span = info_span!(
            "http_request",
            otel.name = format!("{} {}", method, uri),
            http.method = method,
            http.uri = uri,
            http.request_id = %request_id,
            http.status_code = tracing::field::Empty,
            http.duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            "error.type" = tracing::field::Empty,
            error.message = tracing::field::Empty,
            otel.status_code = tracing::field::Empty,
        );

        request.local_cache(|| {
            Some(RequestTrace {
                span,
                request_id,
                start_time: Instant::now(),
            })
        });
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let Some(trace) = request.local_cache(|| None::<RequestTrace>) else {
            return;
        };

        let duration = trace.start_time.elapsed();
        let status = response.status().code;

        trace.span.record("http.status_code", status);
        trace
            .span
            .record("http.duration_ms", duration.as_millis() as i64);
        if status >= 500 {
            trace.span.record("otel.status_code", "ERROR");
        }

        let _entered = trace.span.enter();
        if status >= 500 {
            tracing::error!("Completed request in {}ms with status {}", duration.as_millis(), status);
        } else {
            tracing::info!("Completed request in {}ms with status {}", duration.as_millis(), status);
        }

        response.set_header(Header::new(REQUEST_ID_HEADER, trace.request_id.clone()));
    }
}

/// The span opened for this request by [`TelemetryFairing`]. Errors are
/// recorded on it while the response is built.
pub fn request_span(request: &Request<'_>) -> Option<tracing::Span> {
    request
        .local_cache(|| None::<RequestTrace>)
        .as_ref()
        .map(|trace| trace.span.clone())
}

fn resource(config: &FidsConfig) -> Resource {
    Resource::builder()
        .with_schema_url(
            [
                KeyValue::new(SERVICE_NAME, env!("CARGO_PKG_NAME")),
                KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")),
                KeyValue::new(DEPLOYMENT_ENVIRONMENT_NAME, config.environment.clone()),
            ],
            SCHEMA_URL,
        )
        .build()
}

fn init_tracer_provider(
    config: &FidsConfig,
    endpoint: &str,
) -> Result<SdkTracerProvider, anyhow::Error> {
    let mut metadata = MetadataMap::new();
    if let Some(api_key) = config.otlp_api_key.as_deref() {
        metadata.insert("x-api-key", MetadataValue::try_from(api_key)?);
    }

    let mut builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .with_protocol(Protocol::Grpc)
        .with_metadata(metadata);

    if endpoint.starts_with("https://") {
        builder =
            builder.with_tls_config(tonic::transport::ClientTlsConfig::new().with_native_roots());
    }

    let exporter = builder.build()?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(Sampler::AlwaysOn)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource(config))
        .with_batch_exporter(exporter)
        .build())
}

pub struct OtelGuard {
    tracer_provider: SdkTracerProvider,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Err(err) = self.tracer_provider.shutdown() {
            eprintln!("Failed to shut down tracer provider: {:?}", err);
        }
    }
}

/// Installs the global subscriber. Spans are exported over OTLP only when an
/// endpoint is configured; console output is always on.
pub fn init_tracing(config: &FidsConfig) -> Result<(), anyhow::Error> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(endpoint) = config.otlp_endpoint.as_deref() else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .try_init()?;
        return Ok(());
    };

    let tracer_provider = init_tracer_provider(config, endpoint)?;
    let tracer = tracer_provider.tracer(env!("CARGO_PKG_NAME"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()?;

    if let Ok(mut guard) = TELEMETRY_GUARD.lock() {
        *guard = Some(OtelGuard { tracer_provider });
    }

    tracing::info!(endpoint = %endpoint, "Exporting traces over OTLP");
    Ok(())
}

/// Flushes pending spans. Safe to call when no exporter was installed.
pub fn shutdown_telemetry() {
    let guard = match TELEMETRY_GUARD.lock() {
        Ok(mut guard) => guard.take(),
        Err(_) => None,
    };

    if guard.is_some() {
        println!("Shutting down telemetry...");
    }
    drop(guard);
}
