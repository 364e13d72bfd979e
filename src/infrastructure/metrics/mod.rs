//! Prometheus Metrics Module
//!
//! Application-wide metrics collected with Prometheus.
//!
//! # Metrics Collected
//! - HTTP request counts by method, path, and status
//! - HTTP request latency histograms
//! - Active chat WebSocket connections
//! - Chat messages by persistence outcome
//! - CTA clicks by scope
//! - Requests rejected by the rate limiter

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "tutor_platform";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// HTTP request counter - tracks total requests by method, path, and status code
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

/// HTTP request latency histogram - tracks request duration in seconds
pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Open chat WebSocket connections
pub static CHAT_CONNECTIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::with_opts(
        Opts::new("chat_connections_active", "Open department chat connections")
            .namespace(NAMESPACE),
    )
    .expect("Failed to create CHAT_CONNECTIONS_ACTIVE metric")
});

/// Chat messages by outcome ("persisted", "failed")
pub static CHAT_MESSAGES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("chat_messages_total", "Department chat messages received").namespace(NAMESPACE),
        &["outcome"],
    )
    .expect("Failed to create CHAT_MESSAGES_TOTAL metric")
});

/// CTA clicks by scope ("department", "platform")
pub static CTA_CLICKS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cta_clicks_total", "Tracked call-to-action clicks").namespace(NAMESPACE),
        &["scope"],
    )
    .expect("Failed to create CTA_CLICKS_TOTAL metric")
});

/// Rate limiter rejections by scope ("auth", "nucleus")
pub static RATE_LIMITED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("rate_limited_total", "Requests rejected by the rate limiter")
            .namespace(NAMESPACE),
        &["scope"],
    )
    .expect("Failed to create RATE_LIMITED_TOTAL metric")
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .expect("Failed to register HTTP_REQUESTS_TOTAL");
    registry
        .register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register HTTP_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(CHAT_CONNECTIONS_ACTIVE.clone()))
        .expect("Failed to register CHAT_CONNECTIONS_ACTIVE");
    registry
        .register(Box::new(CHAT_MESSAGES_TOTAL.clone()))
        .expect("Failed to register CHAT_MESSAGES_TOTAL");
    registry
        .register(Box::new(CTA_CLICKS_TOTAL.clone()))
        .expect("Failed to register CTA_CLICKS_TOTAL");
    registry
        .register(Box::new(RATE_LIMITED_TOTAL.clone()))
        .expect("Failed to register RATE_LIMITED_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Record one finished HTTP request
pub fn record_http_request(method: &str, path: &str, status: &str, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, status])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn chat_connection_opened() {
    CHAT_CONNECTIONS_ACTIVE.inc();
}

pub fn chat_connection_closed() {
    CHAT_CONNECTIONS_ACTIVE.dec();
}

/// Record a chat message by outcome ("persisted" or "failed")
pub fn record_chat_message(outcome: &str) {
    CHAT_MESSAGES_TOTAL.with_label_values(&[outcome]).inc();
}

/// Record a CTA click by scope ("department" or "platform")
pub fn record_cta_click(scope: &str) {
    CTA_CLICKS_TOTAL.with_label_values(&[scope]).inc();
}

pub fn record_rate_limited(scope: &str) {
    RATE_LIMITED_TOTAL.with_label_values(&[scope]).inc();
}
