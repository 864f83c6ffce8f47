//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use std::sync::Once;
use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Database Metrics
    pub static ref DB_QUERIES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("postboard_db_queries_total", "Total number of database queries"),
        &["operation", "table"]
    ).expect("metric can be created");
    pub static ref DB_QUERY_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "postboard_db_query_duration_seconds",
            "Database query duration in seconds"
        ).buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0]),
        &["operation", "table"]
    ).expect("metric can be created");

    // Application Metrics
    pub static ref ACCOUNTS_REGISTERED_TOTAL: IntCounter = IntCounter::new(
        "postboard_accounts_registered_total",
        "Total number of accounts registered"
    ).expect("metric can be created");
    pub static ref MESSAGES_POSTED_TOTAL: IntCounter = IntCounter::new(
        "postboard_messages_posted_total",
        "Total number of messages posted"
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("postboard_errors_total", "Total number of error responses"),
        &["error_type"]
    ).expect("metric can be created");
}

static INIT: Once = Once::new();

/// Initialize metrics registry.
///
/// Safe to call more than once; only the first call registers.
pub fn init_metrics() {
    INIT.call_once(|| {
        REGISTRY
            .register(Box::new(DB_QUERIES_TOTAL.clone()))
            .expect("DB_QUERIES_TOTAL can be registered");
        REGISTRY
            .register(Box::new(DB_QUERY_DURATION_SECONDS.clone()))
            .expect("DB_QUERY_DURATION_SECONDS can be registered");
        REGISTRY
            .register(Box::new(ACCOUNTS_REGISTERED_TOTAL.clone()))
            .expect("ACCOUNTS_REGISTERED_TOTAL can be registered");
        REGISTRY
            .register(Box::new(MESSAGES_POSTED_TOTAL.clone()))
            .expect("MESSAGES_POSTED_TOTAL can be registered");
        REGISTRY
            .register(Box::new(ERRORS_TOTAL.clone()))
            .expect("ERRORS_TOTAL can be registered");

        tracing::info!("Metrics registry initialized");
    });
}

/// Record one database round trip.
pub fn observe_db_query(operation: &str, table: &str, elapsed: Duration) {
    DB_QUERIES_TOTAL
        .with_label_values(&[operation, table])
        .inc();
    DB_QUERY_DURATION_SECONDS
        .with_label_values(&[operation, table])
        .observe(elapsed.as_secs_f64());
}

/// Encode the registry in Prometheus text format.
///
/// # Returns
/// The content type to serve it with, and the encoded text
pub fn render() -> Result<(String, String), prometheus::Error> {
    let encoder = TextEncoder::new();
    let text = encoder.encode_to_string(&REGISTRY.gather())?;
    Ok((encoder.format_type().to_string(), text))
}
