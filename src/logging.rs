// src/logging.rs
//! Shared tracing setup for both service binaries.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize logging from `RUST_LOG`/`LOG_FORMAT`. Human-readable output by
/// default, JSON when `LOG_FORMAT=json`.
pub fn init_logging(service: &str) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cfg!(debug_assertions) {
            "debug,healthyeats_ai=trace,reqwest=info,hyper=info,tower=info".to_string()
        } else {
            "info,healthyeats_ai=info,reqwest=warn,hyper=warn,tower=warn".to_string()
        }
    });

    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&log_level))?;

    let fmt_layer = if std::env::var("LOG_FORMAT").as_deref() == Ok("json") {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .with_target(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("{} starting up...", service);
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Build mode: {}",
        if cfg!(debug_assertions) {
            "development"
        } else {
            "production"
        }
    );
    tracing::info!("Log level: {}", log_level);

    Ok(())
}
