//! Axum API server binary.

use std::net::SocketAddr;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vgen_api::{create_router, metrics, ApiConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("Failed to install rustls crypto provider"))?;

    let config = ApiConfig::from_env();
    init_tracing(log_as_json(std::env::var("LOG_FORMAT").ok().as_deref(), &config))?;

    info!("Starting vgen-api");
    info!(
        "API config: host={}, port={}, environment={}",
        config.host, config.port, config.environment
    );

    let state = AppState::new(config.clone()).context("Failed to create application state")?;

    let metrics_enabled = std::env::var("METRICS_ENABLED")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(true);

    let metrics_handle = if metrics_enabled {
        info!("Prometheus metrics enabled at /metrics");
        Some(metrics::init_metrics().context("Failed to install metrics recorder")?)
    } else {
        None
    };

    let app = create_router(state, metrics_handle);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid bind address")?;

    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// JSON when `LOG_FORMAT=json`, or in production when `LOG_FORMAT` is unset.
fn log_as_json(log_format: Option<&str>, config: &ApiConfig) -> bool {
    match log_format {
        Some(format) => format.eq_ignore_ascii_case("json"),
        None => config.is_production(),
    }
}

/// Colored output for dev, JSON for log collectors.
fn init_tracing(use_json: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::from_default_env().add_directive("vgen=info".parse()?);

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Received shutdown signal");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_selection() {
        let dev = ApiConfig::default();
        let prod = ApiConfig {
            environment: "production".to_string(),
            ..ApiConfig::default()
        };

        assert!(!log_as_json(None, &dev));
        assert!(log_as_json(None, &prod));
        assert!(log_as_json(Some("JSON"), &dev));
        assert!(!log_as_json(Some("pretty"), &prod));
    }
}
