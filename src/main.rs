use mcp_static::{build_router, serve_with_drain, AppState, Config, LogFormat};

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mcp_static=info,tower_http=debug".into());
    match config.log_format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
    }

    tracing::info!("Starting MCP static server");

    let shutdown_timeout = config.shutdown_timeout_secs;
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Set up Prometheus metrics recorder
    let prometheus_handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    // Initialize application state (corpus, tool catalog, auth gate)
    let start = std::time::Instant::now();
    let state = Arc::new(AppState::new(config)?);
    tracing::info!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "State initialized",
    );

    let app = build_router(state, Some(prometheus_handle));

    // Create TCP listener
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(address = %addr, "Server listening");

    // Stop accepting on signal, then give in-flight requests up to
    // `shutdown_timeout` seconds to finish.
    serve_with_drain(
        listener,
        app,
        shutdown_signal(),
        Duration::from_secs(shutdown_timeout),
    )
    .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
