//! Cardiorisk Server
//!
//! Serves the cardiac-disease risk classifier over HTTP. The model artifact
//! is loaded once at startup; if it cannot be loaded the server still starts
//! and answers `/predict` with an error envelope.

use anyhow::Result;
use cardiorisk_server::{build_app, AppState, Cli, ServerConfig};
use clap::Parser;
use metrics_exporter_prometheus::PrometheusHandle;
use std::net::SocketAddr;
use tokio::signal;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    info!("Starting cardiorisk server");

    // Load configuration
    let config = ServerConfig::load(&cli.config, &cli)?;
    info!("Configuration loaded");
    info!("Model artifact: {}", config.model_path.display());

    // Initialize metrics
    let metrics_handle = init_metrics()?;

    // Load the model once; failures leave the service degraded, not down
    let state = AppState::new(&config, Some(metrics_handle));
    info!("Model state: {:?}", state.service.provider().state());

    let addr: SocketAddr = config.bind_address().parse()?;
    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            warn!("Shutdown signal received, stopping server...");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

/// Initialize tracing/logging
fn init_tracing(verbose: bool, json: bool) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("cardiorisk_server=debug,cardiorisk_model=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("cardiorisk_server=info,cardiorisk_model=info,tower_http=info")
        })
    };

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

/// Initialize metrics exporter and return handle for rendering
fn init_metrics() -> Result<PrometheusHandle> {
    use metrics_exporter_prometheus::PrometheusBuilder;

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics: {}", e))?;

    metrics::describe_counter!(
        "cardiorisk_requests_total",
        "Total number of /predict requests received"
    );
    metrics::describe_counter!(
        "cardiorisk_predictions_total",
        "Predictions served, by predicted outcome"
    );
    metrics::describe_counter!(
        "cardiorisk_prediction_errors_total",
        "Failed prediction requests, by error kind"
    );
    metrics::describe_histogram!(
        "cardiorisk_inference_latency_us",
        metrics::Unit::Microseconds,
        "Decode and inference latency in microseconds"
    );

    info!("Metrics exporter initialized");
    Ok(handle)
}
