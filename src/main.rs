//! Gatehouse Server
//!
//! Main entry point that wires all crates together and starts the server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use gatehouse_api::{AppDependencies, build_app};
use gatehouse_core::config::AppConfig;
use gatehouse_core::error::AppError;
use gatehouse_core::runtime::{RuntimeSettings, SharedRuntimeConfig};

#[tokio::main]
async fn main() {
    let settings = LoadSettings::from_env();
    let config = match AppConfig::load_from(&settings.dir, &settings.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(
        "Loaded config from '{}' (env: {})",
        settings.dir,
        settings.env
    );

    if let Err(e) = run(config, settings).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Where configuration is read from.
#[derive(Debug, Clone)]
struct LoadSettings {
    dir: String,
    env: String,
}

impl LoadSettings {
    fn from_env() -> Self {
        Self {
            dir: std::env::var("GATEHOUSE_CONFIG").unwrap_or_else(|_| "config".to_string()),
            env: std::env::var("GATEHOUSE_ENV").unwrap_or_else(|_| "development".to_string()),
        }
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig, settings: LoadSettings) -> Result<(), AppError> {
    tracing::info!("Starting Gatehouse v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Runtime flags ────────────────────────────────────
    let runtime = SharedRuntimeConfig::from_config(&config);
    #[cfg(unix)]
    spawn_reload_on_sighup(runtime.clone(), settings)?;
    #[cfg(not(unix))]
    let _ = settings;

    // ── Step 2: Backends ─────────────────────────────────────────
    let deps = AppDependencies::from_config(&config, Arc::new(runtime)).await?;

    // ── Step 3: Build and start HTTP server ──────────────────────
    let addr = config.server.bind_address();
    let app = build_app(config, deps)?;
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Gatehouse listening on {}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    tracing::info!("Gatehouse shut down gracefully");
    Ok(())
}

/// Re-reads the configuration on SIGHUP and swaps the runtime flags.
#[cfg(unix)]
fn spawn_reload_on_sighup(
    runtime: SharedRuntimeConfig,
    settings: LoadSettings,
) -> Result<(), AppError> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut hangup = signal(SignalKind::hangup())
        .map_err(|e| AppError::internal(format!("Failed to install SIGHUP handler: {}", e)))?;

    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            match AppConfig::load_from(&settings.dir, &settings.env) {
                Ok(config) => runtime.replace(RuntimeSettings::from_config(&config)).await,
                Err(e) => tracing::warn!(error = %e, "Config reload failed, keeping current settings"),
            }
        }
    });

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
