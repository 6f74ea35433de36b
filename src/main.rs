//! Waitroom Server: virtual waiting room in front of a demo service.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use waitroom_api::handlers::pages::service_routes;
use waitroom_api::{AppState, build_app};
use waitroom_core::config::AppConfig;
use waitroom_core::error::AppError;
use waitroom_core::traits::store::TokenStore;
use waitroom_store::StoreManager;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("WAITROOM_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
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
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Waitroom v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Token store ──────────────────────────────────────
    tracing::info!("Initializing token store (provider: {})...", config.store.provider);
    let store = StoreManager::new(&config.store).await?;
    let store: Arc<dyn TokenStore> = Arc::new(store);

    // ── Step 2: Shared state ─────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let state = AppState::new(config, store);

    // ── Step 3: Shutdown channel ─────────────────────────────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Step 4: Promotion scheduler ──────────────────────────────
    let queue = &state.config.waiting_queue;
    let scheduler_handle = if queue.enabled {
        tracing::info!(
            max_active_users = queue.max_active_users,
            waiting_page_url = %queue.waiting_page_url,
            "Waiting room enabled"
        );
        Some(state.scheduler().spawn(shutdown_rx))
    } else {
        tracing::info!("Waiting room disabled");
        None
    };

    // ── Step 5: Build and start HTTP server ──────────────────────
    let app = build_app(state, service_routes());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Waitroom server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 6: Wait for background tasks ────────────────────────
    if let Some(handle) = scheduler_handle {
        tracing::info!("Waiting for promotion scheduler to stop...");
        if tokio::time::timeout(grace, handle).await.is_err() {
            tracing::warn!("Promotion scheduler did not stop within the grace period");
        }
    }

    tracing::info!("Waitroom server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
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
