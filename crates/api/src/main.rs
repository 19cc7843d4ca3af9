use std::net::SocketAddr;
use std::time::Duration;

use heritage_core::cache::ContentCache;
use heritage_db::storage::{ContentStore, StorageBackend};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use heritage_api::config::ServerConfig;
use heritage_api::router::build_app_router;
use heritage_api::state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "heritage_api=debug,heritage_db=debug,heritage_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(error = %err, "Invalid configuration");
            std::process::exit(1);
        }
    };
    tracing::info!(
        host = %config.host,
        port = %config.port,
        use_database = config.use_database,
        use_cache = config.use_cache,
        "Loaded server configuration"
    );

    // --- Storage ---
    let database_url = config
        .use_database
        .then_some(config.database_url.as_str());
    let store = ContentStore::connect(database_url, &config.data_dir).await;
    tracing::info!(
        mode = %store.kind(),
        degraded = store.is_degraded(),
        "Storage backend selected"
    );

    // --- Cache ---
    let cache = if config.use_cache {
        ContentCache::new(Duration::from_secs(config.cache_ttl_secs))
    } else {
        ContentCache::disabled()
    };

    // --- Router ---
    let state = AppState::new(store, cache, config.clone());
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
