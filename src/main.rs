//! WardLink Server — guardian/dependent link workflow with real-time
//! notification delivery.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use wardlink_auth::TokenDecoder;
use wardlink_core::config::AppConfig;
use wardlink_core::error::AppError;
use wardlink_database::repositories::account::AccountRepository;
use wardlink_database::repositories::link_request::LinkRequestRepository;
use wardlink_database::repositories::notification::NotificationRepository;
use wardlink_database::store::{AccountStore, LinkRequestStore, NotificationStore};
use wardlink_realtime::{Dispatcher, PresenceRegistry};
use wardlink_service::link::{LinkRequestLedger, LinkService};
use wardlink_service::notification::NotificationService;

#[tokio::main]
async fn main() {
    let env = std::env::var("WARDLINK_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
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
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting WardLink v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Database connection + migrations ─────────────────
    tracing::info!("Connecting to database...");
    let db_pool = wardlink_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    wardlink_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // ── Step 2: Stores ───────────────────────────────────────────
    let accounts: Arc<dyn AccountStore> = Arc::new(AccountRepository::new(db_pool.clone()));
    let requests: Arc<dyn LinkRequestStore> =
        Arc::new(LinkRequestRepository::new(db_pool.clone()));
    let notifications: Arc<dyn NotificationStore> =
        Arc::new(NotificationRepository::new(db_pool.clone()));

    // ── Step 3: Auth ─────────────────────────────────────────────
    let token_decoder = Arc::new(TokenDecoder::new(&config.auth));

    // ── Step 4: Realtime ─────────────────────────────────────────
    let registry = Arc::new(PresenceRegistry::new());
    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&registry)));

    // ── Step 5: Services ─────────────────────────────────────────
    let notification_service = Arc::new(NotificationService::new(Arc::clone(&notifications)));
    let ledger = LinkRequestLedger::new(Arc::clone(&accounts), Arc::clone(&requests));
    let link_service = Arc::new(LinkService::new(
        Arc::clone(&accounts),
        ledger,
        Arc::clone(&notification_service),
        Arc::clone(&dispatcher),
    ));

    // ── Step 6: Build and start HTTP server ──────────────────────
    let app_state = wardlink_api::AppState {
        config: Arc::new(config.clone()),
        token_decoder,
        registry,
        link_service,
        notification_service,
    };

    let app = wardlink_api::build_router(app_state);

    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("WardLink server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("WardLink server shut down gracefully");
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
