//! HTTP server wiring: shared state, router, and lifecycle.

pub mod handlers;

use crate::auth::AdminAuth;
use crate::config::Config;
use crate::ledger::ContactLedger;
use crate::storage::JsonFileStore;
use axum::http::{header::CONTENT_TYPE, Method};
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::{self, ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use handlers::{
    add_contact_handler, admin_login_handler, all_contacts_handler, download_vcf_handler,
    export_json_handler, global_count_handler, health_handler, test_handler,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<ContactLedger>,
    pub auth: Arc<AdminAuth>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire up the ledger, auth gate, and config into one state value.
    pub async fn new(config: Config) -> Self {
        let store = Arc::new(JsonFileStore::new(&config.contacts_file));
        let ledger = Arc::new(ContactLedger::open(store, config.target).await);

        Self {
            auth: Arc::new(AdminAuth::new(config.admin_password.clone())),
            config: Arc::new(config),
            ledger,
        }
    }
}

/// Build the API router.
///
/// The legacy paths (`/api/global-count`, `/api/add-contact`) and their
/// shorter aliases route to the same handlers.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/api/global-count", get(global_count_handler))
        .route("/api/count", get(global_count_handler))
        .route("/api/add-contact", post(add_contact_handler))
        .route("/api/contacts", post(add_contact_handler))
        .route("/api/all-contacts", get(all_contacts_handler))
        .route("/api/download-vcf", get(download_vcf_handler))
        .route("/api/export/json", get(export_json_handler))
        .route("/api/admin/login", post(admin_login_handler))
        .route("/api/test", get(test_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until Ctrl+C or SIGTERM.
pub async fn run_server(state: AppState) -> anyhow::Result<()> {
    let address = format!("0.0.0.0:{}", state.config.port);
    let app = router(state);

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server shutting down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
