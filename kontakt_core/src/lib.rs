//! Core library for the contact-form site: pages, form handling and storage.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;
pub mod validation;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, Result};
pub use handlers::create_routes;
pub use models::{ContactForm, FormInput, MessageRecord, MessageStore, SubmitterKey};
pub use services::{ContactService, Submission};
pub use storage::{JsonFileStore, LoadedStore, MessageRepository};

use axum::Router;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tower_http::services::ServeDir;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contact_service: ContactService,
    pub debug: bool,
}

impl AppState {
    pub fn new(repository: Arc<dyn MessageRepository>) -> Self {
        Self {
            app_name: "Kontakt".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_service: ContactService::new(repository),
            debug: false,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        let repository = JsonFileStore::from_config(&config.storage);
        Self::new(Arc::new(repository)).with_debug(config.server.debug)
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: AppConfig) -> Router {
    let mut router = Router::new()
        .merge(create_routes())
        .nest_service("/static", ServeDir::new(&config.storage.static_dir));

    if config.logging.enable_request_logging {
        router = middleware::logging::with_request_logging(router);
    }

    router.with_state(state)
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
