use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::api::handlers::{dashboard, pages, submission};
use crate::common::Result;
use crate::config::Settings;
use crate::contract::{EthersReader, EthersRegistrar, ProjectRegistrar, RegistryReader};
use crate::explorer::ExplorerLink;

pub const SUBMIT_PROJECT_PATH: &str = "/api/submit-project";

/// Shared, read-only handler state
#[derive(Clone)]
pub struct AppState {
    pub registrar: Arc<dyn ProjectRegistrar>,
    /// `None` when no read provider is available; the dashboard stays empty.
    pub reader: Option<Arc<dyn RegistryReader>>,
    pub explorer: ExplorerLink,
    pub network: String,
}

impl AppState {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            registrar: Arc::new(EthersRegistrar::new(settings.chain.clone())),
            reader: dashboard_reader(settings),
            explorer: settings.chain.explorer(),
            network: settings.server.network.clone(),
        }
    }
}

/// Build the dashboard's read-only client, if one is configured and usable.
pub fn dashboard_reader(settings: &Settings) -> Option<Arc<dyn RegistryReader>> {
    let provider_url = settings.dashboard.provider_url.as_deref()?;
    match EthersReader::connect(provider_url, settings.chain.contract_address.as_deref()) {
        Ok(reader) => Some(Arc::new(reader)),
        Err(e) => {
            log::warn!("Dashboard provider unavailable: {}", e);
            None
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(pages::health_check))
        .route("/upload", get(pages::upload_page))
        .route("/dashboard", get(dashboard::dashboard_page))
        .route("/api/projects", get(dashboard::list_projects))
        .route(SUBMIT_PROJECT_PATH, post(submission::submit_project))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Serve until Ctrl-C.
pub async fn start_api_server(settings: Settings) -> Result<()> {
    let state = AppState::from_settings(&settings);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&settings.server.listen_addr).await?;
    log::info!(
        "AquaCred gateway listening on http://{}",
        listener.local_addr()?
    );
    log::info!("  GET  /upload               - Register a project");
    log::info!("  GET  /dashboard            - Registered projects");
    log::info!("  POST {}   - Submit to the registry contract", SUBMIT_PROJECT_PATH);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    log::info!("AquaCred gateway stopped");
    Ok(())
}
