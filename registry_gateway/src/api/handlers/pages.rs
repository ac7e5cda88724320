use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};

use crate::api::pages::{render_index, render_upload_page};
use crate::api::server::{AppState, SUBMIT_PROJECT_PATH};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub network: String,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        network: state.network,
    })
}

pub async fn index() -> Html<String> {
    Html(render_index())
}

/// `GET /upload`
pub async fn upload_page(State(state): State<AppState>) -> Html<String> {
    Html(render_upload_page(&state.explorer, SUBMIT_PROJECT_PATH))
}
