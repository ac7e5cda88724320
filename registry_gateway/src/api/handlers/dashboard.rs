use axum::{extract::State, response::Html, Json};

use crate::api::pages::render_dashboard;
use crate::api::server::AppState;
use crate::dashboard::{load_dashboard, DashboardView};

/// `GET /dashboard`
pub async fn dashboard_page(State(state): State<AppState>) -> Html<String> {
    let dashboard = load_dashboard(state.reader.as_deref()).await;
    Html(render_dashboard(&dashboard))
}

/// `GET /api/projects`
pub async fn list_projects(State(state): State<AppState>) -> Json<DashboardView> {
    Json(load_dashboard(state.reader.as_deref()).await.view())
}
