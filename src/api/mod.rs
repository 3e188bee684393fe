//! Read-only JSON API and dashboard page.

pub mod dashboard;
pub mod error;
pub mod handlers;

use axum::{routing::get, Router};

use self::handlers::*;
use crate::http::server::AppState;

pub use error::ApiError;

pub fn setup_api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/api/status", get(get_status))
        .route("/api/sites", get(list_sites))
        .route("/api/sites/summary", get(list_site_summaries))
        .route("/api/logs", get(list_logs))
        .route("/api/logs/{name}", get(read_log))
        .route("/api/ping", get(ping))
        .route("/sites", get(list_sites))
        .route("/logs", get(list_logs))
        .route("/logs/{name}", get(read_log))
        .with_state(state)
}
