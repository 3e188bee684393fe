use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::http::server::AppState;
use crate::logs;
use crate::observability::metrics;
use crate::probe::{normalize_target, ProbeOutcome};
use crate::sites::{collect_sites, summarize, SiteRecord, SiteSummary};

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
}

#[derive(Serialize)]
pub struct SitesResponse<T> {
    pub sites: Vec<T>,
}

#[derive(Serialize)]
pub struct LogsResponse {
    pub logs: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct TailParams {
    pub lines: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PingParams {
    #[serde(default)]
    pub url: String,
}

pub async fn get_status() -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

pub async fn list_sites(
    State(state): State<AppState>,
) -> Result<Json<SitesResponse<SiteRecord>>, ApiError> {
    let sites = load_sites(&state).await?;
    Ok(Json(SitesResponse { sites }))
}

pub async fn list_site_summaries(
    State(state): State<AppState>,
) -> Result<Json<SitesResponse<SiteSummary>>, ApiError> {
    let sites = load_sites(&state).await?;
    Ok(Json(SitesResponse {
        sites: summarize(&sites),
    }))
}

async fn load_sites(state: &AppState) -> Result<Vec<SiteRecord>, ApiError> {
    let paths = state.config.paths.clone();
    let sites = tokio::task::spawn_blocking(move || {
        collect_sites(&paths.sites_available, &paths.sites_enabled)
    })
    .await?
    .map_err(ApiError::sites_directory)?;

    let parse_errors = sites.iter().filter(|s| s.directives.is_parse_error()).count();
    metrics::record_sites_scanned(sites.len(), parse_errors);

    Ok(sites)
}

pub async fn list_logs(State(state): State<AppState>) -> Result<Json<LogsResponse>, ApiError> {
    let dir = state.config.paths.log_dir.clone();
    let logs = tokio::task::spawn_blocking(move || logs::list_logs(&dir)).await??;
    Ok(Json(LogsResponse { logs }))
}

pub async fn read_log(
    State(state): State<AppState>,
    Path(name): Path<String>,
    params: Result<Query<TailParams>, QueryRejection>,
) -> Result<String, ApiError> {
    let Query(params) = params?;
    let lines = params.lines.unwrap_or(state.config.logs.default_lines);
    let dir = state.config.paths.log_dir.clone();

    tracing::debug!(name = %name, lines, "Reading log tail");
    let tail = tokio::task::spawn_blocking(move || logs::read_log_tail(&dir, &name, lines)).await??;
    Ok(tail)
}

/// Probe a target. Network failures answer 502 with the failure details.
pub async fn ping(
    State(state): State<AppState>,
    params: Result<Query<PingParams>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = params?;
    let url = normalize_target(&params.url)?;
    let outcome = state.prober.probe(url).await;

    let status = match &outcome {
        ProbeOutcome::Reached { .. } => {
            metrics::record_probe("reached");
            StatusCode::OK
        }
        ProbeOutcome::Failed { kind, .. } => {
            metrics::record_probe(kind.as_str());
            StatusCode::BAD_GATEWAY
        }
    };

    Ok((status, Json(outcome)).into_response())
}
