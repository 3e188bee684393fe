//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, metrics)
//! - Bind server to listener and drain on shutdown

use axum::{body::Body, http::Request, middleware, Router};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::api::setup_api_router;
use crate::config::DashboardConfig;
use crate::http::middleware::metrics::track_metrics;
use crate::http::request::{request_id, MakeRequestUuidV4};
use crate::probe::{ProbeError, Prober};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<DashboardConfig>,
    pub prober: Prober,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Result<Self, ProbeError> {
        let prober = Prober::new(&config.probe)?;
        Ok(Self {
            config: Arc::new(config),
            prober,
        })
    }
}

/// HTTP server for the dashboard API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: DashboardConfig) -> Result<Self, ProbeError> {
        let state = AppState::new(config)?;
        let router = Self::build_router(state.clone());
        Ok(Self { router, state })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(state: AppState) -> Router {
        let request_timeout = Duration::from_secs(state.config.timeouts.request_secs);

        setup_api_router(state)
            .route_layer(middleware::from_fn(track_metrics))
            .layer(TimeoutLayer::new(request_timeout))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id(request),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        let paths = &self.state.config.paths;
        tracing::info!(
            address = %addr,
            sites_available = %paths.sites_available.display(),
            sites_enabled = %paths.sites_enabled.display(),
            log_dir = %paths.log_dir.display(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
