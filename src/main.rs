//! nginx dashboard API (v1)
//!
//! A read-only HTTP API over nginx's site configuration and log directories,
//! built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────────┐
//!                    │                 NGINX DASHBOARD                   │
//!   Client Request   │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ─────────────────┼─▶│  http   │───▶│   api    │───▶│   sites     │◀─┼── sites-available/
//!                    │  │ server  │    │ handlers │    │ scan+extract│◀─┼── sites-enabled/
//!                    │  └─────────┘    └────┬─────┘    └─────────────┘  │
//!                    │                      │          ┌─────────────┐  │
//!                    │                      ├─────────▶│    logs     │◀─┼── /var/log/nginx
//!                    │                      │          └─────────────┘  │
//!                    │                      │          ┌─────────────┐  │
//!                    │                      └─────────▶│    probe    │──┼──▶ target host
//!                    │                                 └─────────────┘  │
//!                    │  config · observability · lifecycle              │
//!                    └──────────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use nginx_dashboard::config::load_config;
use nginx_dashboard::lifecycle::startup::check_directories;
use nginx_dashboard::observability::{logging, metrics};
use nginx_dashboard::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "nginx-dashboard")]
#[command(about = "Read-only HTTP API over nginx sites and logs", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "NGINX_DASHBOARD_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("nginx-dashboard: {e}");
            std::process::exit(2);
        }
    };

    logging::init_logging(&config.observability);
    tracing::info!("nginx-dashboard v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        probe_timeout_secs = config.probe.timeout_secs,
        "Configuration loaded"
    );

    check_directories(&config.paths);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
