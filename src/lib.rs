//! Read-only nginx dashboard library.

pub mod api;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod logs;
pub mod observability;
pub mod probe;
pub mod sites;

pub use config::schema::DashboardConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
