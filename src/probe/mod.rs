//! Reachability probing.
//!
//! # Responsibilities
//! - Normalize user-supplied targets into absolute http(s) URLs
//! - Issue a single GET bounded by a hard timeout
//! - Classify network failures instead of propagating them
//!
//! # Design Decisions
//! - Scheme-less targets always get `http://` prepended
//! - No retries; one request per call
//! - The client is built once and shared; it holds no per-request state

use regex::Regex;
use reqwest::{redirect::Policy, Client};
use serde::Serialize;
use std::sync::LazyLock;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

use crate::config::ProbeConfig;

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("valid regex"));

/// Error type for probe input and client construction.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Missing url")]
    MissingUrl,

    #[error("Invalid url: {0}")]
    InvalidUrl(String),

    #[error("Unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Why a probe failed to produce a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Timeout,
    Connect,
    Redirect,
    Request,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connect",
            FailureKind::Redirect => "redirect",
            FailureKind::Request => "request",
        }
    }

    fn classify(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            FailureKind::Timeout
        } else if err.is_connect() {
            FailureKind::Connect
        } else if err.is_redirect() {
            FailureKind::Redirect
        } else {
            FailureKind::Request
        }
    }
}

/// Result of one probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProbeOutcome {
    Reached {
        url: String,
        status_code: u16,
    },
    Failed {
        url: String,
        error: String,
        kind: FailureKind,
    },
}

/// Turn user input into an absolute http(s) URL.
pub fn normalize_target(input: &str) -> Result<Url, ProbeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ProbeError::MissingUrl);
    }

    let candidate = if SCHEME_RE.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    let url = Url::parse(&candidate).map_err(|e| ProbeError::InvalidUrl(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(ProbeError::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ProbeError::InvalidUrl("missing host".to_string()));
    }

    Ok(url)
}

/// HTTP prober with a fixed timeout.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    timeout: Duration,
}

impl Prober {
    pub fn new(config: &ProbeConfig) -> Result<Self, ProbeError> {
        let timeout = Duration::from_secs(config.timeout_secs);
        let redirect = if config.follow_redirects {
            Policy::limited(config.max_redirects)
        } else {
            Policy::none()
        };

        let mut builder = Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .redirect(redirect)
            .user_agent(config.user_agent.clone());
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self { client, timeout })
    }

    /// Probe a normalized URL. Network failures become [`ProbeOutcome::Failed`].
    pub async fn probe(&self, url: Url) -> ProbeOutcome {
        let started = Instant::now();
        let target = url.to_string();

        let result = tokio::time::timeout(self.timeout, self.client.get(url).send()).await;

        match result {
            Ok(Ok(response)) => {
                let status = response.status();
                tracing::debug!(
                    url = %target,
                    status = %status,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Probe completed"
                );
                ProbeOutcome::Reached {
                    url: target,
                    status_code: status.as_u16(),
                }
            }
            Ok(Err(e)) => {
                let kind = FailureKind::classify(&e);
                tracing::warn!(url = %target, kind = kind.as_str(), error = %e, "Probe failed");
                ProbeOutcome::Failed {
                    url: target,
                    error: e.to_string(),
                    kind,
                }
            }
            Err(_) => {
                tracing::warn!(url = %target, timeout = ?self.timeout, "Probe timed out");
                ProbeOutcome::Failed {
                    url: target,
                    error: format!("no response within {:?}", self.timeout),
                    kind: FailureKind::Timeout,
                }
            }
        }
    }
}
