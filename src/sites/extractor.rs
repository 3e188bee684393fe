//! Directive extraction from raw nginx configuration text.
//!
//! # Responsibilities
//! - Find `server_name`, `listen` and `proxy_pass` statements
//! - Normalize their values into sorted, deduplicated sets
//! - Turn read failures into the parse-error marker
//!
//! # Design Decisions
//! - One flat pattern scan per keyword over the whole text; block nesting,
//!   includes and comments are not interpreted
//! - Keywords are matched as whole words
//! - Values are kept case-sensitive and verbatim

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::LazyLock;

/// Marker placed in `ports` when a file could not be read or scanned.
pub const PARSE_ERROR_MARKER: &str = "Error parsing file";

static SERVER_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bserver_name\s+([^;]*);").expect("valid regex"));
static LISTEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\blisten\s+([^;]*);").expect("valid regex"));
static PROXY_PASS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bproxy_pass\s+([^;]*);").expect("valid regex"));
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("valid regex"));
static TRAILING_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\d+)$").expect("valid regex"));
static COLON_PORT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":(\d+)").expect("valid regex"));

/// Routing-relevant values extracted from one configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Directives {
    pub hostnames: BTreeSet<String>,
    pub ports: BTreeSet<String>,
    pub backends: BTreeSet<String>,
}

impl Directives {
    /// Scan configuration text for directives.
    pub fn parse(text: &str) -> Self {
        let mut directives = Self::default();

        for value in clause_values(&SERVER_NAME_RE, text) {
            directives
                .hostnames
                .extend(value.split_whitespace().map(str::to_string));
        }

        for value in clause_values(&LISTEN_RE, text) {
            if let Some(port) = listen_port(value) {
                directives.ports.insert(port.to_string());
            }
        }

        for value in clause_values(&PROXY_PASS_RE, text) {
            let target = value.trim();
            if !target.is_empty() {
                directives.backends.insert(target.to_string());
            }
        }

        directives
    }

    /// The record reported for a file that could not be read or scanned.
    pub fn parse_error() -> Self {
        Self {
            ports: BTreeSet::from([PARSE_ERROR_MARKER.to_string()]),
            ..Self::default()
        }
    }

    /// True when this value came from [`Directives::parse_error`].
    pub fn is_parse_error(&self) -> bool {
        self.ports.contains(PARSE_ERROR_MARKER)
    }
}

/// Read a configuration file and extract its directives.
///
/// Never fails: an unreadable or undecodable file yields
/// [`Directives::parse_error`].
pub fn extract_file(path: &Path) -> Directives {
    match std::fs::read_to_string(path) {
        Ok(text) => Directives::parse(&text),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse site configuration");
            Directives::parse_error()
        }
    }
}

/// Port token of one `listen` value list.
///
/// `host:port` style addresses yield the trailing port; anything else yields
/// the first digit run, if any.
pub fn listen_port(value: &str) -> Option<&str> {
    if let Some(address) = value.split_whitespace().next() {
        if let Some(cap) = TRAILING_PORT_RE.captures(address) {
            return cap.get(1).map(|m| m.as_str());
        }
    }
    DIGITS_RE.find(value).map(|m| m.as_str())
}

/// Port a `proxy_pass` target forwards to: the digits following the first
/// `:` that is directly followed by digits, or `"80"` when there are none.
pub fn backend_port(target: &str) -> &str {
    COLON_PORT_RE
        .captures(target)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
        .unwrap_or("80")
}

fn clause_values<'t>(re: &'static Regex, text: &'t str) -> impl Iterator<Item = &'t str> {
    re.captures_iter(text)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str()))
}
