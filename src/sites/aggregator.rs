//! Site aggregation: scanner output + extractor output → reportable records.

use serde::Serialize;
use std::collections::BTreeSet;
use std::io;
use std::path::Path;

use crate::sites::extractor::{backend_port, extract_file, Directives};
use crate::sites::scanner::{scan_sites, ScannedFile};

/// One site as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteRecord {
    pub name: String,
    pub active: bool,
    #[serde(flatten)]
    pub directives: Directives,
}

impl SiteRecord {
    pub fn new(file: ScannedFile, directives: Directives) -> Self {
        Self {
            name: file.name,
            active: file.active,
            directives,
        }
    }
}

/// Port-only view of a site, derived from its first backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSummary {
    pub name: String,
    pub active: bool,
    pub hostnames: BTreeSet<String>,
    pub ports: BTreeSet<String>,
    /// Port of the first backend, `None` without backends or on parse error.
    pub internal_port: Option<String>,
}

impl From<&SiteRecord> for SiteSummary {
    fn from(record: &SiteRecord) -> Self {
        let internal_port = if record.directives.is_parse_error() {
            None
        } else {
            record
                .directives
                .backends
                .iter()
                .next()
                .map(|target| backend_port(target).to_string())
        };

        Self {
            name: record.name.clone(),
            active: record.active,
            hostnames: record.directives.hostnames.clone(),
            ports: record.directives.ports.clone(),
            internal_port,
        }
    }
}

/// Scan `available`, extract every file and return records sorted by name.
///
/// A file that fails to read becomes a parse-error record; only a failure
/// to list `available` aborts.
pub fn collect_sites(available: &Path, enabled: &Path) -> io::Result<Vec<SiteRecord>> {
    let files = scan_sites(available, enabled)?;

    let mut records: Vec<SiteRecord> = files
        .into_iter()
        .map(|file| {
            let directives = extract_file(&file.path);
            SiteRecord::new(file, directives)
        })
        .collect();

    records.sort_by(|a, b| a.name.cmp(&b.name));

    tracing::debug!(
        sites = records.len(),
        parse_errors = records.iter().filter(|r| r.directives.is_parse_error()).count(),
        "Sites collected"
    );

    Ok(records)
}

/// Derive the port-only view for each record.
pub fn summarize(records: &[SiteRecord]) -> Vec<SiteSummary> {
    records.iter().map(SiteSummary::from).collect()
}
