//! Site inventory subsystem.
//!
//! # Data Flow
//! ```text
//! sites-available/ ──▶ scanner.rs (regular files + enabled flag)
//!                          │
//!                          ▼
//!                     extractor.rs (server_name / listen / proxy_pass)
//!                          │
//!                          ▼
//!                     aggregator.rs (SiteRecord, sorted by name)
//! ```
//!
//! # Design Decisions
//! - Everything is re-read from disk on every call
//! - A file that cannot be read is reported inline, never fails the listing
//! - Records are ordered by file name, not directory iteration order

pub mod aggregator;
pub mod extractor;
pub mod scanner;

pub use aggregator::{collect_sites, summarize, SiteRecord, SiteSummary};
pub use extractor::{Directives, PARSE_ERROR_MARKER};
pub use scanner::{scan_sites, ScannedFile};
