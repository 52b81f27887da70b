//! sigscout - Registry Tag Signature Scanner Library
//!
//! Lists the tags of a repository on a Docker Registry v2 API, fetches the
//! manifest of every tag and reports which images have a detached signature
//! tag (`sha256-<hex>.sig`) published next to them.
//!
//! # Quick Start
//!
//! ```no_run
//! use libsigscout::Scout;
//! use libsigscout::report::TracingReporter;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scout = Scout::builder().build()?;
//!     let summary = scout.scan("library/ubuntu", &TracingReporter)?;
//!     for tag in &summary.signed {
//!         println!("{} is signed", tag);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Main Types
//!
//! - [`Scout`] - Runs scans against one registry
//! - [`ScoutBuilder`] - Builder for endpoints, timeout and tag summary limit
//! - [`Reporter`] - Receives every step of a scan
//! - [`ScanSummary`] - Counts collected over a scan
//! - [`ContentDigest`] - Manifest digest and its signature tag

#![warn(clippy::all)]

/// Returns the libsigscout crate version.
///
/// # Examples
///
/// ```
/// let version = libsigscout::version();
/// assert!(!version.is_empty());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod scout;
pub use scout::{ManifestOutcome, RepositoryContext, ScanSummary, Scout, ScoutBuilder};

pub use auth::Credentials;
pub use config::Config;
pub use digest::ContentDigest;
pub use error::{Result, ScoutError};
pub use manifest::ManifestResult;
pub use report::{Event, Recorder, Reporter, TracingReporter};
pub use signature::{SignatureStatus, TagSet};

pub mod auth;
pub mod client;
pub mod config;
pub mod digest;
pub mod error;
pub mod manifest;
pub mod report;
pub mod signature;
