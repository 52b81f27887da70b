//! Run observation.
//!
//! A scan never logs on its own. It hands every noteworthy step to a
//! [`Reporter`] supplied by the caller. [`TracingReporter`] turns the steps
//! into `tracing` events; [`Recorder`] keeps them in memory.

use crate::scout::ScanSummary;
use serde_json::Value;
use std::cell::RefCell;
use tracing::{debug, error, info};


/// A step of a scan.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted {
        repository: String,
    },
    TokenAcquired {
        repository: String,
    },
    TagsListed {
        repository: String,
        total: usize,
        limit: usize,
        first: Vec<String>,
    },
    SignatureTagSkipped {
        repository: String,
        tag: String,
    },
    ManifestFailed {
        repository: String,
        tag: String,
        url: Option<String>,
        message: String,
    },
    Signed {
        repository: String,
        tag: String,
        signature_tag: String,
    },
    Manifest {
        repository: String,
        tag: String,
        body: Value,
    },
    RunFinished {
        summary: ScanSummary,
    },
    RunAborted {
        repository: String,
        url: Option<String>,
        message: String,
    },
}

/// Receives the steps of a scan.
pub trait Reporter {
    fn report(&self, event: &Event);
}

/// Writes events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &Event) {
        match event {
            Event::RunStarted { repository } => {
                info!("Repository info fetcher - \"{}\"", repository);
            }
            Event::TokenAcquired { repository } => {
                info!("Token acquired successfully for \"{}\"", repository);
            }
            Event::TagsListed {
                repository,
                total,
                limit,
                first,
            } => {
                info!(total, "Found total of: {} tags in \"{}\"", total, repository);
                info!("First {} tags in \"{}\": {:?}", limit, repository, first);
            }
            Event::SignatureTagSkipped { repository, tag } => {
                debug!("Skipping signature tag \"{}:{}\"", repository, tag);
            }
            Event::ManifestFailed {
                repository,
                tag,
                url,
                message,
            } => {
                error!(
                    url = url.as_deref().unwrap_or("-"),
                    "Could not fetch manifest for \"{}:{}\": {}", repository, tag, message
                );
            }
            Event::Signed {
                repository,
                tag,
                signature_tag,
            } => {
                info!(
                    signature_tag = signature_tag.as_str(),
                    "Signed! - \"{}:{}\" has a cosign signature", repository, tag
                );
            }
            Event::Manifest {
                repository,
                tag,
                body,
            } => {
                let rendered =
                    serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
                info!("Manifest for \"{}:{}\":\n{}", repository, tag, rendered);
            }
            Event::RunFinished { summary } => {
                info!(
                    total = summary.total_tags,
                    skipped = summary.signature_tags,
                    processed = summary.processed,
                    signed = summary.signed.len(),
                    failed = summary.failed.len(),
                    "Finished \"{}\"",
                    summary.repository
                );
            }
            Event::RunAborted {
                repository,
                url,
                message,
            } => {
                error!(
                    url = url.as_deref().unwrap_or("-"),
                    "{} ({}). Quitting...", message, repository
                );
            }
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default)]
pub struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every event reported so far.
    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Returns the events matching `predicate`.
    pub fn filter<F>(&self, predicate: F) -> Vec<Event>
    where
        F: Fn(&Event) -> bool,
    {
        self.events
            .borrow()
            .iter()
            .filter(|e| predicate(e))
            .cloned()
            .collect()
    }
}

impl Reporter for Recorder {
    fn report(&self, event: &Event) {
        self.events.borrow_mut().push(event.clone());
    }
}
