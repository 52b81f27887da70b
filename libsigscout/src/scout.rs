//! High-level scan API.
//!
//! A scan runs strictly in sequence: one token request, one tag list request,
//! then one manifest request per tag that is not itself a signature tag.
//! Failing to get the token or the tag list ends the scan with an error.
//! A failing manifest is reported and the scan moves on to the next tag.
//!
//! # Examples
//!
//! ```no_run
//! use libsigscout::Scout;
//! use libsigscout::report::TracingReporter;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scout = Scout::builder().limit(5).build()?;
//!     let summary = scout.scan("library/ubuntu", &TracingReporter)?;
//!     println!("{} signed tags", summary.signed.len());
//!     Ok(())
//! }
//! ```

use crate::auth::{Credentials, TokenScope};
use crate::client::{Client, ClientConfig, Endpoints};
use crate::config::Config;
use crate::digest::is_signature_tag;
use crate::error::{Result, ScoutError};
use crate::manifest::ManifestResult;
use crate::report::{Event, Reporter};
use crate::signature::{SignatureStatus, TagSet, correlate};

/// State of one scan.
///
/// Created once per run. The credentials and the tag list are filled in by
/// the token and tag stages and only read afterwards.
#[derive(Debug, Clone)]
pub struct RepositoryContext {
    repository: String,
    credentials: Credentials,
    tags: TagSet,
    limit: usize,
}

impl RepositoryContext {
    /// Creates the context for `repository`, validating the name.
    pub fn new(repository: &str, limit: usize) -> Result<Self> {
        validate_repository(repository)?;
        Ok(Self {
            repository: repository.to_string(),
            credentials: Credentials::Anonymous,
            tags: TagSet::default(),
            limit,
        })
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn tags(&self) -> &TagSet {
        &self.tags
    }

    /// Number of tags shown in the tag summary.
    pub fn limit(&self) -> usize {
        self.limit
    }
}

/// Counts and names collected over a scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub repository: String,
    /// Tags listed by the registry
    pub total_tags: usize,
    /// Signature tags skipped without a request
    pub signature_tags: usize,
    /// Tags whose manifest was requested
    pub processed: usize,
    /// Tags with a signature tag in the repository
    pub signed: Vec<String>,
    /// Tags whose manifest could not be fetched
    pub failed: Vec<String>,
}

/// What happened to one tag in the manifest loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestOutcome {
    /// Signature tag, no request issued
    Skipped,
    /// Manifest fetched; headers still attached
    Fetched(ManifestResult),
    /// Fetch failed; the placeholder result is empty
    Failed(ManifestResult),
}

/// Runs scans against one registry.
#[derive(Debug, Clone)]
pub struct Scout {
    client: Client,
    limit: usize,
}

impl Scout {
    /// Creates a scout from a client and a tag summary limit.
    pub fn new(client: Client, limit: usize) -> Self {
        Self { client, limit }
    }

    /// Creates a builder for custom endpoints, timeout and limit.
    pub fn builder() -> ScoutBuilder {
        ScoutBuilder::new()
    }

    /// Creates a scout from a loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::builder()
            .endpoints(Endpoints::from(config))
            .timeout(config.network.timeout)
            .limit(config.output.limit)
            .build()
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Scans `repository`, reporting each step to `reporter`.
    ///
    /// # Errors
    ///
    /// Returns [`ScoutError::Validation`] for a malformed repository name,
    /// [`ScoutError::TokenAcquisition`] when no token could be obtained and
    /// [`ScoutError::TagListing`] when the tag list could not be fetched. In
    /// those cases no manifest is requested. Manifest failures are not errors.
    pub fn scan(&self, repository: &str, reporter: &dyn Reporter) -> Result<ScanSummary> {
        reporter.report(&Event::RunStarted {
            repository: repository.to_string(),
        });

        let result = self.prepare(repository, reporter);
        let ctx = match result {
            Ok(ctx) => ctx,
            Err(e) => {
                reporter.report(&Event::RunAborted {
                    repository: repository.to_string(),
                    url: e.url().map(str::to_string),
                    message: e.detailed(),
                });
                return Err(e);
            }
        };

        let summary = self.fetch_manifests(&ctx, reporter);
        reporter.report(&Event::RunFinished {
            summary: summary.clone(),
        });
        Ok(summary)
    }

    /// Builds the context: validates the name, acquires the token, lists tags.
    fn prepare(&self, repository: &str, reporter: &dyn Reporter) -> Result<RepositoryContext> {
        let mut ctx = RepositoryContext::new(repository, self.limit)?;
        ctx.credentials = self.acquire_token(ctx.repository(), reporter)?;
        ctx.tags = self.list_tags(&ctx, reporter)?;
        Ok(ctx)
    }

    /// Exchanges the repository name for a pull-scoped bearer token.
    pub fn acquire_token(&self, repository: &str, reporter: &dyn Reporter) -> Result<Credentials> {
        let credentials = self
            .client
            .fetch_token(&TokenScope::pull(repository))
            .map_err(|e| ScoutError::token_acquisition(repository, e))?;

        reporter.report(&Event::TokenAcquired {
            repository: repository.to_string(),
        });
        Ok(credentials)
    }

    /// Fetches the tag list and reports the count and the first `limit` tags.
    pub fn list_tags(&self, ctx: &RepositoryContext, reporter: &dyn Reporter) -> Result<TagSet> {
        let tags: TagSet = self
            .client
            .fetch_tags(ctx.repository(), ctx.credentials())
            .map_err(|e| ScoutError::tag_listing(ctx.repository(), e))?
            .into();

        reporter.report(&Event::TagsListed {
            repository: ctx.repository().to_string(),
            total: tags.len(),
            limit: ctx.limit(),
            first: tags.first(ctx.limit()).to_vec(),
        });
        Ok(tags)
    }

    /// Fetches the manifest of one tag.
    ///
    /// Signature tags are skipped without a request. A failure is reported
    /// and turned into an empty result.
    pub fn fetch_manifest(
        &self,
        ctx: &RepositoryContext,
        tag: &str,
        reporter: &dyn Reporter,
    ) -> ManifestOutcome {
        if is_signature_tag(tag) {
            reporter.report(&Event::SignatureTagSkipped {
                repository: ctx.repository().to_string(),
                tag: tag.to_string(),
            });
            return ManifestOutcome::Skipped;
        }

        match self
            .client
            .fetch_manifest(ctx.repository(), tag, ctx.credentials())
        {
            Ok(result) => ManifestOutcome::Fetched(result),
            Err(e) => {
                reporter.report(&Event::ManifestFailed {
                    repository: ctx.repository().to_string(),
                    tag: tag.to_string(),
                    url: e.url().map(str::to_string),
                    message: e.detailed(),
                });
                ManifestOutcome::Failed(ManifestResult::empty(tag))
            }
        }
    }

    /// Reports whether the image behind `result` is signed.
    ///
    /// The response headers are stripped from `result` whatever the outcome.
    pub fn check_signed(
        &self,
        ctx: &RepositoryContext,
        result: &mut ManifestResult,
        reporter: &dyn Reporter,
    ) -> bool {
        match correlate(ctx.tags(), result) {
            SignatureStatus::Signed { signature_tag } => {
                reporter.report(&Event::Signed {
                    repository: ctx.repository().to_string(),
                    tag: result.tag.clone(),
                    signature_tag,
                });
                true
            }
            SignatureStatus::Unsigned { .. } | SignatureStatus::Unknown => false,
        }
    }

    /// Walks the tag list in registry order.
    fn fetch_manifests(&self, ctx: &RepositoryContext, reporter: &dyn Reporter) -> ScanSummary {
        let mut summary = ScanSummary {
            repository: ctx.repository().to_string(),
            total_tags: ctx.tags().len(),
            ..Default::default()
        };

        for tag in ctx.tags() {
            let result = match self.fetch_manifest(ctx, tag, reporter) {
                ManifestOutcome::Skipped => {
                    summary.signature_tags += 1;
                    continue;
                }
                ManifestOutcome::Fetched(mut result) => {
                    summary.processed += 1;
                    if self.check_signed(ctx, &mut result, reporter) {
                        summary.signed.push(tag.clone());
                    }
                    result
                }
                ManifestOutcome::Failed(result) => {
                    summary.processed += 1;
                    summary.failed.push(tag.clone());
                    result
                }
            };

            reporter.report(&Event::Manifest {
                repository: ctx.repository().to_string(),
                tag: result.tag,
                body: result.body,
            });
        }

        summary
    }
}

/// Builder for [`Scout`].
#[derive(Debug, Clone)]
pub struct ScoutBuilder {
    endpoints: Endpoints,
    timeout: u64,
    limit: usize,
}

impl Default for ScoutBuilder {
    fn default() -> Self {
        let config = Config::default();
        Self {
            endpoints: Endpoints::from(&config),
            timeout: config.network.timeout,
            limit: config.output.limit,
        }
    }
}

impl ScoutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Request timeout in seconds.
    pub fn timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Number of tags shown in the tag summary.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(self) -> Result<Scout> {
        let client = Client::with_config(
            self.endpoints,
            ClientConfig::new().with_timeout(self.timeout),
        )?;
        Ok(Scout::new(client, self.limit))
    }
}

/// Checks a repository name before it is put into URLs.
///
/// # Examples
///
/// ```
/// use libsigscout::scout::validate_repository;
///
/// assert!(validate_repository("library/ubuntu").is_ok());
/// assert!(validate_repository("").is_err());
/// assert!(validate_repository("/ubuntu").is_err());
/// ```
pub fn validate_repository(repository: &str) -> Result<()> {
    if repository.is_empty() {
        return Err(ScoutError::validation("Repository name cannot be empty"));
    }
    if repository.chars().any(char::is_whitespace) {
        return Err(ScoutError::validation(format!(
            "Repository name '{}' cannot contain whitespace",
            repository
        )));
    }
    if repository.starts_with('/') || repository.ends_with('/') {
        return Err(ScoutError::validation(format!(
            "Repository name '{}' cannot start or end with '/'",
            repository
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "scout_tests.rs"]
mod tests;
