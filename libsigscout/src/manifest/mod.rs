//! Manifest fetch results.
//!
//! The manifest body is kept as opaque JSON. The response headers travel with
//! the body only until signature correlation has read them.

use crate::digest::ContentDigest;
use reqwest::header::HeaderMap;
use serde_json::Value;


/// Media type requested from the manifest endpoint.
pub const MANIFEST_V2_MEDIA_TYPE: &str = "application/vnd.docker.distribution.manifest.v2+json";

/// Header carrying the canonical digest of a manifest.
pub const CONTENT_DIGEST_HEADER: &str = "docker-content-digest";

/// The manifest of one tag, as fetched from the registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestResult {
    /// Tag the manifest was requested for
    pub tag: String,
    /// Digest from the `docker-content-digest` header, when present and well formed
    pub digest: Option<ContentDigest>,
    /// Manifest document, `{}` for a failed fetch
    pub body: Value,
    headers: Option<HeaderMap>,
}

impl ManifestResult {
    /// Builds a result from a successful response.
    pub fn new(tag: impl Into<String>, body: Value, headers: HeaderMap) -> Self {
        let digest = headers
            .get(CONTENT_DIGEST_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<ContentDigest>().ok());

        Self {
            tag: tag.into(),
            digest,
            body,
            headers: Some(headers),
        }
    }

    /// The result yielded for a tag whose manifest could not be fetched.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::manifest::ManifestResult;
    ///
    /// let result = ManifestResult::empty("latest");
    /// assert!(result.is_empty());
    /// assert_eq!(result.body.to_string(), "{}");
    /// ```
    pub fn empty(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            digest: None,
            body: Value::Object(Default::default()),
            headers: None,
        }
    }

    /// Whether this is the placeholder for a failed fetch.
    pub fn is_empty(&self) -> bool {
        self.headers.is_none()
            && self.digest.is_none()
            && self.body.as_object().is_some_and(|o| o.is_empty())
    }

    /// Response headers, until they are stripped.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.headers.as_ref()
    }

    /// Drops the response headers.
    pub fn strip_headers(&mut self) {
        self.headers = None;
    }
}
