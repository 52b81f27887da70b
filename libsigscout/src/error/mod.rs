//! Error types for sigscout
//!
//! Every failure carries the URL it happened on when one exists. Failures of
//! the token and tag-list stages are wrapped in [`ScoutError::TokenAcquisition`]
//! and [`ScoutError::TagListing`]; those end a run. Manifest failures are
//! reported per tag and never escape the run.

use thiserror::Error;

#[cfg(test)]
mod tests;

/// Main error type for sigscout operations
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Transport failures (connection, timeout, DNS, unreadable body)
    #[error("Network error accessing {url}: {message}")]
    Network {
        url: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// 401 or 403 from the registry or the auth service
    #[error("Unauthorized access (status: {status_code}): {url}")]
    Authentication { url: String, status_code: u16 },

    /// 404
    #[error("Page not found: {url}")]
    NotFound { url: String },

    /// Any other non-200 status
    #[error("Unexpected status {status_code} ({reason}) from {url}")]
    Status {
        url: String,
        status_code: u16,
        reason: String,
    },

    /// Response body is not the JSON we expected
    #[error("Could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required field is absent or null in a decoded response
    #[error("Response from {url} is missing required field '{field}'")]
    MissingField { url: String, field: &'static str },

    /// Malformed input (repository names, digests, URLs)
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration errors (invalid config file, bad values)
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<String>,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The bearer token could not be acquired
    #[error("Could not acquire token for \"{repository}\"")]
    TokenAcquisition {
        repository: String,
        #[source]
        source: Box<ScoutError>,
    },

    /// The tag list could not be fetched
    #[error("Could not get tags for \"{repository}\"")]
    TagListing {
        repository: String,
        #[source]
        source: Box<ScoutError>,
    },
}

/// Result type alias for sigscout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

impl ScoutError {
    /// Creates a new network error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::error::ScoutError;
    ///
    /// let err = ScoutError::network("https://registry.example.com/v2/", "connection refused");
    /// assert!(matches!(err, ScoutError::Network { .. }));
    /// ```
    pub fn network<U: Into<String>, S: Into<String>>(url: U, message: S) -> Self {
        Self::Network {
            url: url.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a new network error with a source error.
    pub fn network_with_source<U, S, E>(url: U, message: S, source: E) -> Self
    where
        U: Into<String>,
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Network {
            url: url.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a new validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::error::ScoutError;
    ///
    /// let err = ScoutError::validation("repository name cannot be empty");
    /// assert!(matches!(err, ScoutError::Validation { .. }));
    /// ```
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates a new missing field error.
    pub fn missing_field<U: Into<String>>(url: U, field: &'static str) -> Self {
        Self::MissingField {
            url: url.into(),
            field,
        }
    }

    /// Creates a new configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::error::ScoutError;
    ///
    /// let err = ScoutError::config("limit must be positive", Some("/etc/sigscout.yaml"));
    /// assert!(matches!(err, ScoutError::Config { .. }));
    /// ```
    pub fn config<S: Into<String>>(message: S, path: Option<S>) -> Self {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: None,
        }
    }

    /// Creates a new configuration error with a source error.
    pub fn config_with_source<S, E>(message: S, path: Option<S>, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Config {
            message: message.into(),
            path: path.map(|p| p.into()),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps a failure of the token stage.
    pub fn token_acquisition<S: Into<String>>(repository: S, source: ScoutError) -> Self {
        Self::TokenAcquisition {
            repository: repository.into(),
            source: Box::new(source),
        }
    }

    /// Wraps a failure of the tag-list stage.
    pub fn tag_listing<S: Into<String>>(repository: S, source: ScoutError) -> Self {
        Self::TagListing {
            repository: repository.into(),
            source: Box::new(source),
        }
    }

    /// Returns the URL the error happened on, looking through stage wrappers.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::error::ScoutError;
    ///
    /// let inner = ScoutError::NotFound { url: "https://r.example/v2/a/tags/list".into() };
    /// let err = ScoutError::tag_listing("a", inner);
    /// assert_eq!(err.url(), Some("https://r.example/v2/a/tags/list"));
    /// ```
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Network { url, .. }
            | Self::Authentication { url, .. }
            | Self::NotFound { url }
            | Self::Status { url, .. }
            | Self::Decode { url, .. }
            | Self::MissingField { url, .. } => Some(url.as_str()),
            Self::TokenAcquisition { source, .. } | Self::TagListing { source, .. } => {
                source.url()
            }
            Self::Validation { .. } | Self::Config { .. } => None,
        }
    }

    /// Whether this error ends a run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::TokenAcquisition { .. }
                | Self::TagListing { .. }
                | Self::Validation { .. }
                | Self::Config { .. }
        )
    }

    /// Full message including the wrapped cause, for single-line logging.
    pub fn detailed(&self) -> String {
        match self {
            Self::TokenAcquisition { source, .. } | Self::TagListing { source, .. } => {
                format!("{}: {}", self, source.detailed())
            }
            Self::Network {
                source: Some(source),
                ..
            } => format!("{}: {}", self, source),
            _ => self.to_string(),
        }
    }
}
