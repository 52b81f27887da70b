//! Bearer token authentication for registry requests.
//!
//! Docker Hub style registries hand out short-lived bearer tokens from a
//! separate auth service. A token is requested for a scope such as
//! `repository:library/ubuntu:pull` and then presented on every registry call.

use crate::error::{Result, ScoutError};
use serde::Deserialize;
use std::fmt;


/// Credentials for registry authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No authentication (anonymous access)
    Anonymous,

    /// Bearer token issued by the auth service
    Bearer {
        /// The bearer token
        token: String,
    },
}

impl Credentials {
    /// Creates Bearer token credentials.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::auth::Credentials;
    ///
    /// let creds = Credentials::bearer("token123");
    /// assert_eq!(creds.to_header_value().as_deref(), Some("Bearer token123"));
    /// ```
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns the Authorization header value for these credentials.
    pub fn to_header_value(&self) -> Option<String> {
        match self {
            Self::Anonymous => None,
            Self::Bearer { token } => Some(format!("Bearer {}", token)),
        }
    }
}

/// Access scope requested from the auth service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenScope {
    repository: String,
}

impl TokenScope {
    /// Pull access to a single repository.
    pub fn pull(repository: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
        }
    }

    /// Returns the repository the scope covers.
    pub fn repository(&self) -> &str {
        &self.repository
    }
}

impl fmt::Display for TokenScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "repository:{}:pull", self.repository)
    }
}

/// Body returned by the auth service.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
}

impl TokenResponse {
    /// Validates the response and turns it into bearer credentials.
    ///
    /// A missing, null or empty `token` is reported as [`ScoutError::MissingField`]
    /// against `url`.
    pub fn into_credentials(self, url: &str) -> Result<Credentials> {
        match self.token {
            Some(token) if !token.is_empty() => Ok(Credentials::bearer(token)),
            _ => Err(ScoutError::missing_field(url, "token")),
        }
    }
}
