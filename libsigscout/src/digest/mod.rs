//! Content digests and the signature tags derived from them.
//!
//! A manifest identified by `sha256:<hex>` has its detached signature pushed
//! under the tag `sha256-<hex>.sig`. This module converts between the two
//! forms and recognizes signature tags in a tag list.

use crate::error::{Result, ScoutError};
use std::fmt;
use std::str::FromStr;


const DIGEST_PREFIX: &str = "sha256:";
const SIGNATURE_PREFIX: &str = "sha256-";
const SIGNATURE_SUFFIX: &str = ".sig";

/// A sha256 content digest as found in the `docker-content-digest` header.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentDigest {
    hex: String,
}

impl ContentDigest {
    /// Returns the hex-encoded hash without the algorithm prefix.
    pub fn hex(&self) -> &str {
        &self.hex
    }

    /// Returns the tag under which the signature for this digest is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use libsigscout::digest::ContentDigest;
    /// use std::str::FromStr;
    ///
    /// let digest = ContentDigest::from_str("sha256:abc123").unwrap();
    /// assert_eq!(digest.signature_tag(), "sha256-abc123.sig");
    /// ```
    pub fn signature_tag(&self) -> String {
        format!("{}{}{}", SIGNATURE_PREFIX, self.hex, SIGNATURE_SUFFIX)
    }

    /// Recovers the digest a signature tag refers to.
    ///
    /// Returns `None` when `tag` is not a signature tag.
    pub fn from_signature_tag(tag: &str) -> Option<Self> {
        let hex = tag
            .strip_prefix(SIGNATURE_PREFIX)?
            .strip_suffix(SIGNATURE_SUFFIX)?;
        is_hex(hex).then(|| Self {
            hex: hex.to_string(),
        })
    }
}

impl FromStr for ContentDigest {
    type Err = ScoutError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix(DIGEST_PREFIX).ok_or_else(|| {
            ScoutError::validation(format!(
                "Invalid digest format: '{}' (expected sha256:<hex>)",
                s
            ))
        })?;

        if !is_hex(hex) {
            return Err(ScoutError::validation(format!(
                "Invalid digest format: '{}' is not a hex string",
                hex
            )));
        }

        Ok(Self {
            hex: hex.to_string(),
        })
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", DIGEST_PREFIX, self.hex)
    }
}

/// Checks whether a tag names a signature artifact (`sha256-*.sig`).
///
/// Only the prefix and suffix are checked, so a tag such as
/// `sha256-xyz.sig` is a signature tag even though it maps to no digest.
///
/// # Examples
///
/// ```
/// use libsigscout::digest::is_signature_tag;
///
/// assert!(is_signature_tag("sha256-abc123.sig"));
/// assert!(is_signature_tag("sha256-xyz.sig"));
/// assert!(!is_signature_tag("latest"));
/// ```
pub fn is_signature_tag(tag: &str) -> bool {
    tag.starts_with(SIGNATURE_PREFIX) && tag.ends_with(SIGNATURE_SUFFIX)
}

fn is_hex(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit())
}
