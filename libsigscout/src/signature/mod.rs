//! Signature correlation.
//!
//! An image is signed when the tag list of its repository contains the
//! signature tag derived from the image's content digest.

use crate::manifest::ManifestResult;
use std::collections::HashSet;

#[cfg(test)]
mod tests;

/// Tags of a repository in registry order, with constant-time membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    ordered: Vec<String>,
    index: HashSet<String>,
}

impl TagSet {
    /// Returns the tags in the order the registry listed them.
    pub fn as_slice(&self) -> &[String] {
        &self.ordered
    }

    /// Returns the first `n` tags.
    pub fn first(&self, n: usize) -> &[String] {
        &self.ordered[..n.min(self.ordered.len())]
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.ordered.iter()
    }
}

impl From<Vec<String>> for TagSet {
    fn from(ordered: Vec<String>) -> Self {
        let index = ordered.iter().cloned().collect();
        Self { ordered, index }
    }
}

impl<'a> IntoIterator for &'a TagSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Outcome of correlating one manifest with the tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignatureStatus {
    /// The derived signature tag is present
    Signed { signature_tag: String },
    /// The derived signature tag is absent
    Unsigned { signature_tag: String },
    /// No usable content digest came with the manifest
    Unknown,
}

impl SignatureStatus {
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed { .. })
    }
}

/// Checks whether `result` has a signature tag in `tags`.
///
/// The response headers are stripped from `result` whatever the outcome.
///
/// # Examples
///
/// ```
/// use libsigscout::manifest::ManifestResult;
/// use libsigscout::signature::{SignatureStatus, TagSet, correlate};
///
/// let tags = TagSet::from(vec!["latest".to_string()]);
/// let mut result = ManifestResult::empty("latest");
/// assert_eq!(correlate(&tags, &mut result), SignatureStatus::Unknown);
/// ```
pub fn correlate(tags: &TagSet, result: &mut ManifestResult) -> SignatureStatus {
    result.strip_headers();

    let Some(digest) = &result.digest else {
        return SignatureStatus::Unknown;
    };

    let signature_tag = digest.signature_tag();
    if tags.contains(&signature_tag) {
        SignatureStatus::Signed { signature_tag }
    } else {
        SignatureStatus::Unsigned { signature_tag }
    }
}
