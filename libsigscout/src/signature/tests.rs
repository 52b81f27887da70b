use super::*;
use crate::manifest::CONTENT_DIGEST_HEADER;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::json;

fn tags(list: &[&str]) -> TagSet {
    TagSet::from(list.iter().map(|t| t.to_string()).collect::<Vec<_>>())
}

fn fetched(tag: &str, digest: Option<&str>) -> ManifestResult {
    let mut headers = HeaderMap::new();
    if let Some(d) = digest {
        headers.insert(CONTENT_DIGEST_HEADER, HeaderValue::from_str(d).unwrap());
    }
    ManifestResult::new(tag, json!({"schemaVersion": 2}), headers)
}

#[test]
fn test_tag_set_preserves_order() {
    let set = tags(&["b", "a", "c"]);
    assert_eq!(set.as_slice(), &["b", "a", "c"]);
    assert_eq!(set.len(), 3);
    assert!(!set.is_empty());
}

#[test]
fn test_tag_set_first() {
    let set = tags(&["one", "two", "three"]);
    assert_eq!(set.first(2), &["one", "two"]);
    assert_eq!(set.first(10).len(), 3);
    assert!(set.first(0).is_empty());
}

#[test]
fn test_tag_set_contains() {
    let set = tags(&["latest", "sha256-abc123.sig"]);
    assert!(set.contains("sha256-abc123.sig"));
    assert!(!set.contains("sha256-abc.sig"));
}

#[test]
fn test_tag_set_iteration() {
    let set = tags(&["x", "y"]);
    let collected: Vec<&String> = (&set).into_iter().collect();
    assert_eq!(collected, vec!["x", "y"]);
}

#[test]
fn test_empty_tag_set() {
    let set = TagSet::default();
    assert!(set.is_empty());
    assert!(set.first(5).is_empty());
}

#[test]
fn test_signed_when_signature_tag_listed() {
    let set = tags(&["latest", "sha256-abc123.sig"]);
    let mut result = fetched("latest", Some("sha256:abc123"));

    let status = correlate(&set, &mut result);

    assert_eq!(
        status,
        SignatureStatus::Signed {
            signature_tag: "sha256-abc123.sig".to_string()
        }
    );
    assert!(status.is_signed());
}

#[test]
fn test_unsigned_when_signature_tag_absent() {
    let set = tags(&["latest", "sha256-other.sig"]);
    let mut result = fetched("latest", Some("sha256:abc123"));

    let status = correlate(&set, &mut result);

    assert_eq!(
        status,
        SignatureStatus::Unsigned {
            signature_tag: "sha256-abc123.sig".to_string()
        }
    );
    assert!(!status.is_signed());
}

#[test]
fn test_unknown_without_digest_header() {
    let set = tags(&["latest", "sha256-abc123.sig"]);
    let mut result = fetched("latest", None);

    assert_eq!(correlate(&set, &mut result), SignatureStatus::Unknown);
}

#[test]
fn test_headers_stripped_for_every_outcome() {
    let set = tags(&["latest", "sha256-abc123.sig"]);

    for digest in [Some("sha256:abc123"), Some("sha256:def456"), None] {
        let mut result = fetched("latest", digest);
        assert!(result.headers().is_some());

        correlate(&set, &mut result);

        assert!(result.headers().is_none());
        assert_eq!(result.body, json!({"schemaVersion": 2}));
    }
}

#[test]
fn test_signature_of_other_image_does_not_count() {
    // "sha256-abc1234.sig" signs a different digest than "sha256:abc123"
    let set = tags(&["latest", "sha256-abc1234.sig"]);
    let mut result = fetched("latest", Some("sha256:abc123"));

    assert!(!correlate(&set, &mut result).is_signed());
}
