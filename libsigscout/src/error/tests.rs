use super::*;
use std::error::Error as StdError;
use std::io;

#[test]
fn test_network_error_creation() {
    let err = ScoutError::network("https://auth.example/token", "connection refused");
    assert!(matches!(err, ScoutError::Network { .. }));
    assert_eq!(
        err.to_string(),
        "Network error accessing https://auth.example/token: connection refused"
    );
}

#[test]
fn test_network_error_with_source() {
    let io_err = io::Error::new(io::ErrorKind::ConnectionRefused, "refused");
    let err = ScoutError::network_with_source("https://r.example/v2/", "failed to connect", io_err);

    assert!(err.source().is_some());
    assert_eq!(err.detailed(), format!("{}: refused", err));
}

#[test]
fn test_authentication_error_display() {
    let err = ScoutError::Authentication {
        url: "https://r.example/v2/a/manifests/1".to_string(),
        status_code: 401,
    };
    assert_eq!(
        err.to_string(),
        "Unauthorized access (status: 401): https://r.example/v2/a/manifests/1"
    );
}

#[test]
fn test_not_found_error_display() {
    let err = ScoutError::NotFound {
        url: "https://r.example/v2/a/tags/list".to_string(),
    };
    assert_eq!(err.to_string(), "Page not found: https://r.example/v2/a/tags/list");
}

#[test]
fn test_status_error_display() {
    let err = ScoutError::Status {
        url: "https://r.example/v2/".to_string(),
        status_code: 503,
        reason: "Service Unavailable".to_string(),
    };
    assert!(err.to_string().contains("503"));
    assert!(err.to_string().contains("Service Unavailable"));
}

#[test]
fn test_decode_error_keeps_source() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err = ScoutError::Decode {
        url: "https://auth.example/token".to_string(),
        source: json_err,
    };
    assert!(err.source().is_some());
    assert!(
        err.to_string()
            .starts_with("Could not decode response from https://auth.example/token")
    );
}

#[test]
fn test_missing_field_display() {
    let err = ScoutError::missing_field("https://auth.example/token", "token");
    assert_eq!(
        err.to_string(),
        "Response from https://auth.example/token is missing required field 'token'"
    );
}

#[test]
fn test_config_error_with_path() {
    let err = ScoutError::config("bad limit", Some("/tmp/config.yaml"));
    match err {
        ScoutError::Config { message, path, .. } => {
            assert_eq!(message, "bad limit");
            assert_eq!(path.as_deref(), Some("/tmp/config.yaml"));
        }
        _ => panic!("expected config error"),
    }
}

#[test]
fn test_config_error_with_source() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "no such file");
    let err = ScoutError::config_with_source("failed to read config", None, io_err);
    assert!(err.source().is_some());
}

#[test]
fn test_token_acquisition_wraps_cause() {
    let inner = ScoutError::missing_field("https://auth.example/token", "token");
    let err = ScoutError::token_acquisition("library/ubuntu", inner);

    assert_eq!(err.to_string(), "Could not acquire token for \"library/ubuntu\"");
    assert!(err.source().is_some());
    match &err {
        ScoutError::TokenAcquisition { source, .. } => {
            assert!(matches!(**source, ScoutError::MissingField { field: "token", .. }));
        }
        other => panic!("expected token acquisition error, got {:?}", other),
    }
    assert!(err.detailed().ends_with("missing required field 'token'"));
}

#[test]
fn test_url_looks_through_wrappers() {
    let inner = ScoutError::NotFound {
        url: "https://r.example/v2/a/tags/list".to_string(),
    };
    let err = ScoutError::tag_listing("a", inner);
    assert_eq!(err.url(), Some("https://r.example/v2/a/tags/list"));
}

#[test]
fn test_url_absent_for_validation() {
    assert!(ScoutError::validation("bad").url().is_none());
}

#[test]
fn test_fatality() {
    let per_tag = ScoutError::Authentication {
        url: "u".to_string(),
        status_code: 401,
    };
    assert!(!per_tag.is_fatal());

    let fatal = ScoutError::token_acquisition("repo", ScoutError::network("u", "down"));
    assert!(fatal.is_fatal());
    assert!(ScoutError::tag_listing("repo", ScoutError::network("u", "down")).is_fatal());
}
