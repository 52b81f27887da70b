use libsigscout::client::Endpoints;
use libsigscout::{ContentDigest, Event, Recorder, Scout, ScoutBuilder, ScoutError};
use mockito::Matcher;

#[test]
fn test_scout_builder_new() {
    let scout = ScoutBuilder::new().limit(3).timeout(5).build();
    assert!(scout.is_ok());
}

#[test]
fn test_digest_round_trip_through_public_api() {
    let digest: ContentDigest = "sha256:abc123".parse().unwrap();
    assert_eq!(digest.signature_tag(), "sha256-abc123.sig");
    assert_eq!(
        ContentDigest::from_signature_tag("sha256-abc123.sig"),
        Some(digest)
    );
}

#[test]
fn test_full_scan_against_mock_registry() {
    let mut server = mockito::Server::new();
    let _token = server
        .mock("GET", "/token")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"token": "tkn"}"#)
        .create();
    let _tags = server
        .mock("GET", "/v2/acme/app/tags/list")
        .with_status(200)
        .with_body(r#"{"name": "acme/app", "tags": ["v1", "v2", "sha256-aaa.sig"]}"#)
        .create();
    let _v1 = server
        .mock("GET", "/v2/acme/app/manifests/v1")
        .with_status(200)
        .with_header("docker-content-digest", "sha256:aaa")
        .with_body(r#"{"schemaVersion": 2}"#)
        .create();
    let _v2 = server
        .mock("GET", "/v2/acme/app/manifests/v2")
        .with_status(404)
        .create();

    let scout = Scout::builder()
        .endpoints(Endpoints {
            registry_url: server.url(),
            auth_url: format!("{}/token", server.url()),
            auth_service: "registry.docker.io".to_string(),
        })
        .build()
        .unwrap();

    let recorder = Recorder::new();
    let summary = scout.scan("acme/app", &recorder).unwrap();

    assert_eq!(summary.total_tags, 3);
    assert_eq!(summary.signed, vec!["v1"]);
    assert_eq!(summary.failed, vec!["v2"]);
    assert!(matches!(
        recorder.events().last(),
        Some(Event::RunFinished { .. })
    ));
}

#[test]
fn test_fatal_errors_are_typed() {
    let mut server = mockito::Server::new();
    let _token = server
        .mock("GET", "/token")
        .match_query(Matcher::Any)
        .with_status(500)
        .create();

    let scout = Scout::builder()
        .endpoints(Endpoints {
            registry_url: server.url(),
            auth_url: format!("{}/token", server.url()),
            auth_service: "registry.docker.io".to_string(),
        })
        .build()
        .unwrap();

    let err = scout.scan("acme/app", &Recorder::new()).unwrap_err();
    assert!(matches!(err, ScoutError::TokenAcquisition { .. }));
}
