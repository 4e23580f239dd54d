//! Deployment reporter against a local HTTP endpoint.

mod common;

use common::{unreachable_url, MockServer};
use repodeploy::{DeploymentPayload, DeploymentReporter, ReportError, ReportOutcome};
use serde_json::json;

fn payload() -> DeploymentPayload {
    DeploymentPayload {
        username: Some("alice".to_string()),
        repo_url: "https://example.com/team/app.git".to_string(),
        branch: "main".to_string(),
        commit_hash: None,
        local_dir: "./test".to_string(),
        exclude_ext: ".ipynb".to_string(),
    }
}

#[tokio::test]
async fn test_success_response() {
    let server = MockServer::start(200, r#"{"status":"ok"}"#).await;
    let reporter = DeploymentReporter::new(&server.url).unwrap();

    let outcome = reporter.report(&payload()).await.unwrap();

    assert!(outcome.is_success());
    assert_eq!(
        outcome.render(),
        "Deployment successful!\n{\n    \"status\": \"ok\"\n}"
    );

    let request = server.captured().await;
    assert_eq!(request.request_line, "POST /deploy HTTP/1.1");
    assert_eq!(
        request.json(),
        json!({
            "username": "alice",
            "repo_url": "https://example.com/team/app.git",
            "branch": "main",
            "commit_hash": null,
            "local_dir": "./test",
            "exclude_ext": ".ipynb",
        })
    );
}

#[tokio::test]
async fn test_error_status_is_reported_as_failure() {
    let server = MockServer::start(500, r#"{"error":"disk full"}"#).await;
    let reporter = DeploymentReporter::new(&server.url).unwrap();

    let outcome = reporter.report(&payload()).await.unwrap();

    assert_eq!(
        outcome,
        ReportOutcome::Completed {
            status: 500,
            body: json!({"error": "disk full"}),
        }
    );
    assert!(outcome.render().starts_with("Deployment failed!\n"));
    server.captured().await;
}

#[tokio::test]
async fn test_connection_refused_is_not_an_error() {
    let reporter = DeploymentReporter::new(&unreachable_url()).unwrap();

    let outcome = reporter.report(&payload()).await.unwrap();

    assert!(!outcome.is_success());
    assert!(matches!(outcome, ReportOutcome::Unreachable { .. }));
    assert!(outcome.render().starts_with("Error: "));
}

#[tokio::test]
async fn test_non_json_body_is_an_error() {
    let server = MockServer::start(200, "<html>deployed</html>").await;
    let reporter = DeploymentReporter::new(&server.url).unwrap();

    let result = reporter.report(&payload()).await;

    match result {
        Err(ReportError::InvalidResponse { status, .. }) => assert_eq!(status, 200),
        other => panic!("expected InvalidResponse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_trailing_slash_in_server_url() {
    let server = MockServer::start(200, "{}").await;
    let reporter = DeploymentReporter::new(&format!("{}/", server.url)).unwrap();

    reporter.report(&payload()).await.unwrap();

    assert_eq!(server.captured().await.request_line, "POST /deploy HTTP/1.1");
}
