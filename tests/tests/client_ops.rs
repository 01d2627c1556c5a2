//! Happy-path coverage for each client operation.
//!
//! Each operation must issue exactly one HTTP request to its documented
//! path/method and resolve with the parsed envelope payload.

use integration_tests::fixtures;
use integration_tests::setup::TestBackend;

use tubenote_core::protocol::{CollectRequest, RegisterModifications};
use tubenote_core::session::SessionStatus;

#[tokio::test]
async fn test_health_probe() {
    let backend = TestBackend::spawn().await;
    let client = backend.client();

    client.health().await.expect("health check failed");

    assert_eq!(backend.backend.requests(), vec!["GET /api/v1/health"]);
}

#[tokio::test]
async fn test_collect_returns_session_and_video() {
    let backend = TestBackend::spawn().await;
    let client = backend.client();

    let request = CollectRequest::new("https://example.com/watch?v=abc".parse().unwrap());
    let outcome = client.collect(&request).await.expect("collect failed");

    assert_eq!(outcome.video.video_id, "abc");
    assert_eq!(outcome.video.title, "How to test things");
    assert_eq!(outcome.video.channel_name, "Testing Channel");
    assert!(!outcome.session_id.is_empty());

    // Exactly one request, to the documented path.
    assert_eq!(backend.backend.requests(), vec!["POST /api/v1/collect"]);

    // The backend allocated the session the outcome references.
    let session = backend.backend.session(&outcome.session_id).unwrap();
    assert_eq!(session.status, SessionStatus::Collected);
}

#[tokio::test]
async fn test_analyze_returns_result() {
    let backend = TestBackend::spawn().await;
    let client = backend.client();

    let request = CollectRequest::new("https://example.com/watch?v=abc".parse().unwrap());
    let outcome = client.collect(&request).await.unwrap();

    let analysis = client
        .analyze(&outcome.session_id)
        .await
        .expect("analyze failed");

    assert_eq!(analysis, fixtures::analysis_result());
    assert_eq!(
        backend.backend.requests(),
        vec!["POST /api/v1/collect", "POST /api/v1/analyze"]
    );

    let session = backend.backend.session(&outcome.session_id).unwrap();
    assert_eq!(session.status, SessionStatus::Analyzed);
}

#[tokio::test]
async fn test_register_returns_note_url() {
    let backend = TestBackend::spawn().await;
    let client = backend.client();

    let request = CollectRequest::new("https://example.com/watch?v=abc".parse().unwrap());
    let outcome = client.collect(&request).await.unwrap();
    let analysis = client.analyze(&outcome.session_id).await.unwrap();

    let modifications = RegisterModifications::from_analysis(&analysis);
    let notion_url = client
        .register(&outcome.session_id, &modifications)
        .await
        .expect("register failed");

    assert_eq!(
        notion_url.as_str(),
        format!("https://notion.so/{}", outcome.session_id)
    );

    let session = backend.backend.session(&outcome.session_id).unwrap();
    assert_eq!(session.status, SessionStatus::Registered);
}

#[tokio::test]
async fn test_get_session_reflects_lifecycle() {
    let backend = TestBackend::spawn().await;
    let client = backend.client();

    let request = CollectRequest::new("https://example.com/watch?v=xyz".parse().unwrap());
    let outcome = client.collect(&request).await.unwrap();

    let session = client.session(&outcome.session_id).await.unwrap();
    assert_eq!(session.session_id, outcome.session_id);
    assert_eq!(session.status, SessionStatus::Collected);
    assert_eq!(session.video_data.video_id, "xyz");
    assert!(session.analysis_result.is_none());

    client.analyze(&outcome.session_id).await.unwrap();

    let session = client.session(&outcome.session_id).await.unwrap();
    assert_eq!(session.status, SessionStatus::Analyzed);
    assert_eq!(session.analysis_result, Some(fixtures::analysis_result()));
}

#[tokio::test]
async fn test_collect_with_channel_id() {
    let backend = TestBackend::spawn().await;
    let client = backend.client();

    let request = CollectRequest::new("https://example.com/watch?v=abc".parse().unwrap())
        .with_channel_id("ch-9");
    let outcome = client.collect(&request).await.expect("collect failed");

    assert_eq!(outcome.video.video_id, "abc");
}
