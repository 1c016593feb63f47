use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use askpdf::service::http::HttpDocumentService;
use askpdf::service::{DocumentService, SelectedFile, ServiceError};
use askpdf::workflow::Controller;

fn pdf(name: &str) -> SelectedFile {
    SelectedFile::new(name, b"%PDF-1.4 test body".to_vec())
}

// ── Store endpoint ────────────────────────────────────────────────

#[tokio::test]
async fn store_posts_multipart_file_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .and(body_string_contains("name=\"file\""))
        .and(body_string_contains("filename=\"a.pdf\""))
        .and(body_string_contains("%PDF-1.4 test body"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"filename": "a.pdf"})))
        .expect(1)
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    let file_ref = svc.store(&pdf("a.pdf")).await.unwrap();
    assert_eq!(file_ref, "a.pdf");
}

#[tokio::test]
async fn store_accepts_trailing_slash_base() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"filename": "doc123.pdf"})))
        .expect(1)
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&format!("{}/", server.uri()), None).unwrap();
    assert_eq!(svc.store(&pdf("doc.pdf")).await.unwrap(), "doc123.pdf");
}

#[tokio::test]
async fn store_server_error_keeps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("pdf parse failed"))
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    match svc.store(&pdf("a.pdf")).await.unwrap_err() {
        ServiceError::Status { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "pdf parse failed");
        }
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn store_rejects_missing_filename() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    let err = svc.store(&pdf("a.pdf")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Malformed(_)));
}

#[tokio::test]
async fn store_rejects_empty_filename() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"filename": ""})))
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    let err = svc.store(&pdf("a.pdf")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Malformed(_)));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // nothing listens on port 1
    let svc = HttpDocumentService::new("http://127.0.0.1:1", None).unwrap();
    let err = svc.store(&pdf("a.pdf")).await.unwrap_err();
    assert!(matches!(err, ServiceError::Transport(_)));
}

#[tokio::test]
async fn timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"answer": "late"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), Some(Duration::from_millis(200))).unwrap();
    match svc.query("a.pdf", "q").await.unwrap_err() {
        ServiceError::Transport(e) => assert!(e.is_timeout()),
        other => panic!("expected Transport, got {other:?}"),
    }
}

// ── Query endpoint ────────────────────────────────────────────────

#[tokio::test]
async fn query_posts_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .and(body_json(json!({"file_name": "a.pdf", "question": "What is the total?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    let answer = svc.query("a.pdf", "What is the total?").await.unwrap();
    assert_eq!(answer, "42");
}

#[tokio::test]
async fn query_not_found_is_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Document not found"})),
        )
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    let err = svc.query("missing.pdf", "q").await.unwrap_err();
    assert!(matches!(err, ServiceError::Status { status: 404, .. }));
}

#[tokio::test]
async fn query_non_json_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    let err = svc.query("a.pdf", "q").await.unwrap_err();
    assert!(matches!(err, ServiceError::Malformed(_)));
}

// ── Controller over HTTP ──────────────────────────────────────────

#[tokio::test]
async fn full_workflow_against_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"filename": "a.pdf"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/ask/"))
        .and(body_json(json!({"file_name": "a.pdf", "question": "What is the total?"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    let mut c = Controller::new();
    c.select_file(pdf("a.pdf"));
    c.upload(&svc).await.unwrap();
    c.set_question("What is the total?");
    c.ask(&svc).await.unwrap();

    assert_eq!(c.stored_file(), Some("a.pdf"));
    assert_eq!(c.answer(), Some("42"));
    assert!(c.error().is_none());
}

#[tokio::test]
async fn validation_failures_never_reach_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let svc = HttpDocumentService::new(&server.uri(), None).unwrap();
    let mut c = Controller::new();
    assert!(c.upload(&svc).await.is_err());
    c.set_question("anything");
    assert!(c.ask(&svc).await.is_err());
    assert_eq!(c.error_message().as_deref(), Some("Please upload a file first."));
}
