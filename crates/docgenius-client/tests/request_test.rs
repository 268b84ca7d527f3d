use docgenius_client::{ApiClient, ApiError, ClientConfig, RequestOptions, NETWORK_ERROR_MESSAGE};
use mockito::{Matcher, Server};
use serde_json::{json, Value};

fn client_for(server: &Server) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.url()).unwrap()).unwrap()
}

#[tokio::test]
async fn test_success_body_returned_unchanged() {
    let mut server = Server::new_async().await;
    let body = json!({"status": "ok", "service": "docgenius", "extra": [1, 2, 3]});
    let mock = server
        .mock("GET", "/health")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let value: Value = client_for(&server)
        .request_value("/health", RequestOptions::get())
        .await
        .unwrap();

    assert_eq!(value, body);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_string_body_gets_json_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/pdf/ask")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"document_id": "d1", "question": "why?"})))
        .with_status(200)
        .with_body(r#"{"answer": "because"}"#)
        .create_async()
        .await;

    let options = RequestOptions::post_text(r#"{"document_id":"d1","question":"why?"}"#);
    let value = client_for(&server)
        .request_value("/pdf/ask", options)
        .await
        .unwrap();

    assert_eq!(value["answer"], "because");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_explicit_content_type_not_overridden() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/echo")
        .match_header("content-type", "text/plain")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let options = RequestOptions::post_text("hello").header("CONTENT-TYPE", "text/plain");
    client_for(&server)
        .request_value("/echo", options)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_error_field_becomes_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/pdf/upload")
        .with_status(400)
        .with_body(r#"{"error": "Only PDF files are supported", "details": {"ext": "txt"}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .request_value("/pdf/upload", RequestOptions::post_text("{}"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert_eq!(err.message(), "Only PDF files are supported");
    assert_eq!(err.details(), Some(&json!({"ext": "txt"})));
}

#[tokio::test]
async fn test_detail_field_used_when_error_missing() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/pdf/ask")
        .with_status(404)
        .with_body(r#"{"detail": "Document not found"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .request_value("/pdf/ask", RequestOptions::post_text("{}"))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.message(), "Document not found");
}

#[tokio::test]
async fn test_non_json_failure_reports_status() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(503)
        .with_body("Service Unavailable")
        .create_async()
        .await;

    let err = client_for(&server)
        .request_value("/health", RequestOptions::get())
        .await
        .unwrap_err();

    match err {
        ApiError::Http {
            status,
            message,
            details,
        } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Request failed with status 503");
            assert!(details.is_none());
        }
        other => panic!("expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_non_json_success_is_empty_object() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_body("OK")
        .create_async()
        .await;

    let value = client_for(&server)
        .request_value("/health", RequestOptions::get())
        .await
        .unwrap();

    assert_eq!(value, json!({}));
}

#[tokio::test]
async fn test_base_url_path_prefix() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status": "ok"}"#)
        .create_async()
        .await;

    let config = ClientConfig::new(format!("{}/api/", server.url())).unwrap();
    let client = ApiClient::new(config).unwrap();
    client
        .request_value("/health", RequestOptions::get())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = ApiClient::new(ClientConfig::new("http://127.0.0.1:1").unwrap()).unwrap();

    let err = client
        .request_value("/health", RequestOptions::get())
        .await
        .unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.message(), NETWORK_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_shape_mismatch_is_unexpected() {
    #[derive(Debug, serde::Deserialize)]
    struct Answer {
        #[allow(dead_code)]
        answer: String,
    }

    let mut server = Server::new_async().await;
    server
        .mock("POST", "/pdf/ask")
        .with_status(200)
        .with_body(r#"{"answer": 42}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .request::<Answer>("/pdf/ask", RequestOptions::post_text("{}"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Unexpected(_)));
}
