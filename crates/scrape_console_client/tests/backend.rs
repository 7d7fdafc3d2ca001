use std::net::TcpListener;
use std::time::Duration;

use pretty_assertions::assert_eq;
use scrape_console_client::{BackendClient, ClientSettings, FailureKind, ReqwestBackend};
use scrape_console_core::{DefaultsResponse, HistoryEntry, PathField, RunRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> ReqwestBackend {
    let settings = ClientSettings::parse(&server.uri()).expect("mock server uri");
    ReqwestBackend::new(settings).expect("client")
}

#[tokio::test]
async fn defaults_decode_partial_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defaults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "input": "/exports/CD",
            "output": "/home/u/Desktop/out.csv"
        })))
        .mount(&server)
        .await;

    let defaults = backend_for(&server).defaults().await.expect("defaults");
    assert_eq!(
        defaults,
        DefaultsResponse {
            input: Some("/exports/CD".to_string()),
            output: Some("/home/u/Desktop/out.csv".to_string()),
            invalid: None,
        }
    );
}

#[tokio::test]
async fn endpoints_resolve_under_the_base_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/app/defaults"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "input": "/in" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/app/pick-invalid"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "path": "/x" })))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ClientSettings::parse(&format!("{}/app", server.uri())).expect("base url");
    assert!(settings.base_url.path().ends_with("/app/"));
    let backend = ReqwestBackend::new(settings).expect("client");

    let defaults = backend.defaults().await.expect("defaults");
    assert_eq!(defaults.input.as_deref(), Some("/in"));
    let picked = backend.pick(PathField::Invalid).await.expect("pick");
    assert_eq!(picked.chosen_path(), Some("/x"));
}

#[tokio::test]
async fn defaults_with_html_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defaults"))
        .respond_with(
            ResponseTemplate::new(502).set_body_raw("<html>bad gateway</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = backend_for(&server).defaults().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn history_array_keeps_order_and_tolerates_missing_fields() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "timestamp": "2024-05-02T10:00:00",
                "input": "/in",
                "output": "/out.csv",
                "invalid": "/bad.csv",
                "status": "success"
            },
            { "timestamp": "2024-05-01T09:00:00" }
        ])))
        .mount(&server)
        .await;

    let history = backend_for(&server).history().await.expect("history");
    assert_eq!(
        history,
        vec![
            HistoryEntry {
                timestamp: "2024-05-02T10:00:00".to_string(),
                status: Some("success".to_string()),
                input: "/in".to_string(),
                output: "/out.csv".to_string(),
                invalid: "/bad.csv".to_string(),
            },
            HistoryEntry {
                timestamp: "2024-05-01T09:00:00".to_string(),
                ..HistoryEntry::default()
            },
        ]
    );
}

#[tokio::test]
async fn history_object_body_means_no_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "entries": [] })))
        .mount(&server)
        .await;

    let history = backend_for(&server).history().await.expect("history");
    assert!(history.is_empty());
}

#[tokio::test]
async fn pick_uses_the_fields_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pick-invalid"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "path": "/chosen.csv" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let picked = backend_for(&server)
        .pick(PathField::Invalid)
        .await
        .expect("pick");
    assert_eq!(picked.chosen_path(), Some("/chosen.csv"));
}

#[tokio::test]
async fn run_posts_json_body_and_returns_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/run"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "input": "a", "output": "b", "invalid": "c" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "ok": true, "output": "b", "invalid": "c" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = backend_for(&server)
        .run(&RunRequest::trimmed(" a", "b ", "c"))
        .await
        .expect("run");
    assert!(reply.http_ok);
    assert!(reply.succeeded());
    assert_eq!(reply.result.output.as_deref(), Some("b"));
    assert_eq!(reply.result.invalid.as_deref(), Some("c"));
}

#[tokio::test]
async fn run_failure_status_still_decodes_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/run"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "ok": false,
            "error": "Scraper failed.",
            "stderr": "Traceback ..."
        })))
        .mount(&server)
        .await;

    let reply = backend_for(&server)
        .run(&RunRequest::default())
        .await
        .expect("run");
    assert!(!reply.http_ok);
    assert!(!reply.succeeded());
    assert_eq!(reply.result.error.as_deref(), Some("Scraper failed."));
    assert_eq!(reply.result.stderr.as_deref(), Some("Traceback ..."));
}

#[tokio::test]
async fn request_timeout_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/defaults"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let mut settings = ClientSettings::parse(&server.uri()).unwrap();
    settings.request_timeout = Some(Duration::from_millis(50));
    let backend = ReqwestBackend::new(settings).unwrap();

    let err = backend.defaults().await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let settings = ClientSettings::parse(&format!("http://{addr}/")).unwrap();
    let backend = ReqwestBackend::new(settings).unwrap();

    let err = backend.run(&RunRequest::default()).await.unwrap_err();
    assert!(matches!(err.kind, FailureKind::Connect | FailureKind::Network));
}

#[test]
fn malformed_base_url_is_rejected() {
    let err = ClientSettings::parse("not a url").unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
