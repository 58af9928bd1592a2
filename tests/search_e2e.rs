//! End-to-end exchanges against local fake peers: wiremock for the direct
//! path, a raw TCP listener for the proxied path.

use mdsearch::{CredentialStore, ReportBuffer, SearchClient, SearchError, Settings};
use std::path::PathBuf;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credential_store(name: &str) -> CredentialStore {
    let path: PathBuf = std::env::temp_dir()
        .join(format!("mdsearch-e2e-{}-{}", name, std::process::id()))
        .join("api_key");
    let mut store = CredentialStore::with_path(path);
    store.set("sk-e2e").unwrap();
    store
}

#[tokio::test]
async fn direct_search_renders_numbered_report() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(query_param("q", "rust"))
        .and(header("Accept", "text/markdown"))
        .and(header("Authorization", "Bearer sk-e2e"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[Result](https://example.com)"))
        .mount(&server)
        .await;

    let settings = Settings {
        base_url: Some(server.uri()),
        ..Default::default()
    };
    let client = SearchClient::new(settings, credential_store("direct-ok"));
    let mut report = ReportBuffer::new(4096);

    client
        .execute(r#"{"query": "rust"}"#, &mut report)
        .await
        .unwrap();

    assert!(report
        .as_str()
        .contains("1. Result\n   https://example.com\n\n"));
}

#[tokio::test]
async fn direct_non_200_maps_to_generic_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let settings = Settings {
        base_url: Some(server.uri()),
        ..Default::default()
    };
    let client = SearchClient::new(settings, credential_store("direct-500"));
    let mut report = ReportBuffer::new(4096);

    let err = client
        .execute(r#"{"query": "rust"}"#, &mut report)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)));
    assert_eq!(report.as_str(), "Error: Search request failed");
}

#[tokio::test]
async fn direct_connect_failure_maps_to_generic_failure() {
    // nothing listens on this port
    let settings = Settings {
        base_url: Some("http://127.0.0.1:9".to_string()),
        timeout_seconds: 2,
        ..Default::default()
    };
    let client = SearchClient::new(settings, credential_store("direct-refused"));
    let mut report = ReportBuffer::new(4096);

    let err = client
        .execute(r#"{"query": "rust"}"#, &mut report)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)));
    assert_eq!(report.as_str(), "Error: Search request failed");
}

/// Accept one connection, read the request, reply with canned bytes, close.
async fn spawn_raw_peer(response: &'static [u8]) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        if let Ok((mut stream, _)) = listener.accept().await {
            let mut request = vec![0u8; 4096];
            let _ = stream.read(&mut request).await;
            let _ = stream.write_all(response).await;
            let _ = stream.shutdown().await;
        }
    });
    port
}

#[tokio::test]
async fn proxied_search_renders_numbered_report() {
    let port = spawn_raw_peer(
        b"HTTP/1.1 200 OK\r\nContent-Type: text/markdown\r\nConnection: close\r\n\r\n\
          [First](https://a.example)[Second](https://b.example)",
    )
    .await;

    let settings = Settings {
        search_host: "127.0.0.1".to_string(),
        search_port: port,
        use_proxy: true,
        timeout_seconds: 2,
        ..Default::default()
    };
    let client = SearchClient::new(settings, credential_store("proxied-ok"));
    let mut report = ReportBuffer::new(4096);

    client
        .execute(r#"{"query": "rust"}"#, &mut report)
        .await
        .unwrap();

    assert!(report.as_str().contains("1. First\n   https://a.example\n\n"));
    assert!(report.as_str().contains("2. Second\n   https://b.example\n\n"));
}

#[tokio::test]
async fn proxied_503_reports_failure_despite_partial_body() {
    let port = spawn_raw_peer(b"HTTP/1.1 503 Service Unavailable\r\n\r\ntry again later").await;

    let settings = Settings {
        search_host: "127.0.0.1".to_string(),
        search_port: port,
        use_proxy: true,
        timeout_seconds: 2,
        ..Default::default()
    };
    let client = SearchClient::new(settings, credential_store("proxied-503"));
    let mut report = ReportBuffer::new(4096);

    let err = client
        .execute(r#"{"query": "rust"}"#, &mut report)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)));
    assert_eq!(report.as_str(), "Error: Search request failed");
}

#[tokio::test]
async fn proxied_connect_failure_maps_to_generic_failure() {
    let settings = Settings {
        search_host: "127.0.0.1".to_string(),
        search_port: 9, // discard port, nothing listening
        use_proxy: true,
        timeout_seconds: 2,
        ..Default::default()
    };
    let client = SearchClient::new(settings, credential_store("proxied-refused"));
    let mut report = ReportBuffer::new(4096);

    let err = client
        .execute(r#"{"query": "rust"}"#, &mut report)
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)));
    assert_eq!(report.as_str(), "Error: Search request failed");
}
