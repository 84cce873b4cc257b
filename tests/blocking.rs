//! Thread-blocking client tests.
//!
//! The wiremock server lives on its own runtime; the blocking client
//! drives its calls from the plain test thread.

use halonapi::blocking::BlockingClient;
use halonapi::{ClientConfig, ErrorKind, StatsFilter};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap()
}

#[test]
fn test_blocking_call_returns_value() {
    let rt = mock_runtime();
    let mock_server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("GET"))
            .and(path("/api/5.6.0/system/versions/current"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "5.6.0"})))
            .expect(1)
            .mount(&mock_server),
    );

    let client =
        BlockingClient::new(ClientConfig::new(mock_server.uri(), "admin", "secret")).unwrap();
    let version = client.call(|c| c.get_software_version()).unwrap();
    assert_eq!(version, "5.6.0");

    rt.block_on(mock_server.verify());
}

#[test]
fn test_blocking_call_propagates_errors() {
    let rt = mock_runtime();
    let mock_server = rt.block_on(MockServer::start());

    rt.block_on(
        Mock::given(method("DELETE"))
            .and(path("/api/5.6.0/stats"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "denied"})))
            .mount(&mock_server),
    );

    let client =
        BlockingClient::new(ClientConfig::new(mock_server.uri(), "admin", "secret")).unwrap();
    let filter = StatsFilter::default();
    let err = client.call(|c| c.clear_stats(&filter)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Remote);
    assert_eq!(err.to_string(), "denied");
}

#[test]
fn test_blocking_unsupported_needs_no_server() {
    let client = BlockingClient::new(ClientConfig::new("127.0.0.1", "admin", "secret")).unwrap();
    let err = client.call(|c| c.check_config(&[])).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unsupported);
}
