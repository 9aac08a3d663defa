//! Tests of the client surface that need no running service.

use bookkeeping_client::{BookkeepingClient, BookkeepingError, ClientConfig};
use std::time::Duration;

#[test]
fn test_client_construction() {
    assert!(BookkeepingClient::new("http://localhost:4000/api", "token").is_ok());
    assert!(BookkeepingClient::new("https://ali-bookkeeping.cern.ch/api", "token").is_ok());
}

#[test]
fn test_client_invalid_url() {
    let result = BookkeepingClient::new("localhost:4000/api", "token");

    match result {
        Err(BookkeepingError::InvalidUrl(msg)) => {
            assert!(msg.contains("http://"));
        }
        _ => panic!("Expected InvalidUrl error"),
    }
}

#[test]
fn test_trailing_slash_is_stripped() {
    let client = BookkeepingClient::new("http://localhost:4000/api/", "token").unwrap();
    assert_eq!(client.base_url(), "http://localhost:4000/api");
}

#[test]
fn test_client_from_config() {
    let config = ClientConfig::new("http://localhost:4000/api", "token")
        .with_timeout(Duration::from_secs(30))
        .with_user_agent("EcsBridge/2.1");

    let client = BookkeepingClient::from_config(config).unwrap();
    assert_eq!(client.base_url(), "http://localhost:4000/api");
}

#[test]
fn test_client_is_clone_and_send() {
    fn assert_send_sync<T: Send + Sync + Clone>() {}
    assert_send_sync::<BookkeepingClient>();
}

#[test]
fn test_error_display() {
    let err = BookkeepingError::from_response_body(
        404,
        r#"{"errors":[{"status":"404","title":"Run with this id (5) could not be found"}]}"#,
    );
    assert_eq!(
        err.to_string(),
        "API error (status 404): Run with this id (5) could not be found"
    );

    let err = BookkeepingError::InvalidUrl("bad".to_string());
    assert_eq!(err.to_string(), "Invalid URL: bad");
}
