use gmail_audit::core::MailSource;
use gmail_audit::{AuditError, GmailClient};
use httpmock::prelude::*;

#[tokio::test]
async fn test_list_message_ids_follows_pages_until_max() {
    let server = MockServer::start();

    let first_page = server.mock(|when, then| {
        when.method(GET)
            .path("/users/me/messages")
            .query_param("q", "subject:welcome")
            .query_param("maxResults", "3")
            .header("authorization", "Bearer test-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "messages": [{"id": "m1", "threadId": "t1"}, {"id": "m2", "threadId": "t2"}],
                "nextPageToken": "p2"
            }));
    });

    let second_page = server.mock(|when, then| {
        when.method(GET)
            .path("/users/me/messages")
            .query_param("maxResults", "1")
            .query_param("pageToken", "p2");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "messages": [{"id": "m3", "threadId": "t3"}, {"id": "m4", "threadId": "t4"}],
                "nextPageToken": "p3"
            }));
    });

    let client = GmailClient::new(&server.base_url(), "test-token", "subject:welcome");
    let ids = client.list_message_ids(3).await.unwrap();

    first_page.assert();
    second_page.assert();
    assert_eq!(ids, vec!["m1", "m2", "m3"]);
}

#[tokio::test]
async fn test_list_message_ids_stops_without_next_page() {
    let server = MockServer::start();

    let listing = server.mock(|when, then| {
        when.method(GET).path("/users/me/messages");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"resultSizeEstimate": 0}));
    });

    let client = GmailClient::new(&server.base_url(), "test-token", "subject:welcome");
    let ids = client.list_message_ids(500).await.unwrap();

    listing.assert_hits(1);
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_get_message_headers_returns_payload_headers() {
    let server = MockServer::start();

    let metadata = server.mock(|when, then| {
        when.method(GET)
            .path("/users/me/messages/m1")
            .query_param("format", "metadata");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "id": "m1",
                "payload": {
                    "headers": [
                        {"name": "From", "value": "GitHub <noreply@github.com>"},
                        {"name": "Subject", "value": "Please verify your email"},
                        {"name": "List-Id", "value": "<notifications.github.com>"}
                    ]
                }
            }));
    });

    let client = GmailClient::new(&server.base_url(), "test-token", "subject:welcome");
    let headers = client.get_message_headers("m1").await.unwrap();

    metadata.assert();
    assert_eq!(headers.len(), 3);
    assert_eq!(headers.get("from"), Some("GitHub <noreply@github.com>"));
    assert_eq!(headers.get("list-id"), Some("<notifications.github.com>"));
}

#[tokio::test]
async fn test_get_message_headers_surfaces_http_errors() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/users/me/messages/gone");
        then.status(404);
    });

    let client = GmailClient::new(&server.base_url(), "test-token", "subject:welcome");
    let err = client.get_message_headers("gone").await.unwrap_err();
    assert!(matches!(err, AuditError::ApiError(_)));
}
