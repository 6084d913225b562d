//! Integration tests for the transport contract, using a mock RT server.

use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rtrest::client::RtClient;
use rtrest::config::Config;
use rtrest::decode::DecodeError;
use rtrest::error::RtError;

fn client_for(server: &MockServer) -> RtClient {
    let config = Config {
        base_url: server.uri(),
        username: "jdoe".to_string(),
        password: "hunter2".to_string(),
    };
    RtClient::new(&config).expect("client should build")
}

/// Wraps a payload in a valid RT response envelope.
fn envelope(payload: &str) -> String {
    format!("RT/4.4.4 200 Ok\n\n{}", payload)
}

#[tokio::test]
async fn fetches_and_decodes_a_ticket() {
    let server = MockServer::start().await;

    let payload = "id: ticket/1\n\
                   Queue: support\n\
                   Subject: printer on fire\n\
                   Status: open\n\
                   Priority: 10\n\
                   Created: Mon Mar 4 12:00:00 2013\n";

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/show"))
        .and(query_param("user", "jdoe"))
        .and(query_param("pass", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(payload)))
        .expect(1)
        .mount(&server)
        .await;

    let ticket = client_for(&server).ticket(1).await.unwrap();

    assert_eq!(ticket.id, "ticket/1");
    assert_eq!(ticket.queue, "support");
    assert_eq!(ticket.subject, "printer on fire");
    assert_eq!(ticket.status, "open");
    assert_eq!(ticket.priority, 10);
    assert!(ticket.created.is_some());
    assert!(ticket.resolved.is_none());
}

#[tokio::test]
async fn multiline_values_survive_the_full_stack() {
    let server = MockServer::start().await;

    let payload = "id: 401\nCreator: alice\nContent: hello\n world\n";

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(payload)))
        .mount(&server)
        .await;

    let comments = client_for(&server).ticket_comments(1).await.unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].content, "hello\nworld");
}

#[tokio::test]
async fn list_responses_preserve_block_order() {
    let server = MockServer::start().await;

    let payload = "id: 9\nType: DependsOn\nid: 3\nType: RefersTo\n";

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/7/links"))
        .respond_with(ResponseTemplate::new(200).set_body_string(envelope(payload)))
        .mount(&server)
        .await;

    let links = client_for(&server).ticket_links(7).await.unwrap();

    assert_eq!(links.len(), 2);
    assert_eq!(links[0].id, 9);
    assert_eq!(links[1].id, 3);
}

#[tokio::test]
async fn status_401_is_an_auth_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/show"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).ticket(1).await.unwrap_err();
    assert!(matches!(err, RtError::Auth));
}

#[tokio::test]
async fn non_200_status_is_a_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/show"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).ticket(1).await.unwrap_err();
    match err {
        RtError::ServerStatus { status } => assert_eq!(status.as_u16(), 503),
        other => panic!("expected ServerStatus, got {:?}", other),
    }
}

#[tokio::test]
async fn missing_rt_marker_is_a_protocol_error() {
    let server = MockServer::start().await;

    // HTTP 200, but the status line does not identify an RT server.
    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/show"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("HTTP/1.1 200 Ok\n\nid: ticket/1\n"),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).ticket(1).await.unwrap_err();
    assert!(matches!(err, RtError::Protocol { .. }));
}

#[tokio::test]
async fn truncated_envelope_is_a_protocol_error() {
    let server = MockServer::start().await;

    // Only a status line; no separator, no payload.
    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/show"))
        .respond_with(ResponseTemplate::new(200).set_body_string("RT/4.4.4 200 Ok"))
        .mount(&server)
        .await;

    let err = client_for(&server).ticket(1).await.unwrap_err();
    assert!(matches!(err, RtError::Protocol { .. }));
}

#[tokio::test]
async fn protocol_error_detail_never_contains_the_password() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/show"))
        .respond_with(ResponseTemplate::new(200).set_body_string("error: pass=hunter2 rejected"))
        .mount(&server)
        .await;

    let err = client_for(&server).ticket(1).await.unwrap_err();
    let message = err.to_string();
    assert!(!message.contains("hunter2"), "leaked password: {}", message);
}

#[tokio::test]
async fn payload_decode_failure_surfaces_as_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/show"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(envelope("Priority: very high\n")),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).ticket(1).await.unwrap_err();
    assert!(matches!(
        err,
        RtError::Decode(DecodeError::Coercion { key: "Priority", .. })
    ));
}

#[tokio::test]
async fn malformed_payload_line_surfaces_as_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/1/show"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(envelope("Status: open\nbroken line\n")),
        )
        .mount(&server)
        .await;

    let err = client_for(&server).ticket(1).await.unwrap_err();
    assert!(matches!(
        err,
        RtError::Decode(DecodeError::MalformedLine { .. })
    ));
}

#[tokio::test]
async fn attachment_content_returns_raw_bytes() {
    let server = MockServer::start().await;

    // Raw bytes, no envelope, no text decoding.
    let body: &[u8] = b"\x89PNG\r\n\x1a\nbinary attachment data";

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/5/attachments/crash.log"))
        .and(query_param("user", "jdoe"))
        .and(query_param("pass", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .mount(&server)
        .await;

    let bytes = client_for(&server)
        .ticket_attachment_content(5, "crash.log")
        .await
        .unwrap();

    assert_eq!(bytes, body);
}

#[tokio::test]
async fn attachment_content_checks_status_codes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/REST/1.0/ticket/5/attachments/missing.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .ticket_attachment_content(5, "missing.txt")
        .await
        .unwrap_err();
    assert!(matches!(err, RtError::ServerStatus { .. }));
}

#[tokio::test]
async fn custom_field_name_is_percent_encoded_in_the_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/REST/1\.0/ticket/7/custom_fields/Severity%20Level$"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(envelope("id: 3\nName: Severity Level\nValue: high\n")),
        )
        .mount(&server)
        .await;

    let field = client_for(&server)
        .ticket_custom_field(7, "Severity Level")
        .await
        .unwrap();

    assert_eq!(field.id, 3);
    assert_eq!(field.value, "high");
}
