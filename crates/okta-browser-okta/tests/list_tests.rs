use okta_browser::{Directory, DirectoryError};
use okta_browser_okta::{OktaDirectory, OktaDirectoryConfig};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn directory_for(server: &MockServer) -> OktaDirectory {
    OktaDirectory::new(OktaDirectoryConfig {
        org_url: server.uri(),
        api_token: "test-token".into(),
    })
    .unwrap()
}

async fn mount_users_fixture(server: &MockServer) {
    let fixture = include_str!("fixtures/users_list.json");

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(header("Authorization", "SSWS test-token"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(fixture, "application/json"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_returns_entries_in_response_order() {
    let server = MockServer::start().await;
    mount_users_fixture(&server).await;

    let entries = directory_for(&server).list_entries().await.unwrap();
    let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();

    assert_eq!(
        ids,
        vec![
            "alice@example.com",
            "bob@example.com",
            "00u3nologin",
            "00u4noprofile"
        ]
    );
}

#[tokio::test]
async fn list_labels_entries() {
    let server = MockServer::start().await;
    mount_users_fixture(&server).await;

    let entries = directory_for(&server).list_entries().await.unwrap();

    assert_eq!(entries[0].label.as_deref(), Some("Alice Liddell"));
    assert_eq!(entries[1].label, None);
    assert_eq!(entries[2].label.as_deref(), Some("unknown"));
    assert_eq!(entries[3].label.as_deref(), Some("profile not available"));
}

#[tokio::test]
async fn list_empty_directory() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("[]", "application/json"))
        .mount(&server)
        .await;

    let entries = directory_for(&server).list_entries().await.unwrap();
    assert!(entries.is_empty());
}

#[tokio::test]
async fn list_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(401).set_body_raw(
            r#"{"errorCode":"E0000011","errorSummary":"Invalid token provided"}"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let result = directory_for(&server).list_entries().await;
    assert!(matches!(result, Err(DirectoryError::Unauthorized(_))));
}

#[tokio::test]
async fn list_server_error_carries_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let result = directory_for(&server).list_entries().await;
    match result {
        Err(DirectoryError::Http { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_malformed_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{not json", "application/json"))
        .mount(&server)
        .await;

    let result = directory_for(&server).list_entries().await;
    assert!(matches!(result, Err(DirectoryError::Parse(_))));
}

#[tokio::test]
async fn list_unreachable_server_is_network_error() {
    // Reserve a free port, then release it so nothing is listening there.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let directory = OktaDirectory::new(OktaDirectoryConfig {
        org_url: format!("http://127.0.0.1:{port}"),
        api_token: "test-token".into(),
    })
    .unwrap();

    let result = directory.list_entries().await;
    assert!(matches!(result, Err(DirectoryError::Network(_))));
}
