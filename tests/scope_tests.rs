//! Integration tests for scoped calls.
//!
//! These tests drive scopes, endpoints and binders against a mock server and
//! verify the request shape, the redirect conventions and response mapping.

use serde_json::json;
use soundcloud_api::clients::{HttpError, Upload};
use soundcloud_api::rest::{ApiCall, ApiError, Field, Outcome, ResourceRef};
use soundcloud_api::{
    ApiHost, BasePath, ClientId, ClientSecret, Connector, ConnectorConfig, Credential,
};
use wiremock::matchers::{body_string_contains, header, header_regex, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a connector talking to the mock server.
fn create_connector(server: &MockServer, base: &str, token: Option<&str>) -> Connector {
    let config = ConnectorConfig::builder()
        .host(ApiHost::new(server.uri()).unwrap())
        .base_path(BasePath::new(base).unwrap())
        .build()
        .unwrap();
    let mut credential = Credential::new(
        ClientId::new("client-id").unwrap(),
        ClientSecret::new("client-secret").unwrap(),
        "https://example.com/callback",
    );
    if let Some(token) = token {
        credential = credential.with_access_token(token);
    }
    Connector::new(config, credential).unwrap()
}

fn json_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

// ============================================================================
// Request Construction Tests
// ============================================================================

#[tokio::test]
async fn test_get_is_signed_with_access_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/"))
        .and(query_param("oauth_token", "T"))
        .and(header("accept", "application/json"))
        .respond_with(json_response(json!({"id": 1, "username": "me"})))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", Some("T")).root_scope();
    let me = root.endpoint("me").fetch().await.unwrap().into_resource().unwrap();

    assert_eq!(me.kind(), "users");
    assert_eq!(me.id(), Some(1));
}

#[tokio::test]
async fn test_unsigned_request_has_no_token_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param("q", "drone"))
        .respond_with(json_response(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let endpoint = root.endpoint("tracks");
    let outcome = endpoint
        .send(endpoint.request().query_param("q", "drone"))
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].url.query().unwrap_or_default().contains("oauth_token"));
    assert!(outcome.into_collection().unwrap().current_batch().is_empty());
}

#[tokio::test]
async fn test_base_path_and_collapsed_scope_compose_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/tracks/2/comments/"))
        .respond_with(json_response(json!([{"id": 10, "body": "hi"}])))
        .expect(1)
        .mount(&server)
        .await;

    let scope = create_connector(&server, "v1", None)
        .root_scope()
        .child(ResourceRef::new("users", 1))
        .child(ResourceRef::new("tracks", 2));
    let comments = scope
        .endpoint("comments")
        .fetch()
        .await
        .unwrap()
        .into_collection()
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].kind(), "comments");
}

#[tokio::test]
async fn test_full_scope_when_collapse_disabled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/1/tracks/2/comments/"))
        .respond_with(json_response(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ConnectorConfig::builder()
        .host(ApiHost::new(server.uri()).unwrap())
        .collapse_scope(false)
        .build()
        .unwrap();
    let credential = Credential::new(
        ClientId::new("client-id").unwrap(),
        ClientSecret::new("client-secret").unwrap(),
        "https://example.com/callback",
    );
    let scope = Connector::new(config, credential)
        .unwrap()
        .root_scope()
        .child(ResourceRef::new("users", 1))
        .child(ResourceRef::new("tracks", 2));

    assert!(scope.endpoint("comments").fetch().await.is_ok());
}

#[tokio::test]
async fn test_positional_args_join_after_method() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/42"))
        .respond_with(json_response(json!({"title": "t"})))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let track = root
        .endpoint("tracks")
        .call([42])
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(track.id(), Some(42));
}

#[tokio::test]
async fn test_binder_new_posts_bracketed_fields() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tracks/"))
        .and(body_string_contains("track%5Btitle%5D=demo"))
        .and(body_string_contains("track%5Bsharing%5D=private"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 5, "title": "demo"})))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", Some("T")).root_scope();
    let track = root
        .binder("Track")
        .unwrap()
        .new([("title", "demo"), ("sharing", "private")])
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(track.id(), Some(5));
}

#[tokio::test]
async fn test_endpoint_new_creates_below_scope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tracks/7/comments/"))
        .and(body_string_contains("comment%5Bbody%5D=nice"))
        .respond_with(json_response(json!({"id": 8, "body": "nice"})))
        .expect(1)
        .mount(&server)
        .await;

    let scope = create_connector(&server, "", None)
        .root_scope()
        .child(ResourceRef::new("tracks", 7));
    let outcome = scope
        .endpoint("comments")
        .new([("body", "nice")])
        .await
        .unwrap();

    assert_eq!(outcome.into_resource().unwrap().kind(), "comments");
}

#[tokio::test]
async fn test_endpoint_new_requires_registered_kind() {
    let server = MockServer::start().await;
    let root = create_connector(&server, "", None).root_scope();

    let result = root.endpoint("apps").new([("name", "x")]).await;

    assert!(matches!(result, Err(ApiError::UnknownResourceKind { ref name }) if name == "apps"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_binder_get_fetches_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/playlists/3"))
        .respond_with(json_response(json!({"id": 3, "title": "set"})))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let playlist = root
        .binder("Playlist")
        .unwrap()
        .get(3)
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(playlist.kind(), "playlists");
}

#[tokio::test]
async fn test_multipart_upload_from_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tracks/"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("filename=\"demo.mp3\""))
        .and(body_string_contains("AUDIO"))
        .respond_with(json_response(json!({"id": 11})))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let outcome = root
        .binder("Track")
        .unwrap()
        .new([
            ("title", Field::from("demo")),
            ("asset_data", Field::from(Upload::bytes("demo.mp3", b"AUDIO".to_vec()))),
        ])
        .await
        .unwrap();

    assert_eq!(outcome.into_resource().unwrap().id(), Some(11));
}

#[tokio::test]
async fn test_multipart_upload_streams_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tracks/"))
        .and(header_regex("content-type", "^multipart/form-data"))
        .and(body_string_contains("FILE-CONTENTS"))
        .respond_with(json_response(json!({"id": 12})))
        .expect(1)
        .mount(&server)
        .await;

    let file = std::env::temp_dir().join(format!("upload-{}.wav", std::process::id()));
    tokio::fs::write(&file, b"FILE-CONTENTS").await.unwrap();

    let root = create_connector(&server, "", None).root_scope();
    let outcome = root
        .binder("Track")
        .unwrap()
        .new([("asset_data", Upload::file(&file))])
        .await;
    let _ = tokio::fs::remove_file(&file).await;

    assert_eq!(outcome.unwrap().into_resource().unwrap().id(), Some(12));
}

#[tokio::test]
async fn test_missing_upload_file_is_transport_error() {
    let server = MockServer::start().await;
    let root = create_connector(&server, "", None).root_scope();

    let result = root
        .binder("Track")
        .unwrap()
        .new([("asset_data", Upload::file("/nonexistent/demo.mp3"))])
        .await;

    assert!(matches!(result, Err(ApiError::Http(HttpError::Upload { .. }))));
}

// ============================================================================
// Collection Membership Tests
// ============================================================================

#[tokio::test]
async fn test_append_puts_member_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/me/favorites/42"))
        .and(header("content-length", "0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let outcome = root.endpoint("me/favorites").append(42_u64).await.unwrap();

    assert!(matches!(outcome, Outcome::Empty));
}

#[tokio::test]
async fn test_remove_deletes_member_by_resource_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/42"))
        .respond_with(json_response(json!({"id": 42})))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/users/1/favorites/42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let track = root
        .binder("Track")
        .unwrap()
        .get(42)
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    let favorites = root.child(ResourceRef::new("users", 1)).endpoint("favorites");
    assert!(favorites.remove(&track).await.is_ok());
}

#[tokio::test]
async fn test_append_created_without_location_is_no_result() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/groups/5/tracks/9"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let scope = create_connector(&server, "", None)
        .root_scope()
        .child(ResourceRef::new("groups", 5));
    let outcome = scope.endpoint("tracks").append("9").await.unwrap();

    assert!(outcome.is_no_result());
}

// ============================================================================
// Redirect Tests
// ============================================================================

#[tokio::test]
async fn test_see_other_changes_method_and_kind() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resolve/"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/tracks/42"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tracks/42"))
        .and(query_param("oauth_token", "T"))
        .respond_with(json_response(json!({"title": "resolved"})))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", Some("T")).root_scope();
    let endpoint = root.endpoint("resolve");
    let track = endpoint
        .send(endpoint.request().query_param("url", "https://soundcloud.com/a/b"))
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(track.kind(), "tracks");
    assert_eq!(track.id(), Some(42));
}

#[tokio::test]
async fn test_created_with_location_is_followed() {
    let server = MockServer::start().await;
    let location = format!("{}/v1/comments/77", server.uri());
    Mock::given(method("POST"))
        .and(path("/v1/tracks/3/comments/"))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", location.as_str()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/comments/77"))
        .respond_with(json_response(json!({"body": "nice"})))
        .expect(1)
        .mount(&server)
        .await;

    let scope = create_connector(&server, "v1", None)
        .root_scope()
        .child(ResourceRef::new("tracks", 3));
    let comment = scope
        .binder("Comment")
        .unwrap()
        .new([("body", "nice")])
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(comment.id(), Some(77));
}

#[tokio::test]
async fn test_relative_location_resolves_against_request_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/tracks/"))
        .respond_with(ResponseTemplate::new(201).insert_header("Location", "42"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/tracks/42"))
        .and(query_param("oauth_token", "T"))
        .respond_with(json_response(json!({"title": "demo"})))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "v1", Some("T")).root_scope();
    let track = root
        .binder("Track")
        .unwrap()
        .new([("title", "demo")])
        .await
        .unwrap()
        .into_resource()
        .unwrap();

    assert_eq!(track.kind(), "tracks");
    assert_eq!(track.id(), Some(42));
}

#[tokio::test]
async fn test_redirect_outside_base_is_invalid_addressing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/me/"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/v2/users/1"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/users/1"))
        .respond_with(json_response(json!({"id": 1})))
        .mount(&server)
        .await;

    let root = create_connector(&server, "v1", None).root_scope();
    let result = root.endpoint("me").fetch().await;

    assert!(matches!(result, Err(ApiError::InvalidAddressing { .. })));
}

#[tokio::test]
async fn test_redirect_loop_is_bounded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop/"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/loop/"))
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let result = root.endpoint("loop").fetch().await;

    assert!(matches!(
        result,
        Err(ApiError::Http(HttpError::TooManyRedirects { .. }))
    ));
}

// ============================================================================
// Status and Content Type Tests
// ============================================================================

#[tokio::test]
async fn test_get_not_found_is_absence() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let outcome = root.binder("Track").unwrap().get(404).await.unwrap();

    assert!(outcome.is_not_found());
}

#[tokio::test]
async fn test_delete_not_found_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/me/favorites/1"))
        .respond_with(ResponseTemplate::new(404).set_body_string("missing"))
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let result = root.endpoint("me/favorites").remove(1_u64).await;

    match result {
        Err(ApiError::Http(HttpError::Response(e))) => {
            assert_eq!(e.code, 404);
            assert_eq!(e.message, "missing");
        }
        other => panic!("expected response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let error = root.endpoint("me").fetch().await.unwrap_err();

    assert_eq!(error.to_string(), "HTTP 503: down");
}

#[tokio::test]
async fn test_html_response_is_unexpected_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_body_string("<html>maintenance</html>"),
        )
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let result = root.endpoint("me").fetch().await;

    assert!(matches!(
        result,
        Err(ApiError::UnexpectedContentType { ref body, .. }) if body.contains("maintenance")
    ));
}

#[tokio::test]
async fn test_malformed_json_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/json")
                .set_body_string("{\"id\": "),
        )
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let result = root.endpoint("me").fetch().await;

    assert!(matches!(result, Err(ApiError::MalformedPayload { .. })));
}

#[tokio::test]
async fn test_unregistered_path_returns_raw_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/apps/"))
        .respond_with(json_response(json!([{"name": "app"}])))
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let outcome = root.endpoint("apps").fetch().await.unwrap();

    assert_eq!(outcome.into_raw(), Some(json!([{"name": "app"}])));
}

#[tokio::test]
async fn test_secret_token_reset_goes_to_dedicated_path() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/tracks/5/secret-token"))
        .and(header("content-length", "0"))
        .respond_with(json_response(json!({"uri": "x"})))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server, "", None).root_scope();
    let call = ApiCall::new("tracks")
        .arg(5)
        .param("track[title]", "renamed")
        .param("track[secret_token]", "1")
        .http_method(soundcloud_api::HttpMethod::Put);
    let track = root.call(call).await.unwrap().into_resource().unwrap();

    assert_eq!(track.kind(), "tracks");
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].body.is_empty());
}

#[test]
fn test_connector_builds_outside_runtime() {
    let server = tokio_test::block_on(MockServer::start());
    let connector = create_connector(&server, "", Some("T"));
    assert_eq!(connector.http().origin(), server.uri());
}
