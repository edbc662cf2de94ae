//! Integration tests for lazy pagination.
//!
//! Offset pagination continues only after a full page; cursor pagination
//! follows `next_partition_href` and never sends an offset.

use serde_json::{json, Value};
use soundcloud_api::rest::{Continuation, LINKED_PARTITIONING_PARAMETER};
use soundcloud_api::{ApiHost, ClientId, ClientSecret, Connector, ConnectorConfig, Credential};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn create_connector(server: &MockServer) -> Connector {
    let config = ConnectorConfig::builder()
        .host(ApiHost::new(server.uri()).unwrap())
        .build()
        .unwrap();
    let credential = Credential::new(
        ClientId::new("client-id").unwrap(),
        ClientSecret::new("client-secret").unwrap(),
        "https://example.com/callback",
    )
    .with_access_token("T");
    Connector::new(config, credential).unwrap()
}

/// A page of `count` tracks with ids starting at `first`.
fn page(first: u64, count: u64) -> Value {
    Value::Array((first..first + count).map(|id| json!({"id": id})).collect())
}

fn offsets(requests: &[Request]) -> Vec<Option<String>> {
    requests
        .iter()
        .map(|r| {
            r.url
                .query_pairs()
                .find(|(k, _)| k == "offset")
                .map(|(_, v)| v.into_owned())
        })
        .collect()
}

// ============================================================================
// Offset Pagination Tests
// ============================================================================

#[tokio::test]
async fn test_short_first_page_issues_no_continuation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(50, 1)))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 49)))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server).root_scope();
    let tracks = root
        .endpoint("tracks")
        .fetch()
        .await
        .unwrap()
        .into_collection()
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(tracks.len(), 49);
}

#[tokio::test]
async fn test_full_page_issues_exactly_one_continuation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 50)))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server).root_scope();
    let mut collection = root
        .endpoint("tracks")
        .fetch()
        .await
        .unwrap()
        .into_collection()
        .unwrap();
    assert!(matches!(
        collection.continuation(),
        Some(Continuation::Offset(_))
    ));

    let mut count = 0;
    while let Some(track) = collection.next().await.unwrap() {
        assert_eq!(track.kind(), "tracks");
        count += 1;
    }

    assert_eq!(count, 50);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(offsets(&requests), vec![None, Some("50".to_string())]);
}

#[tokio::test]
async fn test_pages_are_fetched_only_when_drained() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param("offset", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(50, 3)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(0, 50)))
        .mount(&server)
        .await;

    let root = create_connector(&server).root_scope();
    let mut collection = root
        .endpoint("tracks")
        .fetch()
        .await
        .unwrap()
        .into_collection()
        .unwrap();

    for _ in 0..50 {
        collection.next().await.unwrap();
    }
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    let next = collection.next().await.unwrap().unwrap();
    assert_eq!(next.id(), Some(50));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
    assert!(collection.continuation().is_none());
}

#[tokio::test]
async fn test_caller_offset_seeds_continuation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param("offset", "70"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(70, 2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .and(query_param("offset", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(20, 50)))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server).root_scope();
    let endpoint = root.endpoint("tracks");
    let tracks = endpoint
        .send(endpoint.request().query_param("offset", "20"))
        .await
        .unwrap()
        .into_collection()
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(tracks.len(), 52);
    let requests = server.received_requests().await.unwrap();
    for request in &requests {
        let count = request.url.query_pairs().filter(|(k, _)| k == "offset").count();
        assert_eq!(count, 1);
    }
}

// ============================================================================
// Linked Partitioning Tests
// ============================================================================

#[tokio::test]
async fn test_linked_partitioning_follows_cursor() {
    let server = MockServer::start().await;
    let cursor = format!(
        "{}/me/favorites?cursor=page2&linked_partitioning=1&oauth_token=stale",
        server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/me/favorites/"))
        .and(query_param("cursor", "page2"))
        .and(query_param("oauth_token", "T"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{"id": 3}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me/favorites/"))
        .and(query_param(LINKED_PARTITIONING_PARAMETER, "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{"id": 1}, {"id": 2}],
            "next_partition_href": cursor
        })))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server).root_scope();
    let endpoint = root.endpoint("me/favorites");
    let collection = endpoint
        .send(endpoint.request().query_param(LINKED_PARTITIONING_PARAMETER, "1"))
        .await
        .unwrap()
        .into_collection()
        .unwrap();

    assert!(collection.partition_cursor().is_some());
    assert!(matches!(
        collection.continuation(),
        Some(Continuation::Partition(_))
    ));

    let ids: Vec<_> = collection
        .collect_all()
        .await
        .unwrap()
        .iter()
        .filter_map(soundcloud_api::rest::Resource::id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(offsets(&requests), vec![None, None]);
    let stale = requests[1]
        .url
        .query_pairs()
        .any(|(k, v)| k == "oauth_token" && v == "stale");
    assert!(!stale);
}

#[tokio::test]
async fn test_cursor_continuation_reuses_exact_path() {
    let server = MockServer::start().await;
    let cursor = format!("{}/me/favorites?cursor=page2&linked_partitioning=1", server.uri());
    Mock::given(method("GET"))
        .and(path("/me/favorites"))
        .and(query_param("cursor", "page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{"id": 2}]
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me/favorites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{"id": 1}],
            "next_partition_href": cursor
        })))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server).root_scope();
    let endpoint = root.endpoint("me");
    let favorites = endpoint
        .send(
            endpoint
                .request()
                .arg("favorites")
                .query_param(LINKED_PARTITIONING_PARAMETER, "1"),
        )
        .await
        .unwrap()
        .into_collection()
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(favorites.len(), 2);
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() == "/me/favorites"));
}

#[tokio::test]
async fn test_linked_partitioning_full_page_without_cursor_stops() {
    let server = MockServer::start().await;
    let items: Vec<_> = (0..50).map(|id| json!({"id": id})).collect();
    Mock::given(method("GET"))
        .and(path("/tracks/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "collection": items })))
        .expect(1)
        .mount(&server)
        .await;

    let root = create_connector(&server).root_scope();
    let endpoint = root.endpoint("tracks");
    let tracks = endpoint
        .send(endpoint.request().query_param(LINKED_PARTITIONING_PARAMETER, "1"))
        .await
        .unwrap()
        .into_collection()
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(tracks.len(), 50);
}
