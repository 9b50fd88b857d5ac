use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use engram::client::types::{AddRequest, SearchRequest};
use engram::client::{MemoryClient, MemoryService, DEFAULT_CHUNK_THRESHOLD};
use engram::error::EngramError;

fn search_request(q: &str) -> SearchRequest {
    SearchRequest {
        q: q.to_string(),
        container_tags: vec!["sm_project_alpha".to_string()],
        limit: 5,
        chunk_threshold: DEFAULT_CHUNK_THRESHOLD,
        include_full_docs: false,
    }
}

#[tokio::test]
async fn search_posts_camel_case_body_with_bearer_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/search"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "q": "favorite color",
            "containerTags": ["sm_project_alpha"],
            "limit": 5,
            "chunkThreshold": DEFAULT_CHUNK_THRESHOLD,
            "includeFullDocs": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{
                "documentId": "doc_1",
                "score": 0.92,
                "chunks": [{"content": "blue", "score": 0.9, "isRelevant": true}],
            }],
            "total": 1,
            "timing": 12.5,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MemoryClient::new("test-key").with_base_url(server.uri());
    let response = client.search(search_request("favorite color")).await.unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.total, 1);
    assert_eq!(response.results[0].document_id, "doc_1");
    assert_eq!(response.results[0].chunks[0].content, "blue");
    assert!(response.results[0].chunks[0].is_relevant);
}

#[tokio::test]
async fn search_tolerates_minimal_response_bodies() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .mount(&server)
        .await;

    let client = MemoryClient::new("test-key").with_base_url(server.uri());
    let response = client.search(search_request("anything")).await.unwrap();

    assert!(response.results.is_empty());
    assert_eq!(response.total, 0);
}

#[tokio::test]
async fn add_posts_to_memories_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/memories"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "content": "takes oat milk",
            "containerTags": ["sm_user_bob"],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "mem_abc",
            "status": "queued",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = MemoryClient::new("test-key").with_base_url(server.uri());
    let record = client
        .add(AddRequest {
            content: "takes oat milk".to_string(),
            container_tags: vec!["sm_user_bob".to_string()],
            metadata: None,
        })
        .await
        .unwrap();

    assert_eq!(record.id, "mem_abc");
    assert_eq!(record.status.as_deref(), Some("queued"));
}

#[test]
fn metadata_is_omitted_from_the_wire_when_absent() {
    let body = serde_json::to_value(AddRequest {
        content: "x".to_string(),
        container_tags: vec![],
        metadata: None,
    })
    .unwrap();
    assert!(body.get("metadata").is_none());
}

#[tokio::test]
async fn non_2xx_maps_to_api_error_with_body_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let client = MemoryClient::new("bad-key").with_base_url(server.uri());
    let err = client.search(search_request("anything")).await.unwrap_err();

    match err {
        EngramError::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid api key"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_error_body_still_yields_a_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/memories"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = MemoryClient::new("key").with_base_url(server.uri());
    let err = client
        .add(AddRequest {
            content: "x".to_string(),
            container_tags: vec![],
            metadata: None,
        })
        .await
        .unwrap_err();

    match err {
        EngramError::Api { status, message } => {
            assert_eq!(status, 500);
            assert!(!message.is_empty());
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn base_url_with_version_segment_is_not_doubled() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v3/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let client = MemoryClient::new("key").with_base_url(format!("{}/v3", server.uri()));
    client.search(search_request("anything")).await.unwrap();
}
