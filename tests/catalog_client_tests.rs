mod common;

use common::{mount_catalog, recipe_json, requests_to, RECIPES, SAVE};
use dishcovery::api_connection::{ApiConnectionError, BackendApi};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_fetch_all_keeps_backend_order() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        vec![recipe_json("r2", "Newest"), recipe_json("r1", "Oldest")],
    )
    .await;

    let api = BackendApi::new(&server.uri());
    let recipes = api.fetch_all().await.expect("catalog fetch failed");
    let ids: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r2", "r1"]);
    assert_eq!(recipes[0].servings.as_deref(), Some("2 servings"));
}

#[tokio::test]
async fn test_fetch_by_id_filters_full_catalog() {
    let server = MockServer::start().await;
    mount_catalog(&server, vec![recipe_json("r1", "Rice"), recipe_json("r2", "Beans")]).await;
    let api = BackendApi::new(&server.uri());

    let found = api.fetch_by_id("r2").await.expect("lookup failed");
    assert_eq!(found.title, "Beans");

    match api.fetch_by_id("r9").await {
        Err(ApiConnectionError::NotFound(id)) => assert_eq!(id, "r9"),
        other => panic!("expected NotFound, got {:?}", other),
    }

    // Each lookup is a full catalog read.
    assert_eq!(requests_to(&server, RECIPES).await, 2);
}

#[tokio::test]
async fn test_naive_timestamp_does_not_break_catalog() {
    let server = MockServer::start().await;
    let mut naive = recipe_json("r2", "Beans");
    naive["created_at"] = json!("2025-06-01T12:30:00.123456");
    mount_catalog(&server, vec![recipe_json("r1", "Rice"), naive]).await;

    let api = BackendApi::new(&server.uri());
    let recipes = api.fetch_all().await.expect("catalog fetch failed");
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[1].created_at.as_deref(), Some("2025-06-01T12:30:00.123456"));
}

#[tokio::test]
async fn test_save_echoes_timestamp_unchanged() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SAVE))
        .and(body_partial_json(json!({"recipe": {"created_at": "2025-06-01T12:30:00.123456"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let mut fixture = recipe_json("r2", "Beans");
    fixture["created_at"] = json!("2025-06-01T12:30:00.123456");
    let recipe = serde_json::from_value(fixture).expect("fixture should parse");
    let api = BackendApi::new(&server.uri());
    api.save(&recipe).await.expect("save failed");
}

#[tokio::test]
async fn test_fetch_by_ids_drops_dangling_ids() {
    let server = MockServer::start().await;
    mount_catalog(
        &server,
        vec![
            recipe_json("r1", "Rice"),
            recipe_json("r2", "Beans"),
            recipe_json("r3", "Soup"),
        ],
    )
    .await;
    let api = BackendApi::new(&server.uri());

    let ids = vec!["r3".to_string(), "gone".to_string(), "r1".to_string()];
    let recipes = api.fetch_by_ids(&ids).await.expect("lookup failed");
    let found: Vec<&str> = recipes.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(found, vec!["r1", "r3"]);
}

#[tokio::test]
async fn test_non_success_status_is_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RECIPES))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "database offline"})))
        .mount(&server)
        .await;

    let api = BackendApi::new(&server.uri());
    match api.fetch_all().await {
        Err(ApiConnectionError::Server { status, detail, .. }) => {
            assert_eq!(status.as_u16(), 503);
            assert_eq!(detail.as_deref(), Some("database offline"));
        }
        other => panic!("expected a server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_catalog_is_serialization_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(RECIPES))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = BackendApi::new(&server.uri());
    assert!(matches!(
        api.fetch_all().await,
        Err(ApiConnectionError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on the discard port.
    let api = BackendApi::new("http://127.0.0.1:9");
    assert!(matches!(
        api.fetch_all().await,
        Err(ApiConnectionError::Network(_))
    ));
}

#[tokio::test]
async fn test_save_posts_wrapped_recipe() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SAVE))
        .and(body_partial_json(json!({"recipe": {"id": "r1", "title": "Rice"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(recipe_json("r1", "Rice")))
        .expect(1)
        .mount(&server)
        .await;

    let api = BackendApi::new(&server.uri());
    let recipe = serde_json::from_value(recipe_json("r1", "Rice")).expect("fixture should parse");
    api.save(&recipe).await.expect("save failed");
}

#[tokio::test]
async fn test_health_reads_status_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Dishcovery API is running"})))
        .mount(&server)
        .await;

    let api = BackendApi::new(&server.uri());
    assert_eq!(api.health().await.expect("health failed"), "Dishcovery API is running");
}
