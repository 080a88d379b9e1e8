#![allow(dead_code)]

use std::sync::Arc;

use dishcovery::api_connection::BackendApi;
use dishcovery::storage::MemoryStore;
use dishcovery::views::AppContext;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const RECIPES: &str = "/api/recipes";
pub const GENERATE: &str = "/api/recipes/generate";
pub const SAVE: &str = "/api/recipes/save";

pub fn recipe_json(id: &str, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": format!("{} for testing", title),
        "ingredients": ["1 cup rice", "2 cups water"],
        "instructions": ["Rinse rice", "Boil water", "Simmer 15 minutes"],
        "prep_time": "5 minutes",
        "cook_time": "15 minutes",
        "servings": "2 servings",
        "dietary_tags": ["vegan"],
        "health_tags": ["low-sodium"],
        "created_at": "2025-05-01T10:00:00Z"
    })
}

pub fn context(server: &MockServer, store: Arc<MemoryStore>) -> AppContext {
    AppContext::new(BackendApi::new(&server.uri()), store)
}

/// Serves the given catalog on every `GET /api/recipes`.
pub async fn mount_catalog(server: &MockServer, recipes: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path(RECIPES))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(recipes)))
        .mount(server)
        .await;
}

pub async fn requests_to(server: &MockServer, wanted: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == wanted)
        .count()
}
