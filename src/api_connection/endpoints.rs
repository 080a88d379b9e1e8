use reqwest::Client;
use serde::{Deserialize, Serialize};

pub const API_PREFIX: &str = "/api";
pub const RECIPES_PATH: &str = "/recipes";
pub const GENERATE_PATH: &str = "/recipes/generate";
pub const SAVE_PATH: &str = "/recipes/save";

/// Handle on the Dishcovery backend. All paths are resolved against
/// `<backend_url>/api`.
#[derive(Debug, Clone)]
pub struct BackendApi {
    pub(crate) api_base: String,
    pub(crate) client: Client,
}

impl BackendApi {
    pub fn new(backend_url: &str) -> Self {
        Self::with_client(backend_url, Client::new())
    }

    pub fn with_client(backend_url: &str, client: Client) -> Self {
        Self {
            api_base: format!("{}{}", backend_url.trim_end_matches('/'), API_PREFIX),
            client,
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub servings: Option<String>,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub health_tags: Vec<String>,
    // Backend-owned and never interpreted here. Kept as text so any format
    // the backend stores survives a save unchanged.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
pub struct GenerateRecipeRequest<'a> {
    pub prompt: &'a str,
    pub dietary_preferences: &'a [String],
    pub health_conditions: &'a [String],
}

#[derive(Debug, Serialize, Clone)]
pub struct SaveRecipeRequest<'a> {
    pub recipe: &'a Recipe,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StatusResponse {
    pub message: String,
}

/// Error body sent by the backend. `detail` is usually a string, but request
/// validation failures carry a structured list instead.
#[derive(Debug, Deserialize, Clone)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorPayload {
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
