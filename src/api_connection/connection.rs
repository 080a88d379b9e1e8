use reqwest::{Response, StatusCode};
use tracing::{debug, info, warn};

use super::endpoints::{
    BackendApi, ErrorPayload, GenerateRecipeRequest, Recipe, SaveRecipeRequest, StatusResponse,
    GENERATE_PATH, RECIPES_PATH, SAVE_PATH,
};
use super::failure::GenerationFailure;

#[derive(Debug, thiserror::Error)]
pub enum ApiConnectionError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server error {status}: {}", server_message(.detail, .error_body))]
    Server {
        status: StatusCode,
        detail: Option<String>,
        error_body: String,
    },
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("recipe '{0}' not found")]
    NotFound(String),
}

fn server_message<'a>(detail: &'a Option<String>, error_body: &'a str) -> &'a str {
    detail.as_deref().unwrap_or(error_body)
}

impl ApiConnectionError {
    /// Maps a failed generation call onto its user-facing category.
    pub fn generation_failure(&self) -> GenerationFailure {
        match self {
            ApiConnectionError::Server {
                detail: Some(detail),
                ..
            } => GenerationFailure::from_detail(detail),
            _ => GenerationFailure::Unknown,
        }
    }
}

impl BackendApi {
    /// `GET /api/` status message.
    pub async fn health(&self) -> Result<String, ApiConnectionError> {
        let response = self.client.get(self.url("/")).send().await?;
        let status: StatusResponse = Self::decode(response).await?;
        Ok(status.message)
    }

    /// The whole catalog, in backend order.
    pub async fn fetch_all(&self) -> Result<Vec<Recipe>, ApiConnectionError> {
        let response = self.client.get(self.url(RECIPES_PATH)).send().await?;
        let recipes: Vec<Recipe> = Self::decode(response).await?;
        debug!(count = recipes.len(), "fetched recipe catalog");
        Ok(recipes)
    }

    /// There is no single-recipe endpoint: this fetches the full catalog and
    /// filters it, so every lookup costs a full catalog read. An id missing
    /// from the catalog is [`ApiConnectionError::NotFound`].
    pub async fn fetch_by_id(&self, id: &str) -> Result<Recipe, ApiConnectionError> {
        let recipes = self.fetch_all().await?;
        recipes
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| ApiConnectionError::NotFound(id.to_string()))
    }

    /// Catalog entries whose id is in `ids`, in catalog order. Ids with no
    /// catalog entry are dropped silently.
    pub async fn fetch_by_ids(&self, ids: &[String]) -> Result<Vec<Recipe>, ApiConnectionError> {
        let recipes = self.fetch_all().await?;
        Ok(recipes
            .into_iter()
            .filter(|r| ids.iter().any(|id| *id == r.id))
            .collect())
    }

    /// Asks the backend for one new recipe. Blank prompts are rejected before
    /// any request is made. Never retried.
    pub async fn generate(
        &self,
        prompt: &str,
        dietary: &[String],
        health: &[String],
    ) -> Result<Recipe, ApiConnectionError> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(ApiConnectionError::Validation(
                "prompt must not be empty".to_string(),
            ));
        }

        let request = GenerateRecipeRequest {
            prompt,
            dietary_preferences: dietary,
            health_conditions: health,
        };
        info!(prompt, dietary = ?dietary, health = ?health, "requesting recipe generation");

        let response = self
            .client
            .post(self.url(GENERATE_PATH))
            .json(&request)
            .send()
            .await?;
        let recipe: Recipe = Self::decode(response).await?;
        info!(recipe_id = %recipe.id, title = %recipe.title, "recipe generated");
        Ok(recipe)
    }

    pub async fn save(&self, recipe: &Recipe) -> Result<(), ApiConnectionError> {
        let response = self
            .client
            .post(self.url(SAVE_PATH))
            .json(&SaveRecipeRequest { recipe })
            .send()
            .await?;
        // The backend echoes the recipe back; only the status matters here.
        Self::check_status(response).await?;
        debug!(recipe_id = %recipe.id, "recipe saved to backend");
        Ok(())
    }

    async fn check_status(response: Response) -> Result<Response, ApiConnectionError> {
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        let detail = serde_json::from_str::<ErrorPayload>(&error_body)
            .ok()
            .and_then(|payload| payload.detail_text());
        warn!(%status, detail = ?detail, "backend returned an error");
        Err(ApiConnectionError::Server {
            status,
            detail,
            error_body,
        })
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: Response,
    ) -> Result<T, ApiConnectionError> {
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
