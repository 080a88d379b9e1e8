use tracing::{error, warn};

use super::{AppContext, Notification, ViewOutcome};
use crate::api_connection::{ApiConnectionError, Recipe};
use crate::preferences::Preferences;

pub const EXAMPLE_PROMPTS: &[&str] = &[
    "Healthy dinner",
    "Vegan breakfast",
    "Quick lunch",
    "Comfort food",
    "Low carb dinner",
];

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter what you'd like to cook";
pub const GENERATED_MESSAGE: &str = "Recipe generated successfully!";
pub const CATALOG_EMPTY_MESSAGE: &str = "Start by telling us what you'd like to cook today!";

/// The default screen: prompt box, active preferences and recent recipes.
#[derive(Debug, Clone, Default)]
pub struct CatalogView {
    pub prompt: String,
    pub recipes: Vec<Recipe>,
    pub preferences: Preferences,
}

impl CatalogView {
    /// Reads stored preferences and the catalog. A failed catalog fetch is
    /// logged and leaves the list empty.
    pub async fn load(ctx: &AppContext) -> Self {
        let preferences = ctx.preferences.load();
        let recipes = match ctx.api.fetch_all().await {
            Ok(recipes) => recipes,
            Err(e) => {
                warn!(error = %e, "could not load recipes");
                Vec::new()
            }
        };

        Self {
            prompt: String::new(),
            recipes,
            preferences,
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    /// Picks one of [`EXAMPLE_PROMPTS`] by position.
    pub fn use_example(&mut self, index: usize) -> bool {
        match EXAMPLE_PROMPTS.get(index) {
            Some(example) => {
                self.prompt = (*example).to_string();
                true
            }
            None => false,
        }
    }

    /// Generates a recipe from the current prompt and preferences. On success
    /// the recipe goes to the front of the list and the prompt is cleared; on
    /// failure the prompt is kept so the user can retry by hand.
    pub async fn generate(&mut self, ctx: &AppContext) -> ViewOutcome {
        let result = ctx
            .api
            .generate(&self.prompt, &self.preferences.dietary, &self.preferences.health)
            .await;

        match result {
            Ok(recipe) => {
                self.recipes.insert(0, recipe);
                self.prompt.clear();
                ViewOutcome::notify(Notification::success(GENERATED_MESSAGE))
            }
            Err(ApiConnectionError::Validation(_)) => {
                ViewOutcome::notify(Notification::error(EMPTY_PROMPT_MESSAGE))
            }
            Err(e) => {
                error!(error = %e, "error generating recipe");
                let failure = e.generation_failure();
                ViewOutcome::notify(Notification::error(failure.user_message()))
            }
        }
    }

    pub fn shows_empty_state(&self) -> bool {
        self.recipes.is_empty()
    }
}
