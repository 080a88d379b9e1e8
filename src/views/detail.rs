use tracing::{error, warn};

use super::{AppContext, Notification, Route, ViewOutcome};
use crate::api_connection::{ApiConnectionError, Recipe};
use crate::favorites::ToggleOutcome;

pub const NOT_FOUND_MESSAGE: &str = "Recipe not found";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load recipe";
pub const ADDED_MESSAGE: &str = "Added to favorites";
pub const REMOVED_MESSAGE: &str = "Removed from favorites";
pub const FAVORITE_FAILED_MESSAGE: &str = "Could not update favorites";

#[derive(Debug, Clone)]
pub struct DetailView {
    pub id: String,
    /// `None` while loading, which is also where a failed fetch leaves it.
    pub recipe: Option<Recipe>,
    pub is_favorite: bool,
}

impl DetailView {
    pub async fn load(ctx: &AppContext, id: &str) -> (Self, ViewOutcome) {
        let mut view = Self {
            id: id.to_string(),
            recipe: None,
            is_favorite: ctx.favorites.contains(id),
        };

        let outcome = match ctx.api.fetch_by_id(id).await {
            Ok(recipe) => {
                view.recipe = Some(recipe);
                ViewOutcome::none()
            }
            Err(ApiConnectionError::NotFound(_)) => {
                warn!(recipe_id = id, "recipe not in catalog, redirecting");
                ViewOutcome::notify(Notification::error(NOT_FOUND_MESSAGE)).redirect_to(Route::Catalog)
            }
            Err(e) => {
                error!(recipe_id = id, error = %e, "error loading recipe");
                ViewOutcome::notify(Notification::error(LOAD_FAILED_MESSAGE))
            }
        };
        (view, outcome)
    }

    /// Flips the favorite flag locally first. When the recipe was just added
    /// it is also pushed to the backend; that call can fail without undoing
    /// the local change.
    pub async fn toggle_favorite(&mut self, ctx: &AppContext) -> ViewOutcome {
        let outcome = match ctx.favorites.toggle(&self.id) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!(recipe_id = %self.id, error = %e, "could not persist favorite");
                return ViewOutcome::notify(Notification::error(FAVORITE_FAILED_MESSAGE));
            }
        };

        match outcome {
            ToggleOutcome::Removed => {
                self.is_favorite = false;
                ViewOutcome::notify(Notification::success(REMOVED_MESSAGE))
            }
            ToggleOutcome::Added => {
                self.is_favorite = true;
                if let Some(recipe) = &self.recipe {
                    if let Err(e) = ctx.api.save(recipe).await {
                        error!(recipe_id = %self.id, error = %e, "error saving recipe");
                    }
                }
                ViewOutcome::notify(Notification::success(ADDED_MESSAGE))
            }
        }
    }
}
