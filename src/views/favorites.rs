use tracing::{debug, error};

use super::AppContext;
use crate::api_connection::Recipe;

pub const EMPTY_FAVORITES_MESSAGE: &str = "No favorites yet";

#[derive(Debug, Clone, Default)]
pub struct FavoritesView {
    pub recipes: Vec<Recipe>,
}

impl FavoritesView {
    /// Favorites that still exist in the catalog. With no stored favorites
    /// the catalog is not fetched at all.
    pub async fn load(ctx: &AppContext) -> Self {
        let ids = ctx.favorites.list();
        if ids.is_empty() {
            return Self::default();
        }

        match ctx.api.fetch_by_ids(&ids).await {
            Ok(recipes) => {
                if recipes.len() < ids.len() {
                    debug!(
                        stored = ids.len(),
                        shown = recipes.len(),
                        "some favorites are no longer in the catalog"
                    );
                }
                Self { recipes }
            }
            Err(e) => {
                error!(error = %e, "error loading favorites");
                Self::default()
            }
        }
    }

    /// Driven by what survived filtering, not by the stored id list.
    pub fn shows_empty_state(&self) -> bool {
        self.recipes.is_empty()
    }
}
