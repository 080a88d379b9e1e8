use std::fmt::{self, Write as _};

use super::catalog::{CATALOG_EMPTY_MESSAGE, EXAMPLE_PROMPTS};
use super::favorites::EMPTY_FAVORITES_MESSAGE;
use super::{CatalogView, DetailView, FavoritesView, Notification, NotificationLevel, PreferencesView};
use crate::api_connection::Recipe;
use crate::preferences::{DIETARY_OPTIONS, HEALTH_OPTIONS};

const RULE: &str = "----------------------------------------";

/// One-paragraph summary used by list screens.
pub fn recipe_card(recipe: &Recipe, index: usize) -> String {
    let mut card = format!("{:>2}. {}  [{}]\n", index + 1, recipe.title, recipe.id);
    if !recipe.description.is_empty() {
        let _ = writeln!(card, "    {}", recipe.description);
    }
    let meta = meta_line(recipe);
    if !meta.is_empty() {
        let _ = writeln!(card, "    {}", meta);
    }
    let tags = tag_line(recipe);
    if !tags.is_empty() {
        let _ = writeln!(card, "    {}", tags);
    }
    card
}

fn meta_line(recipe: &Recipe) -> String {
    [
        recipe.prep_time.as_deref().map(|t| format!("Prep: {}", t)),
        recipe.cook_time.as_deref().map(|t| format!("Cook: {}", t)),
        // The backend already includes the unit, e.g. "4 servings".
        recipe.servings.clone(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" | ")
}

fn tag_line(recipe: &Recipe) -> String {
    recipe
        .dietary_tags
        .iter()
        .chain(recipe.health_tags.iter())
        .map(|tag| format!("#{}", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_cards(f: &mut fmt::Formatter<'_>, recipes: &[Recipe]) -> fmt::Result {
    for (index, recipe) in recipes.iter().enumerate() {
        f.write_str(&recipe_card(recipe, index))?;
    }
    Ok(())
}

fn checkbox(selected: bool) -> &'static str {
    if selected {
        "[x]"
    } else {
        "[ ]"
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            NotificationLevel::Success => write!(f, "[ok] {}", self.message),
            NotificationLevel::Error => write!(f, "[error] {}", self.message),
        }
    }
}

impl fmt::Display for CatalogView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dishcovery")?;
        writeln!(f, "{}", RULE)?;
        if !self.preferences.is_empty() {
            let active: Vec<&str> = self.preferences.all_tags().collect();
            writeln!(f, "Active preferences: {}", active.join(", "))?;
        }
        if !self.prompt.is_empty() {
            writeln!(f, "Prompt: {}", self.prompt)?;
        }
        writeln!(f, "Try: {}", EXAMPLE_PROMPTS.join(" | "))?;
        writeln!(f)?;

        if self.shows_empty_state() {
            return writeln!(f, "{}", CATALOG_EMPTY_MESSAGE);
        }
        writeln!(f, "Recent Recipes")?;
        write_cards(f, &self.recipes)
    }
}

impl fmt::Display for DetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(recipe) = &self.recipe else {
            return writeln!(f, "Loading recipe {}...", self.id);
        };

        writeln!(f, "{}", recipe.title)?;
        writeln!(f, "{}", RULE)?;
        if !recipe.description.is_empty() {
            writeln!(f, "{}", recipe.description)?;
        }
        let meta = meta_line(recipe);
        if !meta.is_empty() {
            writeln!(f, "{}", meta)?;
        }
        let tags = tag_line(recipe);
        if !tags.is_empty() {
            writeln!(f, "{}", tags)?;
        }
        writeln!(
            f,
            "{}",
            if self.is_favorite { "Saved" } else { "Save to Favorites" }
        )?;

        writeln!(f, "\nIngredients")?;
        for ingredient in &recipe.ingredients {
            writeln!(f, "  - {}", ingredient)?;
        }
        writeln!(f, "\nInstructions")?;
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            writeln!(f, "  {}. {}", step + 1, instruction)?;
        }
        Ok(())
    }
}

impl fmt::Display for FavoritesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Favorites")?;
        writeln!(f, "{}", RULE)?;
        if self.shows_empty_state() {
            writeln!(f, "{}", EMPTY_FAVORITES_MESSAGE)?;
            return writeln!(f, "Start exploring recipes and save your favorites here!");
        }
        write_cards(f, &self.recipes)
    }
}

impl fmt::Display for PreferencesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Your Preferences")?;
        writeln!(f, "{}", RULE)?;
        writeln!(f, "Dietary")?;
        for option in DIETARY_OPTIONS {
            writeln!(f, "  {} {}", checkbox(self.is_dietary_selected(option)), option)?;
        }
        writeln!(f, "Health")?;
        for option in HEALTH_OPTIONS {
            writeln!(f, "  {} {}", checkbox(self.is_health_selected(option)), option)?;
        }
        Ok(())
    }
}
