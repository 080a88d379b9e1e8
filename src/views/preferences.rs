use tracing::error;

use super::{AppContext, Notification, Route, ViewOutcome};
use crate::preferences::{Preferences, DIETARY_OPTIONS, HEALTH_OPTIONS};

pub const SAVED_MESSAGE: &str = "Preferences saved successfully!";
pub const SAVE_FAILED_MESSAGE: &str = "Failed to save preferences";

/// Editable copy of the stored preferences. Nothing is persisted until
/// [`PreferencesView::save`].
#[derive(Debug, Clone, Default)]
pub struct PreferencesView {
    pub draft: Preferences,
}

/// Case-insensitive lookup of an option's canonical spelling.
pub fn resolve_option(options: &[&'static str], input: &str) -> Option<&'static str> {
    let input = input.trim();
    options
        .iter()
        .copied()
        .find(|option| option.eq_ignore_ascii_case(input))
}

impl PreferencesView {
    pub fn load(ctx: &AppContext) -> Self {
        Self {
            draft: ctx.preferences.load(),
        }
    }

    pub fn toggle_dietary(&mut self, input: &str) -> ViewOutcome {
        match resolve_option(DIETARY_OPTIONS, input) {
            Some(option) => {
                self.draft.toggle_dietary(option);
                ViewOutcome::none()
            }
            None => ViewOutcome::notify(Notification::error(format!(
                "Unknown dietary option '{}'",
                input
            ))),
        }
    }

    pub fn toggle_health(&mut self, input: &str) -> ViewOutcome {
        match resolve_option(HEALTH_OPTIONS, input) {
            Some(option) => {
                self.draft.toggle_health(option);
                ViewOutcome::none()
            }
            None => ViewOutcome::notify(Notification::error(format!(
                "Unknown health option '{}'",
                input
            ))),
        }
    }

    pub fn is_dietary_selected(&self, option: &str) -> bool {
        self.draft.dietary.iter().any(|d| d == option)
    }

    pub fn is_health_selected(&self, option: &str) -> bool {
        self.draft.health.iter().any(|h| h == option)
    }

    /// Overwrites the stored record with the draft and heads back to the
    /// catalog.
    pub fn save(&self, ctx: &AppContext) -> ViewOutcome {
        match ctx.preferences.save(&self.draft) {
            Ok(()) => ViewOutcome::notify(Notification::success(SAVED_MESSAGE)).redirect_to(Route::Catalog),
            Err(e) => {
                error!(error = %e, "could not save preferences");
                ViewOutcome::notify(Notification::error(SAVE_FAILED_MESSAGE))
            }
        }
    }
}
