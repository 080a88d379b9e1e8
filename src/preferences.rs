use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::storage::{SharedStore, StorageError};

pub const PREFERENCES_KEY: &str = "dishcovery_preferences";

pub const DIETARY_OPTIONS: &[&str] = &[
    "Vegan",
    "Vegetarian",
    "Gluten-Free",
    "Dairy-Free",
    "Nut-Free",
    "Keto",
    "Paleo",
    "Pescatarian",
    "Halal",
    "Kosher",
];

pub const HEALTH_OPTIONS: &[&str] = &[
    "Diabetes-Friendly",
    "Low Sodium",
    "Heart Healthy",
    "High Blood Pressure",
    "Low Cholesterol",
    "Low Sugar",
    "High Protein",
    "Low Carb",
    "Weight Management",
];

/// The user's dietary and health selections. Both lists behave as sets:
/// toggling never introduces duplicates.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default)]
    pub dietary: Vec<String>,
    #[serde(default)]
    pub health: Vec<String>,
}

impl Preferences {
    pub fn is_empty(&self) -> bool {
        self.dietary.is_empty() && self.health.is_empty()
    }

    /// Returns true when the option is selected after the toggle.
    pub fn toggle_dietary(&mut self, option: &str) -> bool {
        toggle_member(&mut self.dietary, option)
    }

    pub fn toggle_health(&mut self, option: &str) -> bool {
        toggle_member(&mut self.health, option)
    }

    /// Dietary selections followed by health selections, for tag display.
    pub fn all_tags(&self) -> impl Iterator<Item = &str> {
        self.dietary
            .iter()
            .chain(self.health.iter())
            .map(String::as_str)
    }
}

fn toggle_member(values: &mut Vec<String>, option: &str) -> bool {
    if values.iter().any(|v| v == option) {
        values.retain(|v| v != option);
        false
    } else {
        values.push(option.to_string());
        true
    }
}

/// Persists a single [`Preferences`] record under [`PREFERENCES_KEY`].
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    store: SharedStore,
}

impl PreferenceStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Never fails: an absent, unreadable or malformed record loads as the
    /// empty default. Contents are not checked against the option lists.
    pub fn load(&self) -> Preferences {
        let raw = match self.store.get(PREFERENCES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Preferences::default(),
            Err(e) => {
                warn!(error = %e, "could not read stored preferences, using defaults");
                return Preferences::default();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "stored preferences are malformed, using defaults");
            Preferences::default()
        })
    }

    pub fn save(&self, prefs: &Preferences) -> Result<(), StorageError> {
        let serialized = serde_json::to_string(prefs)?;
        self.store.set(PREFERENCES_KEY, &serialized)
    }
}
