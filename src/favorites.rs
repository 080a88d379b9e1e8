use tracing::{debug, warn};

use crate::storage::{SharedStore, StorageError};

pub const FAVORITES_KEY: &str = "dishcovery_favorites";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
}

/// Recipe identifiers the user has marked, persisted as a JSON array under
/// [`FAVORITES_KEY`]. Identifiers are kept even if the recipe later vanishes
/// from the catalog.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    store: SharedStore,
}

impl FavoritesStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Current identifiers in insertion order. Unreadable or malformed
    /// content is treated as no favorites.
    pub fn list(&self) -> Vec<String> {
        let raw = match self.store.get(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "could not read stored favorites");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "stored favorites are malformed, starting empty");
            Vec::new()
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.list().iter().any(|fid| fid == id)
    }

    /// The only mutation: removes `id` if present, otherwise appends it.
    /// The full record is rewritten on every call.
    pub fn toggle(&self, id: &str) -> Result<ToggleOutcome, StorageError> {
        let mut favorites = self.list();
        let outcome = if favorites.iter().any(|fid| fid == id) {
            favorites.retain(|fid| fid != id);
            ToggleOutcome::Removed
        } else {
            favorites.push(id.to_string());
            ToggleOutcome::Added
        };

        self.store.set(FAVORITES_KEY, &serde_json::to_string(&favorites)?)?;
        debug!(recipe_id = id, ?outcome, total = favorites.len(), "toggled favorite");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn test_list_defaults_to_empty() {
        let favorites = FavoritesStore::new(Arc::new(MemoryStore::new()));
        assert!(favorites.list().is_empty());
        assert!(!favorites.contains("r1"));
    }

    #[test]
    fn test_toggle_adds_then_removes() -> Result<(), StorageError> {
        let favorites = FavoritesStore::new(Arc::new(MemoryStore::new()));
        assert_eq!(favorites.toggle("r1")?, ToggleOutcome::Added);
        assert!(favorites.contains("r1"));
        assert_eq!(favorites.toggle("r1")?, ToggleOutcome::Removed);
        assert!(!favorites.contains("r1"));
        Ok(())
    }

    #[test]
    fn test_double_toggle_restores_original() -> Result<(), StorageError> {
        let memory = Arc::new(MemoryStore::with_records([(FAVORITES_KEY, r#"["r1","r3"]"#)]));
        let favorites = FavoritesStore::new(memory.clone());
        let before = favorites.list();

        for id in ["r3", "r9"] {
            favorites.toggle(id)?;
            favorites.toggle(id)?;
            let mut after = favorites.list();
            let mut expected = before.clone();
            after.sort();
            expected.sort();
            assert_eq!(after, expected, "toggling {} twice changed the set", id);
        }
        Ok(())
    }

    #[test]
    fn test_toggle_removes_duplicate_entries() -> Result<(), StorageError> {
        // Externally edited record with a duplicate id.
        let memory = Arc::new(MemoryStore::with_records([(FAVORITES_KEY, r#"["r1","r2","r1"]"#)]));
        let favorites = FavoritesStore::new(memory.clone());
        assert_eq!(favorites.toggle("r1")?, ToggleOutcome::Removed);
        assert_eq!(memory.get(FAVORITES_KEY)?.as_deref(), Some(r#"["r2"]"#));
        Ok(())
    }

    #[test]
    fn test_malformed_record_is_empty_and_recoverable() -> Result<(), StorageError> {
        let memory = Arc::new(MemoryStore::with_records([(FAVORITES_KEY, "{oops")]));
        let favorites = FavoritesStore::new(memory);
        assert!(favorites.list().is_empty());
        assert_eq!(favorites.toggle("r5")?, ToggleOutcome::Added);
        assert_eq!(favorites.list(), vec!["r5".to_string()]);
        Ok(())
    }
}
