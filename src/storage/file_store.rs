use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use super::{validate_key, KeyValueStore, StorageError};

const RECORD_EXTENSION: &str = "json";

/// One file per key under a root directory: `<root>/<key>.json`.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader sees either the previous record or the new one, never a torn write.
/// There is no cross-process locking; concurrent writers are last-write-wins.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.{}", key, RECORD_EXTENSION))
    }

    fn io_error(key: &str, source: std::io::Error) -> StorageError {
        StorageError::Io {
            key: key.to_string(),
            source,
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        match fs::read_to_string(self.record_path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        fs::create_dir_all(&self.root).map_err(|e| Self::io_error(key, e))?;

        // Each write stages into its own uniquely named file in the same
        // directory, so the final rename is atomic and writers never share
        // a staging file.
        let target = self.record_path(key);
        let mut staging = NamedTempFile::new_in(&self.root).map_err(|e| Self::io_error(key, e))?;
        staging
            .write_all(value.as_bytes())
            .map_err(|e| Self::io_error(key, e))?;
        staging
            .persist(&target)
            .map_err(|e| Self::io_error(key, e.error))?;

        debug!(path = %target.display(), bytes = value.len(), "wrote record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_missing_record_is_none() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("dishcovery_favorites")?, None);
        Ok(())
    }

    #[test]
    fn test_set_then_get() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path());
        store.set("dishcovery_favorites", r#"["r1","r2"]"#)?;
        assert_eq!(
            store.get("dishcovery_favorites")?.as_deref(),
            Some(r#"["r1","r2"]"#)
        );

        store.set("dishcovery_favorites", "[]")?;
        assert_eq!(store.get("dishcovery_favorites")?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn test_creates_root_on_first_write() -> Result<()> {
        let dir = tempdir()?;
        let nested = dir.path().join("a").join("b");
        let store = FileStore::new(&nested);
        store.set("key", "value")?;
        assert!(nested.join("key.json").exists());
        // No staging file left behind after the rename.
        assert_eq!(fs::read_dir(&nested)?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_concurrent_writers_never_tear_a_record() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path());
        let records: Vec<String> = (0..8)
            .map(|n| format!("[{}]", vec![format!("\"writer-{}\"", n); 200].join(",")))
            .collect();

        std::thread::scope(|scope| {
            for record in &records {
                let store = store.clone();
                scope.spawn(move || {
                    for _ in 0..20 {
                        store.set("dishcovery_favorites", record).expect("write failed");
                    }
                });
            }
        });

        // Last write wins, but whatever won is one complete record.
        let stored = store.get("dishcovery_favorites")?.unwrap_or_default();
        assert!(records.contains(&stored));
        assert_eq!(fs::read_dir(dir.path())?.count(), 1);
        Ok(())
    }

    #[test]
    fn test_rejects_path_like_keys() -> Result<()> {
        let dir = tempdir()?;
        let store = FileStore::new(dir.path());
        let result = store.set("../escape", "x");
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
        Ok(())
    }
}
