use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Storage Manager for the small local documents (favorites, login session).
/// Each key is persisted as `<data_dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct StorageManager {
    data_dir: PathBuf,
}

impl StorageManager {
    pub fn new() -> Result<Self> {
        let data_dir = default_data_dir()?;
        Self::at(data_dir)
    }

    /// Storage rooted at an explicit directory, created if missing
    pub fn at(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory {}", data_dir.display())
        })?;

        Ok(Self { data_dir })
    }

    /// Reads a document; a missing file is `Ok(None)`
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let path = self.document_path(key);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read document {}", key))?;
        let value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse document {}", key))?;
        Ok(Some(value))
    }

    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let content = serde_json::to_string_pretty(value)
            .with_context(|| format!("Failed to serialize document {}", key))?;
        fs::write(self.document_path(key), content)
            .with_context(|| format!("Failed to write document {}", key))?;
        debug!(key, "saved local document");
        Ok(())
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.document_path(key);
        if path.exists() {
            fs::remove_file(path).with_context(|| format!("Failed to delete document {}", key))?;
        }
        Ok(())
    }

    pub fn data_directory(&self) -> &Path {
        &self.data_dir
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    Ok(dirs::data_dir()
        .context("Failed to get data directory")?
        .join("recipebox"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        favorites: Vec<String>,
    }

    #[test]
    fn missing_document_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::at(dir.path()).unwrap();
        let doc: Option<Doc> = storage.load("nothing").unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn saved_document_is_read_back_and_removed() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::at(dir.path().join("nested")).unwrap();
        let doc = Doc {
            favorites: vec!["a".into(), "b".into()],
        };

        storage.save("store", &doc).unwrap();
        assert_eq!(storage.load::<Doc>("store").unwrap(), Some(doc));

        storage.remove("store").unwrap();
        assert_eq!(storage.load::<Doc>("store").unwrap(), None);
        storage.remove("store").unwrap();
    }

    #[test]
    fn corrupt_document_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::at(dir.path()).unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        assert!(storage.load::<Doc>("bad").is_err());
    }
}
