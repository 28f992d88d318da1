// LocalStorage: fund CSV files in a directory on disk.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;

use super::traits::{FundStorage, StorageInfo};
use super::validate_filename;

pub struct LocalStorage {
    data_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn path_for(&self, filename: &str) -> Result<PathBuf> {
        validate_filename(filename)?;
        Ok(self.data_dir.join(filename))
    }
}

#[async_trait]
impl FundStorage for LocalStorage {
    async fn list(&self) -> Result<Vec<String>> {
        // A data directory that doesn't exist yet just has no funds.
        if !tokio::fs::try_exists(&self.data_dir).await.unwrap_or(false) {
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(&self.data_dir)
            .await
            .with_context(|| format!("Failed to list {}", self.data_dir.display()))?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(".csv") {
                    files.push(name.to_string());
                }
            }
        }
        files.sort();
        Ok(files)
    }

    async fn read(&self, filename: &str) -> Result<String> {
        let path = self.path_for(filename)?;
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    async fn save(&self, filename: &str, content: &[u8]) -> Result<()> {
        let path = self.path_for(filename)?;
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.data_dir.display()))?;
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    async fn delete(&self, filename: &str) -> Result<()> {
        let path = self.path_for(filename)?;
        tokio::fs::remove_file(&path)
            .await
            .with_context(|| format!("Failed to delete {}", path.display()))
    }

    fn info(&self) -> StorageInfo {
        StorageInfo {
            storage_type: "local".to_string(),
            is_local: true,
            is_blob: false,
            data_dir: Some(self.data_dir.display().to_string()),
            has_blob_token: None,
        }
    }
}
