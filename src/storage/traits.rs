// Storage trait: backend-agnostic async interface for fund CSV files.
//
// Implementors: LocalStorage (a directory on disk), BlobStorage (remote blob
// store over HTTP). All methods are async so both fit behind a single
// `Arc<dyn FundStorage>`.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Describes the active backend for GET /api/storage/info.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageInfo {
    pub storage_type: String,
    pub is_local: bool,
    pub is_blob: bool,
    pub data_dir: Option<String>,
    pub has_blob_token: Option<bool>,
}

#[async_trait]
pub trait FundStorage: Send + Sync {
    /// Names of all stored `.csv` files, sorted.
    async fn list(&self) -> Result<Vec<String>>;

    /// Read one file as text.
    async fn read(&self, filename: &str) -> Result<String>;

    /// Store a file, replacing any existing one with the same name.
    async fn save(&self, filename: &str, content: &[u8]) -> Result<()>;

    /// Remove a file.
    async fn delete(&self, filename: &str) -> Result<()>;

    fn info(&self) -> StorageInfo;
}
