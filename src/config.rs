use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Default blob store endpoint (Vercel Blob).
pub const DEFAULT_BLOB_API_URL: &str = "https://blob.vercel-storage.com";

/// Which storage backend holds the fund CSV files.
#[derive(Debug, Clone, PartialEq)]
pub enum StorageBackend {
    /// Local directory (default): DATA_DIR
    Local,
    /// Remote blob store: requires BLOB_READ_WRITE_TOKEN
    Blob,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Local => "local",
            StorageBackend::Blob => "vercel_blob",
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    pub storage_backend: StorageBackend,
    /// Directory of fund CSV files for the local backend.
    pub data_dir: PathBuf,
    /// Bearer token for the blob backend.
    pub blob_token: Option<String>,
    pub blob_api_url: String,
    pub port: u16,
    pub bind: String,
    /// Request body cap for POST /api/upload.
    pub max_upload_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_backend: StorageBackend::Local,
            data_dir: PathBuf::from("./data"),
            blob_token: None,
            blob_api_url: DEFAULT_BLOB_API_URL.to_string(),
            port: 5000,
            bind: "127.0.0.1".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; unset or unparsable values fall back to it.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let storage_backend = match env::var("STORAGE_TYPE").as_deref() {
            Ok("blob") | Ok("vercel_blob") => StorageBackend::Blob,
            // "local" or unset both default to the local directory
            _ => StorageBackend::Local,
        };

        Ok(Self {
            storage_backend,
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            blob_token: env::var("BLOB_READ_WRITE_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            blob_api_url: env::var("BLOB_API_URL").unwrap_or(defaults.blob_api_url),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            bind: env::var("BIND").unwrap_or(defaults.bind),
            max_upload_bytes: env::var("FUNDLENS_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(defaults.max_upload_bytes),
        })
    }

    /// Check that the blob backend has a token.
    /// Call this before building storage when STORAGE_TYPE selects blob.
    pub fn require_blob(&self) -> Result<()> {
        if self.storage_backend == StorageBackend::Blob && self.blob_token.is_none() {
            anyhow::bail!(
                "STORAGE_TYPE is blob but BLOB_READ_WRITE_TOKEN is not set.\n\
                 Add it to your .env file, or set STORAGE_TYPE=local."
            );
        }
        Ok(())
    }
}
