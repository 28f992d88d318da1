// Storage layer: where fund CSV files live.
//
// One trait, two backends. `from_config` picks the backend from STORAGE_TYPE
// so the rest of the app only ever sees `Arc<dyn FundStorage>`.

pub mod blob;
pub mod local;
pub mod traits;

use std::sync::Arc;

use anyhow::Result;

use crate::config::{Config, StorageBackend};

pub use blob::BlobStorage;
pub use local::LocalStorage;
pub use traits::{FundStorage, StorageInfo};

/// Build the storage backend selected by the config.
pub fn from_config(config: &Config) -> Result<Arc<dyn FundStorage>> {
    match config.storage_backend {
        StorageBackend::Local => Ok(Arc::new(LocalStorage::new(&config.data_dir))),
        StorageBackend::Blob => {
            config.require_blob()?;
            let token = config.blob_token.as_deref().unwrap_or_default();
            Ok(Arc::new(BlobStorage::new(&config.blob_api_url, token)?))
        }
    }
}

/// Reject file names that aren't a plain `.csv` name in the storage root.
pub fn validate_filename(filename: &str) -> Result<()> {
    if filename.trim().is_empty() {
        anyhow::bail!("File name is empty");
    }
    if !filename.ends_with(".csv") {
        anyhow::bail!("Only CSV files are allowed: {filename}");
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        anyhow::bail!("File name must not contain a path: {filename}");
    }
    Ok(())
}
