// BlobStorage: fund CSV files in a remote blob store (Vercel Blob API).
//
// Files live under a `data/` pathname prefix. Listing returns blob metadata
// including a download URL; reads resolve the blob by pathname first, then
// fetch its content. Every request carries the read-write token as a bearer
// header.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::traits::{FundStorage, StorageInfo};
use super::validate_filename;

/// Pathname prefix for fund files inside the store.
pub const BLOB_PREFIX: &str = "data/";

/// One entry from the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BlobEntry {
    pub pathname: String,
    pub url: String,
    #[serde(rename = "downloadUrl")]
    pub download_url: Option<String>,
}

/// Response from the list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BlobListResponse {
    #[serde(default)]
    pub blobs: Vec<BlobEntry>,
}

pub struct BlobStorage {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

impl BlobStorage {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("fundlens/0.1")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    async fn list_blobs(&self, prefix: &str) -> Result<Vec<BlobEntry>> {
        let response = self
            .client
            .get(&self.api_url)
            .bearer_auth(&self.token)
            .query(&[("prefix", prefix), ("limit", "1000")])
            .send()
            .await
            .context("Blob list request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Blob list returned {}: {}", status, body);
        }

        let list = response
            .json::<BlobListResponse>()
            .await
            .context("Failed to parse blob list response")?;
        Ok(list.blobs)
    }

    async fn find_blob(&self, filename: &str) -> Result<BlobEntry> {
        let pathname = format!("{BLOB_PREFIX}{filename}");
        self.list_blobs(&pathname)
            .await?
            .into_iter()
            .find(|b| b.pathname == pathname)
            .with_context(|| format!("Blob {pathname} not found"))
    }
}

#[async_trait]
impl FundStorage for BlobStorage {
    async fn list(&self) -> Result<Vec<String>> {
        let mut files: Vec<String> = self
            .list_blobs(BLOB_PREFIX)
            .await?
            .into_iter()
            .filter_map(|b| csv_filename(&b.pathname).map(str::to_string))
            .collect();
        files.sort();
        Ok(files)
    }

    async fn read(&self, filename: &str) -> Result<String> {
        validate_filename(filename)?;
        let blob = self.find_blob(filename).await?;
        let url = blob.download_url.as_deref().unwrap_or(&blob.url);
        debug!(filename, url, "Downloading blob");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Blob download failed")?;

        if !response.status().is_success() {
            anyhow::bail!("Blob download returned {}", response.status());
        }

        response.text().await.context("Failed to read blob body")
    }

    async fn save(&self, filename: &str, content: &[u8]) -> Result<()> {
        validate_filename(filename)?;
        let url = format!("{}/{BLOB_PREFIX}{filename}", self.api_url);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::CONTENT_TYPE, "text/csv")
            // Overwrite in place so re-uploads keep the same pathname.
            .header("x-add-random-suffix", "0")
            .body(content.to_vec())
            .send()
            .await
            .context("Blob upload request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Blob upload returned {}: {}", status, body);
        }
        Ok(())
    }

    async fn delete(&self, filename: &str) -> Result<()> {
        validate_filename(filename)?;
        let blob = self.find_blob(filename).await?;

        let response = self
            .client
            .post(format!("{}/delete", self.api_url))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "urls": [blob.url] }))
            .send()
            .await
            .context("Blob delete request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Blob delete returned {}: {}", status, body);
        }
        Ok(())
    }

    fn info(&self) -> StorageInfo {
        StorageInfo {
            storage_type: "vercel_blob".to_string(),
            is_local: false,
            is_blob: true,
            data_dir: None,
            has_blob_token: Some(!self.token.is_empty()),
        }
    }
}

/// `data/fund.csv` → `fund.csv`; anything outside the prefix or not a CSV
/// is ignored.
fn csv_filename(pathname: &str) -> Option<&str> {
    pathname
        .strip_prefix(BLOB_PREFIX)
        .filter(|name| name.ends_with(".csv") && !name.contains('/'))
}
