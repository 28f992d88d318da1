// Fund catalog: discovery, caching, and loading of funds from storage.
//
// A fund's id and display name both derive from its file name:
//   "axis_bluechip_fund.csv" → id "axis-bluechip-fund", name "Axis Bluechip Fund"
//
// Parsed funds are memoized in a FundCache owned by the repository. Uploads
// clear the whole cache so a re-uploaded fund is read again; deletes drop
// the one entry.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::analysis::{compare_funds, summarize, FundSummary, OverlapAnalysis};
use crate::holdings::loader::{detect_layout, parse_fund, LoadError};
use crate::holdings::MutualFund;
use crate::storage::{validate_filename, FundStorage, StorageInfo};

/// A fund available in storage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundEntry {
    pub id: String,
    pub name: String,
    pub file: String,
}

impl FundEntry {
    pub fn from_filename(filename: &str) -> Self {
        let stem = filename.strip_suffix(".csv").unwrap_or(filename);
        Self {
            id: stem.replace('_', "-"),
            name: title_case(&stem.replace('_', " ")),
            file: filename.to_string(),
        }
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[derive(Debug, Error)]
pub enum FundError {
    #[error("Fund {0} not found")]
    NotFound(String),

    #[error("Could not read fund data for {id}: {reason}")]
    Unreadable { id: String, reason: anyhow::Error },

    #[error("Could not parse fund data for {id}: {source}")]
    Unparsable {
        id: String,
        #[source]
        source: LoadError,
    },

    #[error("Rejected upload: {0}")]
    InvalidUpload(String),

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// In-memory cache of parsed funds keyed by fund id.
///
/// Every `invalidate` or `clear` bumps a generation counter. A loader takes
/// the generation before reading storage and stores its result with
/// `insert_if_current`, which refuses the insert if the cache was
/// invalidated in between.
#[derive(Default)]
pub struct FundCache {
    state: RwLock<CacheState>,
}

#[derive(Default)]
struct CacheState {
    funds: HashMap<String, Arc<MutualFund>>,
    generation: u64,
}

impl FundCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn get(&self, id: &str) -> Option<Arc<MutualFund>> {
        self.state.read().await.funds.get(id).cloned()
    }

    pub async fn generation(&self) -> u64 {
        self.state.read().await.generation
    }

    pub async fn insert(&self, id: &str, fund: Arc<MutualFund>) {
        self.state.write().await.funds.insert(id.to_string(), fund);
    }

    /// Insert only if no invalidation happened since `generation` was read.
    pub async fn insert_if_current(
        &self,
        id: &str,
        fund: Arc<MutualFund>,
        generation: u64,
    ) -> bool {
        let mut state = self.state.write().await;
        if state.generation != generation {
            return false;
        }
        state.funds.insert(id.to_string(), fund);
        true
    }

    pub async fn invalidate(&self, id: &str) {
        let mut state = self.state.write().await;
        state.funds.remove(id);
        state.generation += 1;
    }

    pub async fn clear(&self) {
        let mut state = self.state.write().await;
        state.funds.clear();
        state.generation += 1;
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.funds.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Overlap plus both summaries: the body of a compare response.
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub overlap: OverlapAnalysis,
    pub fund1: FundSummary,
    pub fund2: FundSummary,
}

/// Loads funds from storage through the cache.
pub struct FundRepository {
    storage: Arc<dyn FundStorage>,
    cache: FundCache,
}

impl FundRepository {
    pub fn new(storage: Arc<dyn FundStorage>) -> Self {
        Self {
            storage,
            cache: FundCache::new(),
        }
    }

    pub fn cache(&self) -> &FundCache {
        &self.cache
    }

    pub fn storage_info(&self) -> StorageInfo {
        self.storage.info()
    }

    /// All funds currently in storage.
    pub async fn list_funds(&self) -> Result<Vec<FundEntry>, FundError> {
        let files = self.storage.list().await?;
        Ok(files.iter().map(|f| FundEntry::from_filename(f)).collect())
    }

    async fn find_entry(&self, id: &str) -> Result<FundEntry, FundError> {
        self.list_funds()
            .await?
            .into_iter()
            .find(|e| e.id == id)
            .ok_or_else(|| FundError::NotFound(id.to_string()))
    }

    /// Load a fund by id, from the cache when possible.
    pub async fn get_fund(&self, id: &str) -> Result<Arc<MutualFund>, FundError> {
        if let Some(fund) = self.cache.get(id).await {
            debug!(fund_id = %id, "Fund cache hit");
            return Ok(fund);
        }

        let generation = self.cache.generation().await;
        let entry = self.find_entry(id).await?;
        let text = self
            .storage
            .read(&entry.file)
            .await
            .map_err(|reason| FundError::Unreadable {
                id: id.to_string(),
                reason,
            })?;

        let load = parse_fund(&text, &entry.name).map_err(|source| FundError::Unparsable {
            id: id.to_string(),
            source,
        })?;

        info!(
            fund_id = %id,
            layout = load.layout.label,
            holdings = load.fund.total_stocks(),
            skipped = load.skipped.len(),
            "Loaded fund"
        );

        let fund = Arc::new(load.fund);
        if !self.cache.insert_if_current(id, fund.clone(), generation).await {
            debug!(fund_id = %id, "Cache invalidated during load, not caching");
        }
        Ok(fund)
    }

    pub async fn summary(&self, id: &str) -> Result<FundSummary, FundError> {
        let fund = self.get_fund(id).await?;
        Ok(summarize(&fund))
    }

    /// Compare two stored funds.
    pub async fn compare(&self, id1: &str, id2: &str) -> Result<Comparison, FundError> {
        let fund1 = self.get_fund(id1).await?;
        let fund2 = self.get_fund(id2).await?;
        Ok(Comparison {
            overlap: compare_funds(&fund1, &fund2),
            fund1: summarize(&fund1),
            fund2: summarize(&fund2),
        })
    }

    /// Store a new fund file. The content must be UTF-8 in a recognized
    /// layout. Clears the cache on success.
    pub async fn upload(&self, filename: &str, content: &[u8]) -> Result<FundEntry, FundError> {
        validate_filename(filename).map_err(|e| FundError::InvalidUpload(e.to_string()))?;

        let text = std::str::from_utf8(content)
            .map_err(|_| FundError::InvalidUpload("file is not valid UTF-8".to_string()))?;
        detect_layout(text).map_err(|e| FundError::InvalidUpload(e.to_string()))?;

        self.storage.save(filename, content).await?;
        self.cache.clear().await;

        let entry = FundEntry::from_filename(filename);
        info!(fund_id = %entry.id, bytes = content.len(), "Uploaded fund");
        Ok(entry)
    }

    /// Remove a fund from storage and drop it from the cache.
    pub async fn delete(&self, id: &str) -> Result<(), FundError> {
        let entry = self.find_entry(id).await?;
        self.storage.delete(&entry.file).await?;
        self.cache.invalidate(id).await;
        info!(fund_id = %id, "Deleted fund");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_from_filename() {
        let entry = FundEntry::from_filename("axis_bluechip_fund.csv");
        assert_eq!(entry.id, "axis-bluechip-fund");
        assert_eq!(entry.name, "Axis Bluechip Fund");
        assert_eq!(entry.file, "axis_bluechip_fund.csv");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("HDFC flexi cap"), "Hdfc Flexi Cap");
        assert_eq!(title_case("parag parikh 2024"), "Parag Parikh 2024");
        assert_eq!(title_case("nifty50index"), "Nifty50Index");
    }

    #[tokio::test]
    async fn test_cache_insert_invalidate() {
        let cache = FundCache::new();
        assert!(cache.is_empty().await);

        cache
            .insert("a", Arc::new(MutualFund::new("A", vec![])))
            .await;
        assert!(cache.get("a").await.is_some());

        cache.invalidate("a").await;
        assert!(cache.get("a").await.is_none());
    }

    #[tokio::test]
    async fn test_insert_if_current_rejects_after_clear() {
        let cache = FundCache::new();
        let generation = cache.generation().await;
        let fund = Arc::new(MutualFund::new("A", vec![]));

        cache.clear().await;
        assert!(!cache.insert_if_current("a", fund.clone(), generation).await);
        assert!(cache.get("a").await.is_none());

        let generation = cache.generation().await;
        assert!(cache.insert_if_current("a", fund, generation).await);
        assert!(cache.get("a").await.is_some());
    }
}
