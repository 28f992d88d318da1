// Per-fund summary: sector allocation, largest holdings, largest sectors.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::holdings::MutualFund;

/// How many holdings the summary lists.
pub const TOP_HOLDINGS: usize = 10;
/// How many sectors the summary lists.
pub const TOP_SECTORS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopHolding {
    pub company_name: String,
    pub weight: f64,
    pub sector: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundSummary {
    pub name: String,
    pub total_stocks: usize,
    pub sector_allocation: BTreeMap<String, f64>,
    pub top_holdings: Vec<TopHolding>,
    /// `(sector, weight)` pairs; serialized as two-element arrays.
    pub top_sectors: Vec<(String, f64)>,
}

/// Summarize a fund.
///
/// Both rankings use a stable sort, so equal weights keep parse order
/// (holdings) or first-appearance order (sectors).
pub fn summarize(fund: &MutualFund) -> FundSummary {
    let mut holdings: Vec<_> = fund.holdings().iter().collect();
    holdings.sort_by(|a, b| b.portfolio_weight.total_cmp(&a.portfolio_weight));
    let top_holdings = holdings
        .into_iter()
        .take(TOP_HOLDINGS)
        .map(|h| TopHolding {
            company_name: h.company_name.clone(),
            weight: h.portfolio_weight,
            sector: h.sector.clone(),
        })
        .collect();

    let mut top_sectors = fund.sector_weights();
    top_sectors.sort_by(|a, b| b.1.total_cmp(&a.1));
    top_sectors.truncate(TOP_SECTORS);

    FundSummary {
        name: fund.name.clone(),
        total_stocks: fund.total_stocks(),
        sector_allocation: fund.sector_allocation(),
        top_holdings,
        top_sectors,
    }
}
