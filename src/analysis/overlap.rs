// Pairwise portfolio overlap between two funds.
//
// Holdings are matched on their normalized name (see holdings::normalize).
// For each stock both funds hold, we take the minimum of the two weights;
// summed across common stocks this is the weighted overlap, roughly the
// share of a combined portfolio that is duplicated:
//
//   weighted_overlap = sum(min(weight_1, weight_2))
//
// The count-based overlap percentage is |common| / |union| * 100 over the
// normalized keys, and the diversification score is its complement.
//
// Display name and sector of a common stock always come from fund 1, so
// comparing (A, B) and (B, A) gives the same numbers but can label and bucket
// stocks differently.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::holdings::{normalize, MutualFund, StockHolding};

/// One stock held by both funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommonStock {
    pub company_name: String,
    pub fund1_weight: f64,
    pub fund2_weight: f64,
    pub min_weight: f64,
    pub sector: String,
    pub fund1_return: Option<f64>,
    pub fund2_return: Option<f64>,
}

/// Common holdings aggregated by sector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorOverlap {
    pub count: usize,
    pub fund1_weight: f64,
    pub fund2_weight: f64,
}

/// Result of comparing two funds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapAnalysis {
    pub fund1_name: String,
    pub fund2_name: String,
    /// Sorted by `min_weight` descending.
    pub common_stocks: Vec<CommonStock>,
    pub overlap_percentage: f64,
    pub weighted_overlap: f64,
    pub common_stocks_count: usize,
    pub fund1_unique_count: usize,
    pub fund2_unique_count: usize,
    pub sector_overlap: BTreeMap<String, SectorOverlap>,
    pub diversification_score: f64,
}

/// Compare two funds.
///
/// Never fails: an empty fund simply produces no common stocks, and two
/// empty funds report 0% overlap rather than dividing by zero.
pub fn compare_funds(fund1: &MutualFund, fund2: &MutualFund) -> OverlapAnalysis {
    let keyed1 = keyed_holdings(fund1);
    let keyed2 = keyed_holdings(fund2);

    let mut common_stocks = Vec::new();
    let mut sector_overlap: BTreeMap<String, SectorOverlap> = BTreeMap::new();
    let mut weighted_overlap = 0.0;

    // BTreeMap iteration gives normalized-key order, which is also the
    // tie-break order once sorted by min_weight.
    for (key, h1) in &keyed1 {
        let Some(h2) = keyed2.get(key) else {
            continue;
        };

        let min_weight = h1.portfolio_weight.min(h2.portfolio_weight);
        weighted_overlap += min_weight;

        common_stocks.push(CommonStock {
            company_name: h1.company_name.clone(),
            fund1_weight: h1.portfolio_weight,
            fund2_weight: h2.portfolio_weight,
            min_weight,
            sector: h1.sector.clone(),
            fund1_return: h1.one_year_return,
            fund2_return: h2.one_year_return,
        });

        let bucket = sector_overlap.entry(h1.sector.clone()).or_default();
        bucket.count += 1;
        bucket.fund1_weight += h1.portfolio_weight;
        bucket.fund2_weight += h2.portfolio_weight;
    }

    let common_count = common_stocks.len();
    let union_count = keyed1.len() + keyed2.len() - common_count;
    let overlap_percentage = if union_count > 0 {
        common_count as f64 / union_count as f64 * 100.0
    } else {
        0.0
    };
    let diversification_score = 100.0 - overlap_percentage;

    // Stable sort keeps key order among equal weights.
    common_stocks.sort_by(|a, b| b.min_weight.total_cmp(&a.min_weight));

    OverlapAnalysis {
        fund1_name: fund1.name.clone(),
        fund2_name: fund2.name.clone(),
        common_stocks,
        overlap_percentage: round2(overlap_percentage),
        weighted_overlap: round2(weighted_overlap),
        common_stocks_count: common_count,
        fund1_unique_count: keyed1.len() - common_count,
        fund2_unique_count: keyed2.len() - common_count,
        sector_overlap,
        diversification_score: round2(diversification_score),
    }
}

/// Normalized name → holding. A later holding with the same key replaces
/// the earlier one.
fn keyed_holdings(fund: &MutualFund) -> BTreeMap<String, &StockHolding> {
    let mut keyed = BTreeMap::new();
    for holding in fund.holdings() {
        keyed.insert(normalize(&holding.company_name), holding);
    }
    keyed
}

/// Round to 2 decimal places, ties to even on the exact binary value
/// (0.125 -> 0.12, 2.675 -> 2.67 since it is stored as 2.67499...).
/// Non-finite values pass through.
pub fn round2(value: f64) -> f64 {
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp(2);
            rounded.mantissa() as f64 / 10f64.powi(rounded.scale() as i32)
        }
        None => value,
    }
}
