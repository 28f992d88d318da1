// Data models: one fund's disclosed portfolio.
//
// These are the types that flow from the CSV loader into the overlap engine
// and the fund summary. They are built once per parsed file and never
// mutated afterwards.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Sector assigned when the disclosure leaves the column blank.
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// A single stock position in a fund's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockHolding {
    /// Display name as disclosed (trimmed, not normalized).
    pub company_name: String,
    /// Percentage of fund NAV. Source data can overshoot 100 slightly.
    pub portfolio_weight: f64,
    pub sector: String,
    pub market_value: Option<f64>,
    /// Carried verbatim, never interpreted.
    pub share_change: Option<String>,
    pub one_year_return: Option<f64>,
}

impl StockHolding {
    /// Build a holding with only the fields the overlap engine needs.
    pub fn new(company_name: &str, portfolio_weight: f64, sector: &str) -> Self {
        Self {
            company_name: company_name.to_string(),
            portfolio_weight,
            sector: sector.to_string(),
            market_value: None,
            share_change: None,
            one_year_return: None,
        }
    }

    pub fn with_return(mut self, one_year_return: f64) -> Self {
        self.one_year_return = Some(one_year_return);
        self
    }
}

/// A mutual fund: its display name plus holdings in parse order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutualFund {
    pub name: String,
    holdings: Vec<StockHolding>,
}

impl MutualFund {
    pub fn new(name: &str, holdings: Vec<StockHolding>) -> Self {
        Self {
            name: name.to_string(),
            holdings,
        }
    }

    pub fn holdings(&self) -> &[StockHolding] {
        &self.holdings
    }

    /// Number of holdings. Always equal to `holdings().len()`.
    pub fn total_stocks(&self) -> usize {
        self.holdings.len()
    }

    /// Map company display name to holding. Later duplicates win.
    pub fn stock_map(&self) -> HashMap<&str, &StockHolding> {
        self.holdings
            .iter()
            .map(|h| (h.company_name.as_str(), h))
            .collect()
    }

    /// Sector weights in order of first appearance.
    ///
    /// The summary relies on this order to break ties between sectors of
    /// equal weight.
    pub fn sector_weights(&self) -> Vec<(String, f64)> {
        let mut weights: Vec<(String, f64)> = Vec::new();
        for holding in &self.holdings {
            match weights.iter_mut().find(|(s, _)| *s == holding.sector) {
                Some((_, w)) => *w += holding.portfolio_weight,
                None => weights.push((holding.sector.clone(), holding.portfolio_weight)),
            }
        }
        weights
    }

    /// Sector → total weight, keyed for serialization.
    pub fn sector_allocation(&self) -> BTreeMap<String, f64> {
        self.sector_weights().into_iter().collect()
    }
}
