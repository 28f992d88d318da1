// Analysis: pairwise overlap and single-fund summaries.

pub mod overlap;
pub mod summary;

pub use overlap::{compare_funds, CommonStock, OverlapAnalysis, SectorOverlap};
pub use summary::{summarize, FundSummary, TopHolding};
