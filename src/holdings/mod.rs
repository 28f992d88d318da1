// Fund holdings: data model, name normalization, and CSV loading.

pub mod loader;
pub mod models;
pub mod normalize;

pub use models::{MutualFund, StockHolding};
pub use normalize::normalize;
