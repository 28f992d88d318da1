// fundlens: Mutual fund portfolio overlap analysis
//
// This is the library root. Holdings flow from storage through the loader
// into the analysis engine; the catalog ties those together and the web
// module serves the results as JSON.

pub mod analysis;
pub mod catalog;
pub mod config;
pub mod holdings;
pub mod output;
pub mod storage;

#[cfg(feature = "web")]
pub mod web;
