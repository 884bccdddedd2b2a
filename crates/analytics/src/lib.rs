//! `stockroom-analytics` — read-only queries over the catalog and ledger.

pub mod analytics;

pub use analytics::{StockAnalytics, StockClassification};
