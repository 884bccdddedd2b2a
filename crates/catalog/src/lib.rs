//! `stockroom-catalog` — static product identity records.

pub mod product;

pub use product::{Product, Thresholds};
