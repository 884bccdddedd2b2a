//! Per-product stock snapshot.

use serde::{Deserialize, Serialize};

use stockroom_catalog::Thresholds;
use stockroom_core::{InventoryError, InventoryResult, ProductCode};

/// Current stock state of one product. Created atomically with its product
/// record; `quantity` is mutated exclusively through the ledger and never
/// goes below zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub code: ProductCode,
    pub quantity: i64,
    pub thresholds: Thresholds,
    pub location: String,
}

impl StockRecord {
    /// Fresh record with zero stock.
    pub fn new(
        code: ProductCode,
        thresholds: Thresholds,
        location: impl Into<String>,
    ) -> InventoryResult<Self> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(InventoryError::validation("location cannot be empty"));
        }
        Ok(Self {
            code,
            quantity: 0,
            thresholds,
            location,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_starts_at_zero() {
        let record = StockRecord::new(
            ProductCode::parse("P-001").unwrap(),
            Thresholds::new(10, 30, 50).unwrap(),
            "VEST01",
        )
        .unwrap();
        assert_eq!(record.quantity, 0);
        assert_eq!(record.location, "VEST01");
    }

    #[test]
    fn blank_location_is_rejected() {
        let err = StockRecord::new(
            ProductCode::parse("P-001").unwrap(),
            Thresholds::new(10, 30, 50).unwrap(),
            "  ",
        )
        .unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }
}
