//! Product identity and stock-health thresholds.

use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryError, InventoryResult, ProductCode};

/// Static product record. Created once at registration and never mutated in
/// place; re-registering an existing code is rejected, not merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub code: ProductCode,
    pub name: String,
    pub category: String,
}

impl Product {
    pub fn new(
        code: ProductCode,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> InventoryResult<Self> {
        let name = name.into();
        let category = category.into();
        if name.trim().is_empty() {
            return Err(InventoryError::validation("product name cannot be empty"));
        }
        if category.trim().is_empty() {
            return Err(InventoryError::validation("product category cannot be empty"));
        }
        Ok(Self { code, name, category })
    }
}

/// Stock-health boundaries. Value object: compared by value, immutable.
///
/// Invariant: `0 <= min < regular < max`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thresholds {
    min: i64,
    regular: i64,
    max: i64,
}

impl Thresholds {
    pub fn new(min: i64, regular: i64, max: i64) -> InventoryResult<Self> {
        if min < 0 {
            return Err(InventoryError::invalid_thresholds(format!(
                "min must be 0 or greater (got {min})"
            )));
        }
        if regular <= min {
            return Err(InventoryError::invalid_thresholds(format!(
                "regular ({regular}) must be greater than min ({min})"
            )));
        }
        if max <= regular {
            return Err(InventoryError::invalid_thresholds(format!(
                "max ({max}) must be greater than regular ({regular})"
            )));
        }
        Ok(Self { min, regular, max })
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn regular(&self) -> i64 {
        self.regular
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ProductCode {
        ProductCode::parse(s).unwrap()
    }

    #[test]
    fn well_formed_product_is_accepted() {
        let product = Product::new(code("CAM-001"), "Camiseta", "Vestuário").unwrap();
        assert_eq!(product.code.as_str(), "CAM-001");
        assert_eq!(product.name, "Camiseta");
    }

    #[test]
    fn blank_name_or_category_is_rejected() {
        assert!(Product::new(code("CAM-001"), " ", "Vestuário").is_err());
        assert!(Product::new(code("CAM-001"), "Camiseta", "").is_err());
    }

    #[test]
    fn threshold_ordering_is_enforced() {
        assert!(Thresholds::new(10, 30, 50).is_ok());
        assert!(Thresholds::new(-1, 30, 50).is_err());
        assert!(Thresholds::new(10, 10, 50).is_err());
        assert!(Thresholds::new(10, 30, 30).is_err());
        assert!(Thresholds::new(30, 10, 50).is_err());
    }

    #[test]
    fn zero_min_is_allowed() {
        let t = Thresholds::new(0, 10, 20).unwrap();
        assert_eq!(t.min(), 0);
        assert_eq!(t.regular(), 10);
        assert_eq!(t.max(), 20);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: accepted triples always satisfy 0 <= min < regular < max.
            #[test]
            fn accepted_triples_are_strictly_ordered(
                min in -100i64..100,
                regular in -100i64..200,
                max in -100i64..300,
            ) {
                match Thresholds::new(min, regular, max) {
                    Ok(t) => {
                        prop_assert!(0 <= t.min());
                        prop_assert!(t.min() < t.regular());
                        prop_assert!(t.regular() < t.max());
                    }
                    Err(e) => {
                        prop_assert!(matches!(e, InventoryError::InvalidThresholds(_)));
                        prop_assert!(min < 0 || regular <= min || max <= regular);
                    }
                }
            }
        }
    }
}
