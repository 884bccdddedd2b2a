//! Stock health classification and activity reports.
//!
//! Pure reads over the ledger store: nothing here mutates, and every query
//! can be re-run without changing its result (given an unchanged ledger).

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use stockroom_catalog::Product;
use stockroom_core::{Clock, InventoryResult, ProductCode};
use stockroom_ledger::{LedgerStore, Movement, MovementCategory};

/// Default reporting windows, from the standing weekly/detailed reports.
pub const RECENT_MOVEMENTS_DAYS: i64 = 7;
pub const UNSOLD_DAYS: i64 = 30;
pub const OVER_REPURCHASE_DAYS: i64 = 61;
pub const OVER_REPURCHASE_COUNT: usize = 4;

/// Every product lands in exactly one bucket.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockClassification {
    pub low: Vec<ProductCode>,
    pub regular: Vec<ProductCode>,
    pub over: Vec<ProductCode>,
}

/// Read-only analytics over a ledger store.
pub struct StockAnalytics<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for StockAnalytics<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: LedgerStore> StockAnalytics<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Bucket every product by stock health.
    ///
    /// Tie-break order is exact: above max is `over`; at or below min is
    /// `low` (the min boundary itself counts as low); everything else is
    /// `regular`.
    pub fn classify_stock(&self) -> InventoryResult<StockClassification> {
        let mut classification = StockClassification::default();
        for record in self.store.stock_records()? {
            if record.quantity > record.thresholds.max() {
                classification.over.push(record.code);
            } else if record.quantity <= record.thresholds.min() {
                classification.low.push(record.code);
            } else {
                classification.regular.push(record.code);
            }
        }
        Ok(classification)
    }

    /// Movements recorded within `window` of now, newest first.
    pub fn recent_movements(&self, window: Duration) -> InventoryResult<Vec<Movement>> {
        let cutoff = self.clock.now() - window;
        let mut movements: Vec<Movement> = self
            .store
            .movements()?
            .into_iter()
            .filter(|m| m.recorded_at >= cutoff)
            .collect();
        movements.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at).then(b.id.cmp(&a.id)));
        Ok(movements)
    }

    /// Products with no sale at or after `cutoff`.
    pub fn unsold_since(&self, cutoff: DateTime<Utc>) -> InventoryResult<Vec<Product>> {
        let movements = self.store.movements()?;
        let sold: Vec<&ProductCode> = movements
            .iter()
            .filter(|m| m.category == MovementCategory::Sale && m.recorded_at >= cutoff)
            .map(|m| &m.code)
            .collect();

        Ok(self
            .store
            .products()?
            .into_iter()
            .filter(|p| !sold.contains(&&p.code))
            .collect())
    }

    /// Products replenished at least `threshold` times within `window` of
    /// now, with the number of matching purchase movements.
    pub fn over_repurchased(
        &self,
        window: Duration,
        threshold: usize,
    ) -> InventoryResult<BTreeMap<ProductCode, usize>> {
        let cutoff = self.clock.now() - window;
        let mut counts: BTreeMap<ProductCode, usize> = BTreeMap::new();
        for movement in self.store.movements()? {
            if movement.category == MovementCategory::Purchase && movement.recorded_at >= cutoff {
                *counts.entry(movement.code).or_insert(0) += 1;
            }
        }
        counts.retain(|_, count| *count >= threshold);
        Ok(counts)
    }
}
