//! Stock mutation engine.

use std::sync::Arc;

use stockroom_catalog::{Product, Thresholds};
use stockroom_core::{Clock, InventoryError, InventoryResult, ProductCode};

use crate::movement::{Movement, MovementCategory};
use crate::stock::StockRecord;
use crate::store::LedgerStore;

/// The stock mutation and movement-ledger engine.
///
/// Every operation reads current state, validates, mutates and records a
/// movement inside one store transaction scoped to the product code, so the
/// snapshot and the audit trail can never diverge.
pub struct StockLedger<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
}

impl<S> Clone for StockLedger<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: LedgerStore> StockLedger<S> {
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Register a product and create its stock record with zero quantity.
    /// Both records are written atomically or not at all.
    pub fn register_product(
        &self,
        code: ProductCode,
        name: &str,
        category: &str,
        thresholds: Thresholds,
        location: &str,
    ) -> InventoryResult<()> {
        let product = Product::new(code.clone(), name, category)?;
        let stock = StockRecord::new(code.clone(), thresholds, location)?;

        self.store.insert(product, stock)?;
        tracing::info!(%code, location, "product registered");
        Ok(())
    }

    /// Apply a quantity movement and return the new quantity.
    ///
    /// `quantity` is a positive magnitude for `Sale` (subtracted) and
    /// `Purchase` (added), and a non-zero signed delta for `Adjustment`.
    /// `Relocation` carries no quantity; use [`StockLedger::relocate`].
    pub fn apply_movement(
        &self,
        code: &ProductCode,
        category: MovementCategory,
        quantity: i64,
    ) -> InventoryResult<i64> {
        let delta = signed_delta(category, quantity)?;
        let recorded_at = self.clock.now();

        let movement = self
            .store
            .mutate(code, |id, slot| {
                let before = slot.stock.quantity;
                let after = before + delta;
                if after < 0 {
                    return Err(InventoryError::insufficient_stock(format!(
                        "{code}: {before} on hand, movement of {delta}"
                    )));
                }

                let mut stock = slot.stock.clone();
                stock.quantity = after;
                let movement =
                    Movement::quantity(id, code.clone(), category, delta, before, recorded_at);
                Ok(Some((stock, movement)))
            })?
            .ok_or_else(|| InventoryError::storage("quantity transaction yielded no movement"))?;

        let after = movement
            .quantity_after()
            .ok_or_else(|| InventoryError::storage("quantity movement without quantity"))?;
        tracing::info!(%code, %category, delta, after, "movement applied");
        Ok(after)
    }

    /// Move a product to another storage location.
    ///
    /// Moving to the current location is a no-op, not an error. An actual
    /// move appends a `Relocation` movement carrying the old/new locations.
    pub fn relocate(&self, code: &ProductCode, new_location: &str) -> InventoryResult<()> {
        let new_location = new_location.trim();
        if new_location.is_empty() {
            return Err(InventoryError::validation("location cannot be empty"));
        }
        let recorded_at = self.clock.now();

        let moved = self.store.mutate(code, |id, slot| {
            if slot.stock.location == new_location {
                return Ok(None);
            }

            let mut stock = slot.stock.clone();
            let movement = Movement::relocation(
                id,
                code.clone(),
                stock.location.clone(),
                new_location,
                recorded_at,
            );
            stock.location = new_location.to_string();
            Ok(Some((stock, movement)))
        })?;

        match moved {
            Some(_) => tracing::info!(%code, new_location, "product relocated"),
            None => tracing::debug!(%code, new_location, "already at requested location"),
        }
        Ok(())
    }

    /// Current stock record for `code`, if registered.
    pub fn get_stock(&self, code: &ProductCode) -> InventoryResult<Option<StockRecord>> {
        self.store.read(code, |slot| slot.stock.clone())
    }
}

fn signed_delta(category: MovementCategory, quantity: i64) -> InventoryResult<i64> {
    match category {
        MovementCategory::Sale => {
            if quantity <= 0 {
                return Err(InventoryError::invalid_quantity(format!(
                    "sale quantity must be positive (got {quantity})"
                )));
            }
            Ok(-quantity)
        }
        MovementCategory::Purchase => {
            if quantity <= 0 {
                return Err(InventoryError::invalid_quantity(format!(
                    "purchase quantity must be positive (got {quantity})"
                )));
            }
            Ok(quantity)
        }
        MovementCategory::Adjustment => {
            if quantity == 0 {
                return Err(InventoryError::invalid_quantity(
                    "adjustment delta cannot be zero",
                ));
            }
            Ok(quantity)
        }
        MovementCategory::Relocation => Err(InventoryError::invalid_quantity(
            "relocation movements carry no quantity",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::MovementChange;
    use crate::store::InMemoryLedgerStore;
    use chrono::{TimeZone, Utc};
    use stockroom_core::FixedClock;

    fn code(s: &str) -> ProductCode {
        ProductCode::parse(s).unwrap()
    }

    fn ledger() -> StockLedger<InMemoryLedgerStore> {
        let clock = FixedClock::at(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap());
        StockLedger::new(Arc::new(InMemoryLedgerStore::new()), Arc::new(clock))
    }

    fn register(ledger: &StockLedger<InMemoryLedgerStore>, c: &str) {
        ledger
            .register_product(
                code(c),
                "Camiseta",
                "Vestuário",
                Thresholds::new(10, 30, 50).unwrap(),
                "VEST01",
            )
            .unwrap();
    }

    #[test]
    fn register_then_get_round_trips_thresholds_and_location() {
        let ledger = ledger();
        register(&ledger, "P-001");

        let stock = ledger.get_stock(&code("P-001")).unwrap().unwrap();
        assert_eq!(stock.quantity, 0);
        assert_eq!(stock.thresholds, Thresholds::new(10, 30, 50).unwrap());
        assert_eq!(stock.location, "VEST01");
    }

    #[test]
    fn get_stock_on_unknown_code_is_none() {
        let ledger = ledger();
        assert!(ledger.get_stock(&code("P-001")).unwrap().is_none());
    }

    #[test]
    fn purchase_adds_and_sale_subtracts() {
        let ledger = ledger();
        register(&ledger, "P-001");

        assert_eq!(
            ledger
                .apply_movement(&code("P-001"), MovementCategory::Purchase, 20)
                .unwrap(),
            20
        );
        assert_eq!(
            ledger
                .apply_movement(&code("P-001"), MovementCategory::Sale, 5)
                .unwrap(),
            15
        );
    }

    #[test]
    fn oversell_is_rejected_before_any_write() {
        let ledger = ledger();
        register(&ledger, "P-001");
        ledger
            .apply_movement(&code("P-001"), MovementCategory::Purchase, 20)
            .unwrap();

        let err = ledger
            .apply_movement(&code("P-001"), MovementCategory::Sale, 25)
            .unwrap_err();
        assert!(matches!(err, InventoryError::InsufficientStock(_)));

        // Failed operation left no trace: quantity unchanged, no movement.
        let stock = ledger.get_stock(&code("P-001")).unwrap().unwrap();
        assert_eq!(stock.quantity, 20);
        assert_eq!(ledger.store().movements().unwrap().len(), 1);
    }

    #[test]
    fn adjustment_takes_signed_deltas() {
        let ledger = ledger();
        register(&ledger, "P-001");

        ledger
            .apply_movement(&code("P-001"), MovementCategory::Adjustment, 7)
            .unwrap();
        let after = ledger
            .apply_movement(&code("P-001"), MovementCategory::Adjustment, -3)
            .unwrap();
        assert_eq!(after, 4);

        let err = ledger
            .apply_movement(&code("P-001"), MovementCategory::Adjustment, 0)
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidQuantity(_)));
    }

    #[test]
    fn zero_or_negative_magnitudes_are_invalid() {
        let ledger = ledger();
        register(&ledger, "P-001");

        for qty in [0, -4] {
            let err = ledger
                .apply_movement(&code("P-001"), MovementCategory::Sale, qty)
                .unwrap_err();
            assert!(matches!(err, InventoryError::InvalidQuantity(_)));
        }
    }

    #[test]
    fn relocation_category_is_not_a_quantity_movement() {
        let ledger = ledger();
        register(&ledger, "P-001");

        let err = ledger
            .apply_movement(&code("P-001"), MovementCategory::Relocation, 1)
            .unwrap_err();
        assert!(matches!(err, InventoryError::InvalidQuantity(_)));
    }

    #[test]
    fn relocate_appends_location_movement() {
        let ledger = ledger();
        register(&ledger, "P-001");

        ledger.relocate(&code("P-001"), "VEST02").unwrap();
        let stock = ledger.get_stock(&code("P-001")).unwrap().unwrap();
        assert_eq!(stock.location, "VEST02");

        let movements = ledger.store().movements().unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].category, MovementCategory::Relocation);
        assert_eq!(
            movements[0].change,
            MovementChange::Location {
                from: "VEST01".to_string(),
                to: "VEST02".to_string(),
            }
        );
    }

    #[test]
    fn relocate_to_same_location_is_a_silent_no_op() {
        let ledger = ledger();
        register(&ledger, "P-001");

        ledger.relocate(&code("P-001"), "VEST01").unwrap();
        assert!(ledger.store().movements().unwrap().is_empty());
    }

    #[test]
    fn movement_on_unknown_product_is_not_found() {
        let ledger = ledger();
        let err = ledger
            .apply_movement(&code("GHOST"), MovementCategory::Purchase, 1)
            .unwrap_err();
        assert!(matches!(err, InventoryError::ProductNotFound(_)));
    }

    /// Invariant: quantity equals the `after` of the latest quantity-carrying
    /// movement (or 0 with none), through successes, failures and relocations.
    fn assert_ledger_invariant(ledger: &StockLedger<InMemoryLedgerStore>, c: &ProductCode) {
        let stock = ledger.get_stock(c).unwrap().unwrap();
        let last_after = ledger
            .store()
            .movements()
            .unwrap()
            .iter()
            .filter(|m| &m.code == c)
            .filter_map(Movement::quantity_after)
            .last()
            .unwrap_or(0);
        assert_eq!(stock.quantity, last_after);
    }

    #[test]
    fn snapshot_always_matches_latest_movement() {
        let ledger = ledger();
        register(&ledger, "P-001");
        let c = code("P-001");

        let _ = ledger.apply_movement(&c, MovementCategory::Purchase, 20);
        assert_ledger_invariant(&ledger, &c);
        let _ = ledger.apply_movement(&c, MovementCategory::Sale, 25); // fails
        assert_ledger_invariant(&ledger, &c);
        let _ = ledger.relocate(&c, "VEST02");
        assert_ledger_invariant(&ledger, &c);
        let _ = ledger.apply_movement(&c, MovementCategory::Adjustment, -20);
        assert_ledger_invariant(&ledger, &c);
    }

    mod concurrency {
        use super::*;
        use std::thread;

        #[test]
        fn concurrent_movements_on_one_code_serialize() {
            let ledger = ledger();
            register(&ledger, "P-001");
            let c = code("P-001");

            // Seed enough stock that no interleaving can undersell.
            ledger
                .apply_movement(&c, MovementCategory::Purchase, 1_000)
                .unwrap();

            let deltas: Vec<(MovementCategory, i64)> = (1..=16)
                .map(|i| {
                    if i % 2 == 0 {
                        (MovementCategory::Purchase, i)
                    } else {
                        (MovementCategory::Sale, i)
                    }
                })
                .collect();

            let handles: Vec<_> = deltas
                .iter()
                .map(|&(category, qty)| {
                    let ledger = ledger.clone();
                    let c = c.clone();
                    thread::spawn(move || ledger.apply_movement(&c, category, qty).unwrap())
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            let expected: i64 = 1_000
                + deltas
                    .iter()
                    .map(|&(category, qty)| match category {
                        MovementCategory::Sale => -qty,
                        _ => qty,
                    })
                    .sum::<i64>();

            let stock = ledger.get_stock(&c).unwrap().unwrap();
            assert_eq!(stock.quantity, expected);

            // Exactly one movement per successful operation (plus the seed),
            // each one's `before` equal to its predecessor's `after`.
            let movements = ledger.store().movements().unwrap();
            assert_eq!(movements.len(), deltas.len() + 1);
            let mut previous_after = 0;
            for movement in &movements {
                match movement.change {
                    MovementChange::Quantity { before, after, .. } => {
                        assert_eq!(before, previous_after);
                        previous_after = after;
                    }
                    MovementChange::Location { .. } => panic!("unexpected relocation"),
                }
            }
            assert_eq!(previous_after, expected);
        }

        #[test]
        fn different_codes_do_not_block_each_other() {
            let ledger = ledger();
            register(&ledger, "A-001");
            register(&ledger, "B-001");

            let handles: Vec<_> = ["A-001", "B-001"]
                .into_iter()
                .map(|c| {
                    let ledger = ledger.clone();
                    let c = code(c);
                    thread::spawn(move || {
                        for _ in 0..50 {
                            ledger
                                .apply_movement(&c, MovementCategory::Purchase, 1)
                                .unwrap();
                        }
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }

            assert_eq!(ledger.get_stock(&code("A-001")).unwrap().unwrap().quantity, 50);
            assert_eq!(ledger.get_stock(&code("B-001")).unwrap().unwrap().quantity, 50);
        }
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Purchase(i64),
            Sale(i64),
            Adjust(i64),
            Relocate(String),
        }

        fn op_strategy() -> impl Strategy<Value = Op> {
            prop_oneof![
                (1i64..50).prop_map(Op::Purchase),
                (1i64..50).prop_map(Op::Sale),
                (-50i64..50).prop_map(Op::Adjust),
                "[A-Z]{3}[0-9]{2}".prop_map(Op::Relocate),
            ]
        }

        proptest! {
            /// Property: after any operation sequence, including rejected
            /// ones, the snapshot equals the last quantity movement's `after`
            /// and never goes negative.
            #[test]
            fn invariant_holds_over_random_sequences(ops in prop::collection::vec(op_strategy(), 1..60)) {
                let ledger = ledger();
                register(&ledger, "P-001");
                let c = code("P-001");

                for op in ops {
                    match op {
                        Op::Purchase(q) => {
                            let _ = ledger.apply_movement(&c, MovementCategory::Purchase, q);
                        }
                        Op::Sale(q) => {
                            let _ = ledger.apply_movement(&c, MovementCategory::Sale, q);
                        }
                        Op::Adjust(q) => {
                            let _ = ledger.apply_movement(&c, MovementCategory::Adjustment, q);
                        }
                        Op::Relocate(location) => {
                            let _ = ledger.relocate(&c, &location);
                        }
                    }

                    let stock = ledger.get_stock(&c).unwrap().unwrap();
                    prop_assert!(stock.quantity >= 0);
                    let last_after = ledger
                        .store()
                        .movements()
                        .unwrap()
                        .iter()
                        .filter_map(Movement::quantity_after)
                        .last()
                        .unwrap_or(0);
                    prop_assert_eq!(stock.quantity, last_after);
                }
            }
        }
    }
}
