//! Ledger storage.
//!
//! The [`LedgerStore`] trait is the seam for a durable backend. The in-memory
//! implementation keys every product to its own lock: mutations on the same
//! code serialize, while different codes proceed concurrently. A mutation
//! either commits both the stock update and its movement, or nothing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use stockroom_catalog::Product;
use stockroom_core::{InventoryError, InventoryResult, MovementId, ProductCode};

use crate::movement::Movement;
use crate::stock::StockRecord;

/// Everything the store holds for one product: identity, current stock and
/// that product's slice of the movement log.
#[derive(Debug, Clone)]
pub struct ProductSlot {
    pub product: Product,
    pub stock: StockRecord,
    pub movements: Vec<Movement>,
}

/// Storage contract for the stock ledger.
///
/// `mutate` runs the supplied transaction under the product's exclusive lock.
/// The closure sees the current slot and decides the outcome:
///
/// - `Ok(Some((record, movement)))` — commit: the record replaces the current
///   stock state and the movement is appended, as one unit.
/// - `Ok(None)` — deliberate no-op (nothing written, no error).
/// - `Err(_)` — rejected: no write of any kind happens.
pub trait LedgerStore: Send + Sync {
    /// Register a product and its stock record atomically.
    fn insert(&self, product: Product, stock: StockRecord) -> InventoryResult<()>;

    /// Run a read-only closure over one product's slot.
    fn read<R, F>(&self, code: &ProductCode, f: F) -> InventoryResult<Option<R>>
    where
        F: FnOnce(&ProductSlot) -> R;

    /// Run a transactional mutation over one product's slot. The closure
    /// receives the movement id the commit would use.
    fn mutate<F>(&self, code: &ProductCode, f: F) -> InventoryResult<Option<Movement>>
    where
        F: FnOnce(MovementId, &ProductSlot) -> InventoryResult<Option<(StockRecord, Movement)>>;

    /// All registered products.
    fn products(&self) -> InventoryResult<Vec<Product>>;

    /// Current stock snapshot of every product.
    fn stock_records(&self) -> InventoryResult<Vec<StockRecord>>;

    /// The whole movement log, in id (application) order.
    fn movements(&self) -> InventoryResult<Vec<Movement>>;
}

type Slots = HashMap<ProductCode, Arc<Mutex<ProductSlot>>>;

/// In-memory store. The outer map lock is held only to look up or insert a
/// slot; per-product work happens under the slot's own mutex.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    slots: RwLock<Slots>,
    next_movement_id: AtomicU64,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
            next_movement_id: AtomicU64::new(1),
        }
    }

    fn slot(&self, code: &ProductCode) -> InventoryResult<Option<Arc<Mutex<ProductSlot>>>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| InventoryError::storage("ledger store lock poisoned"))?;
        Ok(slots.get(code).cloned())
    }

    fn all_slots(&self) -> InventoryResult<Vec<Arc<Mutex<ProductSlot>>>> {
        let slots = self
            .slots
            .read()
            .map_err(|_| InventoryError::storage("ledger store lock poisoned"))?;
        Ok(slots.values().cloned().collect())
    }
}

fn lock_slot(slot: &Arc<Mutex<ProductSlot>>) -> InventoryResult<std::sync::MutexGuard<'_, ProductSlot>> {
    slot.lock()
        .map_err(|_| InventoryError::storage("product slot lock poisoned"))
}

impl LedgerStore for InMemoryLedgerStore {
    fn insert(&self, product: Product, stock: StockRecord) -> InventoryResult<()> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| InventoryError::storage("ledger store lock poisoned"))?;

        let code = product.code.clone();
        if slots.contains_key(&code) {
            return Err(InventoryError::duplicate_product_code(code.to_string()));
        }

        slots.insert(
            code,
            Arc::new(Mutex::new(ProductSlot {
                product,
                stock,
                movements: Vec::new(),
            })),
        );
        Ok(())
    }

    fn read<R, F>(&self, code: &ProductCode, f: F) -> InventoryResult<Option<R>>
    where
        F: FnOnce(&ProductSlot) -> R,
    {
        match self.slot(code)? {
            Some(slot) => {
                let guard = lock_slot(&slot)?;
                Ok(Some(f(&guard)))
            }
            None => Ok(None),
        }
    }

    fn mutate<F>(&self, code: &ProductCode, f: F) -> InventoryResult<Option<Movement>>
    where
        F: FnOnce(MovementId, &ProductSlot) -> InventoryResult<Option<(StockRecord, Movement)>>,
    {
        let slot = self
            .slot(code)?
            .ok_or_else(|| InventoryError::product_not_found(code.to_string()))?;

        let mut guard = lock_slot(&slot)?;

        // Ids discarded by rejected or no-op transactions leave gaps, which
        // is fine: ordering comes from append order under the slot lock.
        let id = MovementId::new(self.next_movement_id.fetch_add(1, Ordering::Relaxed));

        match f(id, &guard)? {
            Some((stock, movement)) => {
                guard.stock = stock;
                guard.movements.push(movement.clone());
                Ok(Some(movement))
            }
            None => Ok(None),
        }
    }

    fn products(&self) -> InventoryResult<Vec<Product>> {
        let mut products = Vec::new();
        for slot in self.all_slots()? {
            products.push(lock_slot(&slot)?.product.clone());
        }
        products.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(products)
    }

    fn stock_records(&self) -> InventoryResult<Vec<StockRecord>> {
        let mut records = Vec::new();
        for slot in self.all_slots()? {
            records.push(lock_slot(&slot)?.stock.clone());
        }
        records.sort_by(|a, b| a.code.cmp(&b.code));
        Ok(records)
    }

    fn movements(&self) -> InventoryResult<Vec<Movement>> {
        let mut movements = Vec::new();
        for slot in self.all_slots()? {
            movements.extend(lock_slot(&slot)?.movements.iter().cloned());
        }
        movements.sort_by_key(|m| m.id);
        Ok(movements)
    }
}
