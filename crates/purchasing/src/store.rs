//! Order storage.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use stockroom_core::{InventoryError, InventoryResult, OrderId};

use crate::order::PurchaseOrder;

/// Storage contract for purchase orders.
///
/// `update` runs its closure under the store's write lock, so guard checks
/// and the transition they protect happen as one unit.
pub trait OrderStore: Send + Sync {
    /// Persist a new order, assigning its id.
    fn insert<F>(&self, build: F) -> InventoryResult<PurchaseOrder>
    where
        F: FnOnce(OrderId) -> InventoryResult<PurchaseOrder>;

    fn get(&self, id: OrderId) -> InventoryResult<Option<PurchaseOrder>>;

    /// Transactionally update one order. `OrderNotFound` if absent; an `Err`
    /// from the closure leaves the order untouched.
    fn update<R, F>(&self, id: OrderId, f: F) -> InventoryResult<R>
    where
        F: FnOnce(&mut PurchaseOrder) -> InventoryResult<R>;

    /// Orders still awaiting approval, in id order.
    fn open_orders(&self) -> InventoryResult<Vec<PurchaseOrder>>;
}

/// In-memory order store. One lock for the whole map is enough: order traffic
/// is a fraction of movement traffic and needs no per-key scaling.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<BTreeMap<OrderId, PurchaseOrder>>,
    next_id: AtomicU64,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            orders: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert<F>(&self, build: F) -> InventoryResult<PurchaseOrder>
    where
        F: FnOnce(OrderId) -> InventoryResult<PurchaseOrder>,
    {
        let id = OrderId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let order = build(id)?;

        let mut orders = self
            .orders
            .write()
            .map_err(|_| InventoryError::storage("order store lock poisoned"))?;
        orders.insert(id, order.clone());
        Ok(order)
    }

    fn get(&self, id: OrderId) -> InventoryResult<Option<PurchaseOrder>> {
        let orders = self
            .orders
            .read()
            .map_err(|_| InventoryError::storage("order store lock poisoned"))?;
        Ok(orders.get(&id).cloned())
    }

    fn update<R, F>(&self, id: OrderId, f: F) -> InventoryResult<R>
    where
        F: FnOnce(&mut PurchaseOrder) -> InventoryResult<R>,
    {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| InventoryError::storage("order store lock poisoned"))?;
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| InventoryError::order_not_found(id.to_string()))?;

        // Work on a copy so a rejected transition leaves the stored order as
        // it was.
        let mut draft = order.clone();
        let result = f(&mut draft)?;
        *order = draft;
        Ok(result)
    }

    fn open_orders(&self) -> InventoryResult<Vec<PurchaseOrder>> {
        let orders = self
            .orders
            .read()
            .map_err(|_| InventoryError::storage("order store lock poisoned"))?;
        Ok(orders.values().filter(|o| o.is_open()).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use stockroom_core::ProductCode;

    fn insert_order(store: &InMemoryOrderStore, qty: i64) -> PurchaseOrder {
        store
            .insert(|id| {
                PurchaseOrder::new(id, ProductCode::parse("P-001").unwrap(), qty, Utc::now())
            })
            .unwrap()
    }

    #[test]
    fn ids_are_assigned_sequentially() {
        let store = InMemoryOrderStore::new();
        let first = insert_order(&store, 10);
        let second = insert_order(&store, 20);
        assert_eq!(u64::from(first.id) + 1, u64::from(second.id));
    }

    #[test]
    fn update_on_missing_order_is_not_found() {
        let store = InMemoryOrderStore::new();
        let err = store.update(OrderId::new(9), |_| Ok(())).unwrap_err();
        assert!(matches!(err, InventoryError::OrderNotFound(_)));
    }

    #[test]
    fn failed_update_leaves_order_untouched() {
        let store = InMemoryOrderStore::new();
        let order = insert_order(&store, 10);

        let result: InventoryResult<()> = store.update(order.id, |o| {
            o.approve();
            Err(InventoryError::storage("simulated"))
        });
        assert!(result.is_err());
        assert!(!store.get(order.id).unwrap().unwrap().approved);
    }

    #[test]
    fn open_orders_excludes_approved() {
        let store = InMemoryOrderStore::new();
        let first = insert_order(&store, 10);
        let second = insert_order(&store, 20);

        store
            .update(first.id, |o| {
                o.approve();
                Ok(())
            })
            .unwrap();

        let open = store.open_orders().unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.id);
    }
}
