//! Replenishment workflow service.

use std::sync::Arc;

use stockroom_core::{Clock, InventoryError, InventoryResult, OrderId, ProductCode};
use stockroom_ledger::{LedgerStore, MovementCategory, StockLedger};

use crate::invoice::InvoiceRef;
use crate::order::PurchaseOrder;
use crate::store::OrderStore;

/// Purchase order state machine over a ledger and an order store.
///
/// Fulfillment applies the stock movement and marks the order fulfilled as
/// one unit: the order is updated under its store lock, and a failed stock
/// update propagates out before the transition, leaving no partial state.
pub struct PurchaseOrderWorkflow<S, O> {
    ledger: StockLedger<S>,
    orders: Arc<O>,
    clock: Arc<dyn Clock>,
}

impl<S, O> Clone for PurchaseOrderWorkflow<S, O> {
    fn clone(&self) -> Self {
        Self {
            ledger: self.ledger.clone(),
            orders: Arc::clone(&self.orders),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<S: LedgerStore, O: OrderStore> PurchaseOrderWorkflow<S, O> {
    pub fn new(ledger: StockLedger<S>, orders: Arc<O>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger,
            orders,
            clock,
        }
    }

    /// Request replenishment of `quantity` units. The product must exist;
    /// the order references it by its natural key.
    pub fn create_order(
        &self,
        code: &ProductCode,
        quantity: i64,
    ) -> InventoryResult<PurchaseOrder> {
        if self.ledger.get_stock(code)?.is_none() {
            return Err(InventoryError::product_not_found(code.to_string()));
        }

        let created_at = self.clock.now();
        let order = self
            .orders
            .insert(|id| PurchaseOrder::new(id, code.clone(), quantity, created_at))?;

        tracing::info!(order_id = %order.id, %code, quantity, "purchase order created");
        Ok(order)
    }

    /// Approve an order. Approving twice is an idempotent no-op, logged.
    pub fn approve(&self, id: OrderId) -> InventoryResult<()> {
        self.orders.update(id, |order| {
            if order.approve() {
                tracing::info!(order_id = %id, "purchase order approved");
            } else {
                tracing::warn!(order_id = %id, "purchase order was already approved");
            }
            Ok(())
        })
    }

    /// Fulfill an approved order against a fiscal invoice: apply the
    /// purchase movement, then mark the order fulfilled. Returns the new
    /// stock quantity.
    pub fn fulfill(&self, id: OrderId, invoice_ref: &str) -> InventoryResult<i64> {
        // Validated before any state is read.
        let invoice = InvoiceRef::parse(invoice_ref)?;

        self.orders.update(id, |order| {
            order.ensure_fulfillable()?;

            let after =
                self.ledger
                    .apply_movement(&order.code, MovementCategory::Purchase, order.quantity)?;
            order.mark_fulfilled();

            tracing::info!(
                order_id = %id,
                code = %order.code,
                %invoice,
                after,
                "purchase order fulfilled"
            );
            Ok(after)
        })
    }

    pub fn get(&self, id: OrderId) -> InventoryResult<Option<PurchaseOrder>> {
        self.orders.get(id)
    }

    /// Orders still awaiting approval.
    pub fn open_orders(&self) -> InventoryResult<Vec<PurchaseOrder>> {
        self.orders.open_orders()
    }
}
