//! Purchase order entity and its state machine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryError, InventoryResult, OrderId, ProductCode};

/// A replenishment request. Transitions only move forward; an order that is
/// never approved simply stays unapproved (implicit rejection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: OrderId,
    pub code: ProductCode,
    pub quantity: i64,
    pub approved: bool,
    pub fulfilled: bool,
    pub created_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub fn new(
        id: OrderId,
        code: ProductCode,
        quantity: i64,
        created_at: DateTime<Utc>,
    ) -> InventoryResult<Self> {
        if quantity <= 0 {
            return Err(InventoryError::invalid_quantity(format!(
                "order quantity must be positive (got {quantity})"
            )));
        }
        Ok(Self {
            id,
            code,
            quantity,
            approved: false,
            fulfilled: false,
            created_at,
        })
    }

    /// Approve the order. Approving an already-approved order is an
    /// idempotent no-op; the caller decides whether to log it.
    pub fn approve(&mut self) -> bool {
        let changed = !self.approved;
        self.approved = true;
        changed
    }

    /// Guards that must hold before fulfillment may touch stock.
    pub fn ensure_fulfillable(&self) -> InventoryResult<()> {
        if !self.approved {
            return Err(InventoryError::order_not_approved(self.id.to_string()));
        }
        if self.fulfilled {
            return Err(InventoryError::already_fulfilled(self.id.to_string()));
        }
        Ok(())
    }

    /// Terminal transition; only valid after `ensure_fulfillable`.
    pub fn mark_fulfilled(&mut self) {
        debug_assert!(self.approved && !self.fulfilled);
        self.fulfilled = true;
    }

    /// Still waiting for a manager's approval.
    pub fn is_open(&self) -> bool {
        !self.approved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn order() -> PurchaseOrder {
        PurchaseOrder::new(
            OrderId::new(1),
            ProductCode::parse("P-001").unwrap(),
            15,
            Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn non_positive_quantity_is_rejected() {
        for qty in [0, -15] {
            let err = PurchaseOrder::new(
                OrderId::new(1),
                ProductCode::parse("P-001").unwrap(),
                qty,
                Utc::now(),
            )
            .unwrap_err();
            assert!(matches!(err, InventoryError::InvalidQuantity(_)));
        }
    }

    #[test]
    fn new_order_is_open_and_unfulfillable() {
        let order = order();
        assert!(order.is_open());
        assert!(matches!(
            order.ensure_fulfillable(),
            Err(InventoryError::OrderNotApproved(_))
        ));
    }

    #[test]
    fn approve_is_idempotent() {
        let mut order = order();
        assert!(order.approve());
        assert!(!order.approve());
        assert!(order.approved);
        assert!(!order.is_open());
    }

    #[test]
    fn fulfillment_transitions_forward_only() {
        let mut order = order();
        order.approve();
        order.ensure_fulfillable().unwrap();
        order.mark_fulfilled();

        assert!(matches!(
            order.ensure_fulfillable(),
            Err(InventoryError::AlreadyFulfilled(_))
        ));
    }
}
