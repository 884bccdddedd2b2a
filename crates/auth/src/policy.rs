//! Capability table consulted before every gated operation.
//!
//! One central mapping instead of per-method role-number comparisons. The
//! check is pure policy: no IO, no panics, no business logic, and it runs
//! before any read of mutable state.

use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryError, InventoryResult};

use crate::Role;

/// Everything a caller can ask the system to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    RegisterProduct,
    Sell,
    Purchase,
    AdjustStock,
    Relocate,
    CreateOrder,
    ApproveOrder,
    FulfillOrder,
    ViewReports,
    ViewDetailedAnalysis,
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Action::RegisterProduct => "register_product",
            Action::Sell => "sell",
            Action::Purchase => "purchase",
            Action::AdjustStock => "adjust_stock",
            Action::Relocate => "relocate",
            Action::CreateOrder => "create_order",
            Action::ApproveOrder => "approve_order",
            Action::FulfillOrder => "fulfill_order",
            Action::ViewReports => "view_reports",
            Action::ViewDetailedAnalysis => "view_detailed_analysis",
        };
        f.write_str(name)
    }
}

/// Role/action capability gate.
#[derive(Debug, Default, Clone, Copy)]
pub struct AccessPolicy;

impl AccessPolicy {
    pub fn new() -> Self {
        Self
    }

    /// True when `role` is allowed to perform `action`.
    pub fn permits(&self, role: Role, action: Action) -> bool {
        match role {
            Role::Manager => true,
            Role::Stocker => matches!(action, Action::Purchase | Action::FulfillOrder),
            Role::Viewer => matches!(
                action,
                Action::Sell | Action::CreateOrder | Action::ViewReports | Action::RegisterProduct
            ),
        }
    }

    /// Check `role` against `action`, returning `AccessDenied` on refusal.
    pub fn authorize(&self, role: Role, action: Action) -> InventoryResult<()> {
        if self.permits(role, action) {
            Ok(())
        } else {
            tracing::warn!(%role, %action, "access denied");
            Err(InventoryError::access_denied(format!(
                "role '{role}' may not perform '{action}'"
            )))
        }
    }
}
