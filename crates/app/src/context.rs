//! The inventory context: one explicit object wiring every component.
//!
//! Constructed once at process start and passed to callers — no ambient
//! singletons. Every gated method consults [`AccessPolicy`] before reading
//! any mutable state, then delegates to the owning component.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use stockroom_analytics::{StockAnalytics, StockClassification};
use stockroom_auth::{AccessPolicy, Action, Role, User, UserDirectory};
use stockroom_catalog::{Product, Thresholds};
use stockroom_core::{Clock, InventoryResult, OrderId, ProductCode, SystemClock};
use stockroom_ledger::{
    InMemoryLedgerStore, LedgerStore, Movement, MovementCategory, StockLedger, StockRecord,
};
use stockroom_purchasing::{InMemoryOrderStore, OrderStore, PurchaseOrder, PurchaseOrderWorkflow};

/// Fully wired inventory system.
pub struct Inventory<S = InMemoryLedgerStore, O = InMemoryOrderStore> {
    policy: AccessPolicy,
    ledger: StockLedger<S>,
    workflow: PurchaseOrderWorkflow<S, O>,
    analytics: StockAnalytics<S>,
    users: UserDirectory,
}

impl Inventory<InMemoryLedgerStore, InMemoryOrderStore> {
    /// In-memory system on the wall clock.
    pub fn in_memory() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// In-memory system on the supplied clock (deterministic in tests).
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(InMemoryLedgerStore::new()),
            Arc::new(InMemoryOrderStore::new()),
            clock,
        )
    }
}

impl<S: LedgerStore, O: OrderStore> Inventory<S, O> {
    pub fn new(store: Arc<S>, orders: Arc<O>, clock: Arc<dyn Clock>) -> Self {
        let ledger = StockLedger::new(store, Arc::clone(&clock));
        let workflow =
            PurchaseOrderWorkflow::new(ledger.clone(), orders, Arc::clone(&clock));
        let analytics = StockAnalytics::new(Arc::clone(ledger.store()), clock);
        Self {
            policy: AccessPolicy::new(),
            ledger,
            workflow,
            analytics,
            users: UserDirectory::new(),
        }
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    /// Register a user. Role numbers follow the classic scheme
    /// (1 stocker, 2 viewer, 3 manager).
    pub fn create_user(&self, name: &str, role_number: u8) -> InventoryResult<User> {
        let role = Role::from_number(role_number)?;
        self.users.create_user(name, role)
    }

    // ── stock ────────────────────────────────────────────────────────────

    pub fn register_product(
        &self,
        role: Role,
        code: &str,
        name: &str,
        category: &str,
        min: i64,
        regular: i64,
        max: i64,
        location: &str,
    ) -> InventoryResult<()> {
        self.policy.authorize(role, Action::RegisterProduct)?;
        let code = ProductCode::parse(code)?;
        let thresholds = Thresholds::new(min, regular, max)?;
        self.ledger
            .register_product(code, name, category, thresholds, location)
    }

    /// Generic movement entry point; `sell`/`purchase` are the common verbs.
    pub fn apply_movement(
        &self,
        role: Role,
        code: &ProductCode,
        category: MovementCategory,
        quantity: i64,
    ) -> InventoryResult<i64> {
        let action = match category {
            MovementCategory::Sale => Action::Sell,
            MovementCategory::Purchase => Action::Purchase,
            MovementCategory::Adjustment => Action::AdjustStock,
            MovementCategory::Relocation => Action::Relocate,
        };
        self.policy.authorize(role, action)?;
        self.ledger.apply_movement(code, category, quantity)
    }

    pub fn sell(&self, role: Role, code: &ProductCode, quantity: i64) -> InventoryResult<i64> {
        self.apply_movement(role, code, MovementCategory::Sale, quantity)
    }

    pub fn purchase(&self, role: Role, code: &ProductCode, quantity: i64) -> InventoryResult<i64> {
        self.apply_movement(role, code, MovementCategory::Purchase, quantity)
    }

    pub fn relocate(
        &self,
        role: Role,
        code: &ProductCode,
        new_location: &str,
    ) -> InventoryResult<()> {
        self.policy.authorize(role, Action::Relocate)?;
        self.ledger.relocate(code, new_location)
    }

    /// Ungated single-product lookup: every logged-in role may consult it.
    pub fn get_stock(&self, code: &ProductCode) -> InventoryResult<Option<StockRecord>> {
        self.ledger.get_stock(code)
    }

    // ── purchase orders ──────────────────────────────────────────────────

    pub fn create_order(
        &self,
        role: Role,
        code: &ProductCode,
        quantity: i64,
    ) -> InventoryResult<PurchaseOrder> {
        self.policy.authorize(role, Action::CreateOrder)?;
        self.workflow.create_order(code, quantity)
    }

    pub fn approve_order(&self, role: Role, id: OrderId) -> InventoryResult<()> {
        self.policy.authorize(role, Action::ApproveOrder)?;
        self.workflow.approve(id)
    }

    pub fn fulfill_order(
        &self,
        role: Role,
        id: OrderId,
        invoice_ref: &str,
    ) -> InventoryResult<i64> {
        self.policy.authorize(role, Action::FulfillOrder)?;
        self.workflow.fulfill(id, invoice_ref)
    }

    pub fn get_order(&self, id: OrderId) -> InventoryResult<Option<PurchaseOrder>> {
        self.workflow.get(id)
    }

    pub fn open_orders(&self, role: Role) -> InventoryResult<Vec<PurchaseOrder>> {
        self.policy.authorize(role, Action::ViewReports)?;
        self.workflow.open_orders()
    }

    // ── analytics ────────────────────────────────────────────────────────

    pub fn classify_stock(&self, role: Role) -> InventoryResult<StockClassification> {
        self.policy.authorize(role, Action::ViewReports)?;
        self.analytics.classify_stock()
    }

    pub fn recent_movements(
        &self,
        role: Role,
        window: Duration,
    ) -> InventoryResult<Vec<Movement>> {
        self.policy.authorize(role, Action::ViewReports)?;
        self.analytics.recent_movements(window)
    }

    pub fn unsold_since(
        &self,
        role: Role,
        cutoff: DateTime<Utc>,
    ) -> InventoryResult<Vec<Product>> {
        self.policy.authorize(role, Action::ViewDetailedAnalysis)?;
        self.analytics.unsold_since(cutoff)
    }

    pub fn over_repurchased(
        &self,
        role: Role,
        window: Duration,
        threshold: usize,
    ) -> InventoryResult<std::collections::BTreeMap<ProductCode, usize>> {
        self.policy.authorize(role, Action::ViewDetailedAnalysis)?;
        self.analytics.over_repurchased(window, threshold)
    }
}
