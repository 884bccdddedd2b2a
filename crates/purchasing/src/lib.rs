//! `stockroom-purchasing` — replenishment request workflow.
//!
//! Orders move forward only: `Requested → Approved → Fulfilled`. Fulfillment
//! is the single point where the workflow touches stock, through the ledger.

pub mod invoice;
pub mod order;
pub mod store;
pub mod workflow;

pub use invoice::InvoiceRef;
pub use order::PurchaseOrder;
pub use store::{InMemoryOrderStore, OrderStore};
pub use workflow::PurchaseOrderWorkflow;
