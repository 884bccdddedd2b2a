//! `stockroom-app` — composition root.
//!
//! Builds the whole system once as an explicit [`Inventory`] context and
//! exposes one role-gated call per operation. The interactive layer above
//! this (prompting, session lookup, printing) is a collaborator, not part
//! of this crate.

pub mod context;

pub use context::Inventory;
pub use stockroom_core::{InventoryError, InventoryResult};
pub use stockroom_observability::init as init_observability;
