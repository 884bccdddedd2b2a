//! `stockroom-ledger` — current stock levels plus the append-only movement log.
//!
//! Every quantity change goes through [`StockLedger`]: read current state,
//! validate, write the new quantity and append one movement as a single
//! atomic unit scoped to the product code.

pub mod ledger;
pub mod movement;
pub mod stock;
pub mod store;

pub use ledger::StockLedger;
pub use movement::{Movement, MovementCategory, MovementChange};
pub use stock::StockRecord;
pub use store::{InMemoryLedgerStore, LedgerStore, ProductSlot};
