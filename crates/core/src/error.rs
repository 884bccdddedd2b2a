//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// guards, invariants). A business-rule violation never crashes the process;
/// only `Storage` wraps failures of the backing store itself.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Threshold triple violates `0 <= min < regular < max`.
    #[error("invalid thresholds: {0}")]
    InvalidThresholds(String),

    /// A product with this code is already registered.
    #[error("duplicate product code: {0}")]
    DuplicateProductCode(String),

    /// No product registered under this code.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Movement quantity was zero, mis-signed, or otherwise malformed.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// An outgoing movement would drive stock below zero.
    #[error("insufficient stock: {0}")]
    InsufficientStock(String),

    /// No purchase order with this id.
    #[error("order not found: {0}")]
    OrderNotFound(String),

    /// Fulfillment attempted before approval.
    #[error("order not approved: {0}")]
    OrderNotApproved(String),

    /// Fulfillment attempted twice.
    #[error("order already fulfilled: {0}")]
    AlreadyFulfilled(String),

    /// Invoice reference failed validation.
    #[error("invalid invoice: {0}")]
    InvalidInvoice(String),

    /// The caller's role does not permit the action.
    #[error("access denied: {0}")]
    AccessDenied(String),

    /// Failure of the backing store (e.g. a poisoned lock). Any in-flight
    /// multi-write is rolled back entirely.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_thresholds(msg: impl Into<String>) -> Self {
        Self::InvalidThresholds(msg.into())
    }

    pub fn duplicate_product_code(msg: impl Into<String>) -> Self {
        Self::DuplicateProductCode(msg.into())
    }

    pub fn product_not_found(msg: impl Into<String>) -> Self {
        Self::ProductNotFound(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn insufficient_stock(msg: impl Into<String>) -> Self {
        Self::InsufficientStock(msg.into())
    }

    pub fn order_not_found(msg: impl Into<String>) -> Self {
        Self::OrderNotFound(msg.into())
    }

    pub fn order_not_approved(msg: impl Into<String>) -> Self {
        Self::OrderNotApproved(msg.into())
    }

    pub fn already_fulfilled(msg: impl Into<String>) -> Self {
        Self::AlreadyFulfilled(msg.into())
    }

    pub fn invalid_invoice(msg: impl Into<String>) -> Self {
        Self::InvalidInvoice(msg.into())
    }

    pub fn access_denied(msg: impl Into<String>) -> Self {
        Self::AccessDenied(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
