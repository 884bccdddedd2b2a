//! Invoice (NF) reference validation.

use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryError, InventoryResult};

/// Validated fiscal invoice reference, e.g. `NF123456`.
///
/// A well-formed reference is `NF` followed by digits. Verification against
/// an external fiscal registry is a collaborator concern; this type only
/// guarantees shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceRef(String);

impl InvoiceRef {
    pub fn parse(raw: impl AsRef<str>) -> InventoryResult<Self> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(InventoryError::invalid_invoice("reference cannot be empty"));
        }

        let digits = raw
            .strip_prefix("NF")
            .ok_or_else(|| InventoryError::invalid_invoice(format!("'{raw}' must start with NF")))?;
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(InventoryError::invalid_invoice(format!(
                "'{raw}' must be NF followed by digits"
            )));
        }

        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for InvoiceRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
