//! Strongly-typed identifiers used across the domain.
//!
//! Surrogate keys are plain integers assigned by the backing store;
//! `ProductCode` is the natural business key joining products, stock,
//! movements and purchase orders.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

/// Identifier of a movement log entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovementId(u64);

/// Identifier of a purchase order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

/// Identifier of a user (actor identity).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

macro_rules! impl_u64_newtype {
    ($t:ty) => {
        impl $t {
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<u64> for $t {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl From<$t> for u64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }
    };
}

impl_u64_newtype!(MovementId);
impl_u64_newtype!(OrderId);
impl_u64_newtype!(UserId);

/// Maximum code length, matching the `VARCHAR(7)` business key.
const PRODUCT_CODE_MAX_LEN: usize = 7;

/// Natural product key, e.g. `CAM-001`.
///
/// Immutable once assigned. Uppercase letters, digits and dashes only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, InventoryError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(InventoryError::validation("product code cannot be empty"));
        }
        if raw.len() > PRODUCT_CODE_MAX_LEN {
            return Err(InventoryError::validation(format!(
                "product code '{raw}' exceeds {PRODUCT_CODE_MAX_LEN} characters"
            )));
        }
        if !raw
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-')
        {
            return Err(InventoryError::validation(format!(
                "product code '{raw}' contains invalid characters"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ProductCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProductCode {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
