//! Access roles.

use serde::{Deserialize, Serialize};

use stockroom_core::InventoryError;

/// Access level of a user. The numeric values are the role numbers users
/// identify themselves with; roles are immutable once assigned.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Receives goods and fulfills replenishment orders.
    Stocker = 1,
    /// Sells, requests replenishment and reads reports.
    Viewer = 2,
    /// Full access, including approval and detailed analysis.
    Manager = 3,
}

impl Role {
    pub fn from_number(n: u8) -> Result<Self, InventoryError> {
        match n {
            1 => Ok(Self::Stocker),
            2 => Ok(Self::Viewer),
            3 => Ok(Self::Manager),
            other => Err(InventoryError::validation(format!(
                "unknown role number {other}"
            ))),
        }
    }

    pub fn number(&self) -> u8 {
        *self as u8
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Role::Stocker => "stocker",
            Role::Viewer => "viewer",
            Role::Manager => "manager",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_numbers_round_trip() {
        for role in [Role::Stocker, Role::Viewer, Role::Manager] {
            assert_eq!(Role::from_number(role.number()).unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_number_is_rejected() {
        assert!(matches!(
            Role::from_number(0),
            Err(InventoryError::Validation(_))
        ));
        assert!(Role::from_number(4).is_err());
    }
}
