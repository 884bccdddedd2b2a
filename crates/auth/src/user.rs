//! User records and lookup.
//!
//! Credential handling is out of scope; a user is an id, a display name and
//! an immutable role. The directory only supports creation and lookup —
//! there is no role-edit path.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use stockroom_core::{InventoryError, InventoryResult, UserId};

use crate::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub role: Role,
}

/// In-memory user store with surrogate integer ids.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: RwLock<HashMap<UserId, User>>,
    next_id: AtomicU64,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn create_user(&self, name: impl Into<String>, role: Role) -> InventoryResult<User> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::validation("user name cannot be empty"));
        }

        let id = UserId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let user = User { id, name, role };

        let mut users = self
            .users
            .write()
            .map_err(|_| InventoryError::storage("user directory lock poisoned"))?;
        users.insert(id, user.clone());

        tracing::info!(user_id = %id, %role, "user created");
        Ok(user)
    }

    pub fn find(&self, id: UserId) -> InventoryResult<Option<User>> {
        let users = self
            .users
            .read()
            .map_err(|_| InventoryError::storage("user directory lock poisoned"))?;
        Ok(users.get(&id).cloned())
    }
}
