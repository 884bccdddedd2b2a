//! `stockroom-auth` — roles, actions and the access policy gate.

pub mod policy;
pub mod role;
pub mod user;

pub use policy::{AccessPolicy, Action};
pub use role::Role;
pub use user::{User, UserDirectory};
