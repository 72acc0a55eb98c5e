//! Data access layer.

pub mod users;

pub use users::{Identity, IdentityStore, PgIdentityStore, User};
