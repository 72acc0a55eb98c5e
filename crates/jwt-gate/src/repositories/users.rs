//! User repository: the identity store behind token validation.
//!
//! The validator only ever asks one question of the store, "which user has
//! this id?", and asks it fresh on every validation. Nothing is cached here.

use crate::errors::AuthError;
use async_trait::async_trait;
use common::types::UserId;
use sqlx::PgPool;
use std::fmt;

/// Anything a token can be issued for.
pub trait Identity {
    /// Unique id, copied into the `sub` claim.
    fn identity_id(&self) -> UserId;
}

/// User record.
#[derive(Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
}

impl Identity for User {
    fn identity_id(&self) -> UserId {
        self.id
    }
}

impl Identity for UserId {
    fn identity_id(&self) -> UserId {
        *self
    }
}

/// Custom Debug implementation that redacts the password hash.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Identity store contract.
///
/// Lookups are awaited directly by the validator with no timeout of its own;
/// implementations own their timeout and retry policy.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find the user whose id equals `id`.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError>;

    /// Find the user with the given email (used by login).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError>;
}

/// Row shape of the `users` table.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    display_name: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: UserId(row.id),
            email: row.email,
            display_name: row.display_name,
            password_hash: row.password_hash,
        }
    }
}

/// PostgreSQL-backed identity store.
#[derive(Clone)]
pub struct PgIdentityStore {
    pool: PgPool,
}

impl PgIdentityStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IdentityStore for PgIdentityStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, display_name, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::IdentityStore(format!("Failed to fetch user by id: {}", e)))?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, display_name, password_hash
            FROM users
            WHERE lower(email) = lower($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::IdentityStore(format!("Failed to fetch user by email: {}", e)))?;

        Ok(row.map(User::from))
    }
}

/// Mock identity store module for testing.
///
/// This module provides an in-memory identity store that counts lookups.
pub mod mock {

    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    /// In-memory identity store for unit and integration tests.
    #[derive(Default)]
    pub struct MockIdentityStore {
        /// Users by id.
        users: RwLock<HashMap<UserId, User>>,
        /// Number of lookups made (by id or by email).
        call_count: AtomicUsize,
        /// Whether to return errors.
        return_error: bool,
    }

    impl MockIdentityStore {
        /// Create an empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Create a store pre-populated with `users`.
        pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
            let store = Self::new();
            for user in users {
                store.insert(user);
            }
            store
        }

        /// Create a store whose every lookup fails.
        pub fn failing() -> Self {
            Self {
                return_error: true,
                ..Self::default()
            }
        }

        /// Add or replace a user.
        pub fn insert(&self, user: User) {
            if let Ok(mut users) = self.users.write() {
                users.insert(user.id, user);
            }
        }

        /// Remove a user, returning it if present.
        pub fn remove(&self, id: UserId) -> Option<User> {
            self.users.write().ok()?.remove(&id)
        }

        /// Get the number of lookups made.
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        fn check_available(&self) -> Result<(), AuthError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);

            if self.return_error {
                return Err(AuthError::IdentityStore(
                    "Mock identity store error".to_string(),
                ));
            }

            Ok(())
        }
    }

    #[async_trait]
    impl IdentityStore for MockIdentityStore {
        async fn find_by_id(&self, id: UserId) -> Result<Option<User>, AuthError> {
            self.check_available()?;

            let users = self
                .users
                .read()
                .map_err(|_| AuthError::IdentityStore("Mock store lock poisoned".to_string()))?;

            Ok(users.get(&id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
            self.check_available()?;

            let users = self
                .users
                .read()
                .map_err(|_| AuthError::IdentityStore("Mock store lock poisoned".to_string()))?;

            Ok(users
                .values()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned())
        }
    }
}
