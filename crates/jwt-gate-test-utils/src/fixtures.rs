//! Deterministic test fixtures.

use common::types::UserId;
use jwt_gate::config::SigningConfig;
use jwt_gate::repositories::User;

/// Signing secret used by every test server and token.
pub const TEST_SECRET: &str = "s3cr3t";

/// Issuer used by every test server and token.
pub const TEST_ISSUER: &str = "TestApp";

/// Plaintext password of every user from [`test_user`].
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Minimum bcrypt cost, keeps fixture creation fast.
const TEST_BCRYPT_COST: u32 = 4;

/// Signing configuration: HS256, 6 hour ttl, [`TEST_SECRET`], [`TEST_ISSUER`].
pub fn test_signing_config() -> SigningConfig {
    SigningConfig::new(TEST_SECRET, TEST_ISSUER)
}

/// A user with id `id`, email `user{id}@example.com` and password [`TEST_PASSWORD`].
pub fn test_user(id: i64) -> User {
    User {
        id: UserId(id),
        email: format!("user{id}@example.com"),
        display_name: format!("Test User {id}"),
        password_hash: bcrypt::hash(TEST_PASSWORD, TEST_BCRYPT_COST)
            .expect("bcrypt hashing should not fail"),
    }
}
