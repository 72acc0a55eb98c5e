//! # jwt-gate Test Utilities
//!
//! Shared test utilities for jwt-gate.
//!
//! This crate provides:
//! - Deterministic fixtures (signing configuration, users with known passwords)
//! - Test token builder (hand-crafted claim sets, foreign secrets and algorithms)
//! - Server test harness (TestServer for E2E tests over real HTTP)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jwt_gate_test_utils::*;
//!
//! #[tokio::test]
//! async fn test_example() -> anyhow::Result<()> {
//!     let server = TestServer::spawn([test_user(42)]).await?;
//!
//!     let token = TestTokenBuilder::new().for_user(42).expired().sign();
//!     // ... call server.url() with the token
//!     Ok(())
//! }
//! ```

pub mod fixtures;
pub mod server_harness;
pub mod token_builders;

// Re-export commonly used items
pub use fixtures::*;
pub use server_harness::*;
pub use token_builders::*;
