//! Service layer for jwt-gate.
//!
//! # Components
//!
//! - `token_validator` - decode, expiry check and identity resolution
//! - `login_service` - password login and token issuance

pub mod login_service;
pub mod token_validator;

pub use token_validator::{Authenticated, TokenValidator};
