//! Middleware for jwt-gate.
//!
//! # Components
//!
//! - `auth` - Authentication middleware for protected routes

pub mod auth;

pub use auth::{require_auth, AuthContext, AuthState};
