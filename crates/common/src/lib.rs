//! Common utilities and types shared across jwt-gate components.

#![warn(clippy::pedantic)]

/// Module for common data types
pub mod types;

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for JWT pre-verification utilities (size limits, header inspection)
pub mod jwt;
