//! jwt-gate library
//!
//! Stateless bearer-token authentication for HTTP services: HMAC-signed JWT
//! issuance and verification, per-request identity resolution against an
//! identity store, and an axum middleware that rejects unauthenticated
//! requests with a uniform 401 JSON body.
//!
//! Exposed as a library so integration tests and embedding services can
//! build the router directly.

pub mod config;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod observability;
pub mod repositories;
pub mod routes;
pub mod services;
