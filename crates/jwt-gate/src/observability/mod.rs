//! Observability module for jwt-gate
//!
//! # Privacy by Default
//!
//! Token paths use `#[instrument(skip_all)]`, so bearer tokens, claim sets
//! and the signing secret never become span fields. Fields are categorized as:
//! - **SAFE**: Can be logged in plaintext (error categories, algorithms, timestamps)
//! - **NEVER**: Must never appear in logs (secrets, tokens, passwords)
//!
//! User ids are logged only at debug level.

pub mod metrics;

pub use metrics::{init_metrics_recorder, record_token_issuance, record_token_validation};
