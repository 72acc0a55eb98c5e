//! HTTP request handlers for jwt-gate.

pub mod health;
pub mod login;
pub mod me;
pub mod metrics;

pub use health::health_check;
pub use login::handle_login;
pub use me::get_me;
pub use metrics::metrics_handler;
