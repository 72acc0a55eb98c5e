//! Secret types for protecting sensitive values from accidental logging.
//!
//! Re-exports the [`secrecy`] wrappers used for the JWT signing secret and
//! passwords submitted to the login endpoint.
//!
//! `SecretString` implements `Debug` with redaction, so any struct deriving
//! `Debug` that holds one (e.g. `SigningConfig`) is safe to log with `{:?}`
//! or as a tracing field. The value is zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct Signing {
//!     issuer: String,
//!     secret: SecretString,
//! }
//!
//! let signing = Signing {
//!     issuer: "TestApp".to_string(),
//!     secret: SecretString::from("s3cr3t"),
//! };
//!
//! assert!(!format!("{signing:?}").contains("s3cr3t"));
//!
//! // The HMAC key is only reachable through an explicit call
//! let key: &[u8] = signing.secret.expose_secret().as_bytes();
//! assert_eq!(key, b"s3cr3t");
//! ```

pub use secrecy::{ExposeSecret, SecretString};
