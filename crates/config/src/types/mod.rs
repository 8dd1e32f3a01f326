//! Configuration type definitions for estack.
//!
//! Responsibilities:
//! - Define configuration types for authentication, connections and index setup.
//! - Provide serialization helpers for sensitive types (secrets, durations).
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Validation of the index mode text (the client crate owns the `IndexMode` enum).
//! - Actual network connections or authentication (see client crate).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.

mod auth;
pub(crate) mod connection;
mod index;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig};
pub use index::IndexConfig;
