//! Configuration management for estack.
//!
//! This crate provides types and loaders for the cluster connection and index
//! setup configuration, read from `.env` files, environment variables and a
//! JSON config file.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, FileConfig, env_var_or_none};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig, IndexConfig};

#[cfg(test)]
pub(crate) mod test_util {
    use std::sync::{Mutex, OnceLock};

    pub fn global_test_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
    }
}
