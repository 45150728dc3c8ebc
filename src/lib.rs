//! ssh-key-retriever - resolve SSH public keys for federated identities
//!
//! This library backs an `AuthorizedKeysCommand` helper: given a combined
//! `<orgId>_<username>` identifier it queries a remote directory service over
//! HTTPS, keeps the records belonging to the requested organization, and
//! renders their SSH public keys one per line.

pub mod cli;
pub mod config;
pub mod directory;
pub mod error;
pub mod identity;
pub mod keys;

pub use error::{Error, Result};

/// Package version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const NAME: &str = env!("CARGO_PKG_NAME");
