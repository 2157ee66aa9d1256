//! Local key-value persistence for cart snapshots.
//!
//! The cart is convenience state, not a system of record: a store only needs
//! to hand back the last value written under a key. Two backends exist:
//!
//! - [`FileStore`] - one file per key under a data directory (used by the CLI)
//! - [`MemoryStore`] - in-process map (tests, and hosts with no disk)
//!
//! Writes overwrite unconditionally. Two processes sharing a store resolve
//! conflicts by last writer wins.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Default key the cart snapshot is stored under.
pub const DEFAULT_CART_KEY: &str = "ebooks-cart";

/// Errors that can occur when reading or writing a store.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Key cannot be used as a storage address.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Store is not usable (e.g., a poisoned lock).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// A synchronous string key-value store.
pub trait KeyValueStore {
    /// Read the value last written under `key`, or `None` if never written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reject keys that are empty or could escape a storage directory.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_owned()))
    }
}
