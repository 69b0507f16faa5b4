//! Storage
//!
//! Key-value persistence surface for the storefront. Every key is read and written
//! independently; there is no transaction spanning two keys.

use std::{fmt, io};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::warn;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Persisted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    /// Cart contents.
    Cart,

    /// The single order awaiting an asynchronous payment.
    PendingOrder,

    /// Completed orders, oldest first.
    OrdersHistory,

    /// Token returned by the auth API.
    AuthToken,

    /// Email of the signed-in user.
    UserEmail,

    /// Address captured at registration.
    UserAddress,
}

impl StorageKey {
    /// Every key, in a stable order.
    pub const ALL: [StorageKey; 6] = [
        Self::Cart,
        Self::PendingOrder,
        Self::OrdersHistory,
        Self::AuthToken,
        Self::UserEmail,
        Self::UserAddress,
    ];

    /// Name the key is persisted under.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "iara_cart",
            Self::PendingOrder => "pending_order",
            Self::OrdersHistory => "orders_history",
            Self::AuthToken => "auth_token",
            Self::UserEmail => "user_email",
            Self::UserAddress => "user_address",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised by storage backends and the typed helpers in [`StorageExt`].
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend failed to read or write a key.
    #[error("failed to access `{key}`")]
    Io {
        /// Key being accessed.
        key: StorageKey,

        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A value could not be serialized before writing.
    #[error("failed to serialize `{key}`")]
    Serialize {
        /// Key being written.
        key: StorageKey,

        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A persisted value is not valid JSON for its type.
    #[error("persisted value for `{key}` is corrupt")]
    Corrupt {
        /// Key being read.
        key: StorageKey,

        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory backend lock was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// Raw string key-value store.
pub trait Storage: Send + Sync + fmt::Debug {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn get(&self, key: StorageKey) -> Result<Option<String>, StorageError>;

    /// Replace the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn set(&self, key: StorageKey, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be written.
    fn remove(&self, key: StorageKey) -> Result<(), StorageError>;

    /// Remove every key.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when any key cannot be removed.
    fn clear(&self) -> Result<(), StorageError> {
        StorageKey::ALL
            .into_iter()
            .try_for_each(|key| self.remove(key))
    }
}

/// JSON helpers over any [`Storage`].
pub trait StorageExt: Storage {
    /// Load and deserialize `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] when the value does not parse, or the backend error.
    fn load<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Corrupt { key, source })
    }

    /// Load `key`, falling back to the default when it is missing or corrupt.
    ///
    /// # Errors
    ///
    /// Returns the backend error when the key cannot be read at all.
    fn load_or_default<T: DeserializeOwned + Default>(
        &self,
        key: StorageKey,
    ) -> Result<T, StorageError> {
        match self.load(key) {
            Ok(value) => Ok(value.unwrap_or_default()),
            Err(StorageError::Corrupt { key, source }) => {
                warn!(%key, error = %source, "discarding corrupt persisted value");

                Ok(T::default())
            }
            Err(error) => Err(error),
        }
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when serialization or the write fails.
    fn save<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(value).map_err(|source| StorageError::Serialize { key, source })?;

        self.set(key, &raw)
    }
}

impl<S: Storage + ?Sized> StorageExt for S {}
