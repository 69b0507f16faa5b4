//! Session
//!
//! The signed-in user: auth token, email and saved address. Token and email are stored as
//! plain strings; the address as JSON.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    address::StoredAddress,
    storage::{Storage, StorageError, StorageExt, StorageKey},
};

/// Errors raised by the [`SessionStore`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// A session key could not be read or written.
    #[error("session storage error")]
    Storage(#[from] StorageError),
}

/// Persisted sign-in state.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: Arc<dyn Storage>,
}

impl SessionStore {
    /// Create a store over the given storage.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Record a successful sign-in.
    ///
    /// # Errors
    ///
    /// Returns an error when either key cannot be written.
    pub fn sign_in(&self, token: &str, email: &str) -> Result<(), SessionError> {
        self.storage.set(StorageKey::AuthToken, token)?;
        self.storage.set(StorageKey::UserEmail, email)?;

        Ok(())
    }

    /// Forget the token and email. The saved address is kept.
    ///
    /// # Errors
    ///
    /// Returns an error when either key cannot be removed.
    pub fn sign_out(&self) -> Result<(), SessionError> {
        self.storage.remove(StorageKey::AuthToken)?;
        self.storage.remove(StorageKey::UserEmail)?;

        Ok(())
    }

    /// Whether a token is stored.
    ///
    /// # Errors
    ///
    /// Returns an error when the token cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, SessionError> {
        Ok(self.token()?.is_some())
    }

    /// Stored auth token.
    ///
    /// # Errors
    ///
    /// Returns an error when the token cannot be read.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .storage
            .get(StorageKey::AuthToken)?
            .filter(|token| !token.is_empty()))
    }

    /// Email of the signed-in user. Only reported while a token is present.
    ///
    /// # Errors
    ///
    /// Returns an error when a key cannot be read.
    pub fn email(&self) -> Result<Option<String>, SessionError> {
        if !self.is_authenticated()? {
            return Ok(None);
        }

        Ok(self.storage.get(StorageKey::UserEmail)?)
    }

    /// Address saved at registration. A corrupt entry reads as absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the key cannot be read.
    pub fn address(&self) -> Result<Option<StoredAddress>, SessionError> {
        Ok(self.storage.load_or_default(StorageKey::UserAddress)?)
    }

    /// Save the user's address.
    ///
    /// # Errors
    ///
    /// Returns an error when the key cannot be written.
    pub fn save_address(&self, address: &StoredAddress) -> Result<(), SessionError> {
        Ok(self.storage.save(StorageKey::UserAddress, address)?)
    }
}
