//! App Context

use std::{io, path::PathBuf, sync::Arc};

use iara::{
    cart::{CartError, CartManager},
    checkout::CheckoutOrchestrator,
    clock::SystemClock,
    orders::OrderStore,
    session::SessionStore,
    storage::{FileStorage, Storage},
};
use thiserror::Error;

use crate::{
    address::{AddressLookup, ViaCepClient},
    auth::{AuthService, ReqresClient, ReqresConfig},
    catalog::{CatalogApi, RawgClient, RawgConfig},
    config::AppConfig,
    http,
    settlement::DelayedSettlement,
};

/// Errors raised while wiring up the application.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The data directory could not be created.
    #[error("failed to open data directory {}", path.display())]
    Storage {
        /// Configured data directory.
        path: PathBuf,

        /// I/O error.
        #[source]
        source: io::Error,
    },

    /// The shared HTTP client could not be built.
    #[error("failed to build HTTP client")]
    Http(#[source] reqwest::Error),
}

/// Checkout as wired up for the application.
pub type AppCheckout = CheckoutOrchestrator<SystemClock, DelayedSettlement>;

/// Services shared by every command.
#[derive(Clone)]
pub struct AppContext {
    /// Persisted cart, orders and session.
    pub storage: Arc<dyn Storage>,

    /// Game catalog.
    pub catalog: Arc<dyn CatalogApi>,

    /// Postal-code lookup.
    pub address: Arc<dyn AddressLookup>,

    /// Sign-in and registration.
    pub auth: AuthService,

    settlement: DelayedSettlement,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("storage", &self.storage)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the data directory cannot be created or the HTTP client
    /// cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let data_dir = &config.storage.data_dir;
        let storage: Arc<dyn Storage> =
            Arc::new(
                FileStorage::open(data_dir).map_err(|source| AppInitError::Storage {
                    path: data_dir.clone(),
                    source,
                })?,
            );

        let http = http::client(config.http.timeout()).map_err(AppInitError::Http)?;

        let catalog = RawgClient::new(
            RawgConfig {
                base_url: config.catalog.rawg_base_url.clone(),
                api_key: config.catalog.rawg_api_key.clone(),
            },
            http.clone(),
        );

        let address = ViaCepClient::new(config.address.viacep_base_url.clone(), http.clone());

        let auth = ReqresClient::new(
            ReqresConfig {
                base_url: config.auth.reqres_base_url.clone(),
                api_key: config.auth.reqres_api_key.clone(),
            },
            http,
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            address: Arc::new(address),
            auth: AuthService::new(Arc::new(auth), SessionStore::new(storage.clone())),
            settlement: DelayedSettlement::new(config.checkout.settlement_delay()),
            storage,
        })
    }

    /// Load the persisted cart.
    ///
    /// # Errors
    ///
    /// Returns an error when the cart cannot be read.
    pub fn cart(&self) -> Result<CartManager, CartError> {
        CartManager::load(self.storage.clone())
    }

    /// A checkout over the application storage, clock and card settlement.
    pub fn checkout(&self) -> AppCheckout {
        CheckoutOrchestrator::new(self.storage.clone(), SystemClock, self.settlement)
    }

    /// Pending order and history.
    pub fn orders(&self) -> OrderStore {
        OrderStore::new(self.storage.clone())
    }

    /// Signed-in user.
    pub fn session(&self) -> SessionStore {
        SessionStore::new(self.storage.clone())
    }
}

#[cfg(test)]
mod tests {
    use iara::checkout::CheckoutState;
    use tempfile::TempDir;
    use testresult::TestResult;

    use crate::config::fixtures::parse;

    use super::*;

    #[test]
    fn creates_data_dir_and_starts_empty() -> TestResult {
        let dir = TempDir::new()?;
        let data_dir = dir.path().join("nested").join("data");
        let data_dir_arg = data_dir.to_str().ok_or("non-utf8 temp path")?;

        let context = AppContext::from_config(&parse(&["--data-dir", data_dir_arg])?)?;

        assert!(data_dir.is_dir());
        assert!(context.cart()?.is_empty());
        assert!(context.orders().pending()?.is_none());
        assert!(!context.session().is_authenticated()?);
        assert_eq!(context.checkout().state(), &CheckoutState::default());

        Ok(())
    }
}
