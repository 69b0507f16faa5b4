//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use iara::{session::SessionStore, validation::RegistrationForm};
use mockall::automock;
use tracing::info;

use crate::auth::{AuthError, AuthToken, Credentials};

/// Mock auth API operations.
#[automock]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token.
    async fn login(&self, credentials: &Credentials) -> Result<AuthToken, AuthError>;

    /// Create an account and return its token.
    async fn register(&self, credentials: &Credentials) -> Result<AuthToken, AuthError>;
}

/// Signs users in and out, keeping the session store in step with the auth API.
#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn AuthApi>,
    session: SessionStore,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Pair an auth API with the session it signs in to.
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, session: SessionStore) -> Self {
        Self { api, session }
    }

    /// Log in and remember the session.
    ///
    /// # Errors
    ///
    /// Returns an error when the API rejects the credentials or the session cannot be saved.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthToken, AuthError> {
        let token = self.api.login(credentials).await?;

        self.session.sign_in(&token.token, &credentials.email)?;

        info!(email = %credentials.email, "signed in");

        Ok(token)
    }

    /// Register an account, sign it in and save its address.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] before any request when the form is invalid.
    pub async fn register(&self, form: &RegistrationForm) -> Result<AuthToken, AuthError> {
        form.validate().map_err(AuthError::Validation)?;

        let credentials = Credentials::new(form.email.clone(), form.password.clone());
        let token = self.api.register(&credentials).await?;

        self.session.sign_in(&token.token, &credentials.email)?;
        self.session.save_address(&form.to_stored_address())?;

        info!(email = %credentials.email, "registered");

        Ok(token)
    }

    /// Forget the session. Local only; the API is not called.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be cleared.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.session.sign_out()?;

        info!("signed out");

        Ok(())
    }

    /// The signed-in email, if any.
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be read.
    pub fn current_user(&self) -> Result<Option<String>, AuthError> {
        Ok(self.session.email()?)
    }
}
