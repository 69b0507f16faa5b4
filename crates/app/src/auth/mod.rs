//! Authentication
//!
//! Mock sign-in against the ReqRes API. Tokens are opaque and only prove that the API
//! accepted the credentials.

mod errors;
mod models;
mod reqres;
mod service;

pub use errors::AuthError;
pub use models::{AuthToken, Credentials};
pub use reqres::{ReqresClient, ReqresConfig};
pub use service::*;
