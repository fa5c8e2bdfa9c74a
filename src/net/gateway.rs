//! Auth endpoints consumed by the session store.

use std::sync::Arc;

use super::types::{Credentials, LoginResponse, VerifyResponse};
use crate::error::ApiError;

pub const LOGIN_PATH: &str = "/auth/login";
pub const VERIFY_PATH: &str = "/auth/verify";

/// The remote half of authentication.
///
/// Futures are not required to be `Send`: the browser runs everything on one
/// event loop.
#[allow(async_fn_in_trait)]
pub trait AuthGateway {
    /// Exchange credentials for a token and user record.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// Check that `token` is still valid and fetch the current user.
    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError>;
}

impl<T: AuthGateway> AuthGateway for Arc<T> {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        (**self).login(credentials).await
    }

    async fn verify(&self, token: &str) -> Result<VerifyResponse, ApiError> {
        (**self).verify(token).await
    }
}
