//! Authentication endpoints.

use tracing::instrument;

use crate::error::GatewayError;
use crate::models::{AuthResponse, Credentials, RegisterRequest, UserRecord};

use super::Gateway;

impl Gateway {
    /// `POST /auth/register` - create an account.
    ///
    /// # Errors
    ///
    /// Default message: `"Registration failed"`.
    #[instrument(skip_all, fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, GatewayError> {
        self.post("/auth/register", request, "Registration failed")
            .await
    }

    /// `POST /auth/login` - exchange credentials for a user record and
    /// bearer token.
    ///
    /// # Errors
    ///
    /// Default message: `"Login failed"`.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse, GatewayError> {
        self.post("/auth/login", credentials, "Login failed").await
    }

    /// `POST /auth/logout` - invalidate the token server-side.
    ///
    /// The session treats failures here as best-effort; local state is
    /// cleared either way.
    ///
    /// # Errors
    ///
    /// Default message: `"Logout failed"`.
    pub async fn logout(&self) -> Result<(), GatewayError> {
        self.post_unit("/auth/logout", "Logout failed").await
    }

    /// `GET /auth/profile` - fetch the authenticated user's record.
    ///
    /// # Errors
    ///
    /// Default message: `"Failed to get profile"`.
    pub async fn profile(&self) -> Result<UserRecord, GatewayError> {
        self.get("/auth/profile", "Failed to get profile").await
    }
}
