//! HTTP gateway to the Tavola backend.
//!
//! # Architecture
//!
//! - One shared `reqwest` client, built once with the uniform timeout
//! - Bearer token read from durable credential storage per request
//! - Any 401 response forces a client-side logout: the credential store is
//!   cleared and the registered unauthorized hook fires, regardless of
//!   which endpoint triggered it
//! - Every endpoint wrapper returns `Result<T, GatewayError>`; transport
//!   failures, timeouts, and server errors all normalize to a user-facing
//!   message (server-supplied `message` preferred, endpoint default
//!   otherwise)
//!
//! Endpoint wrappers live in one module per backend resource: [`auth`],
//! [`restaurants`], [`orders`], [`payments`], [`reviews`].

mod auth;
mod orders;
mod payments;
mod restaurants;
mod reviews;

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::ClientConfig;
use crate::error::GatewayError;
use crate::models::HealthStatus;
use crate::storage::CredentialStore;

/// Hook invoked when any endpoint observes a 401.
///
/// Registered by the hosting application (e.g. to navigate to a login
/// view); the gateway itself knows nothing about routing.
pub type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// Shape of an error body sent by the backend.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Single shared entry point for all backend communication.
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    store: Arc<dyn CredentialStore>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl Gateway {
    /// Create a new gateway.
    ///
    /// The credential store is shared with the session: the gateway reads
    /// the bearer token from it before every request and clears it on 401.
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be constructed.
    #[must_use]
    pub fn new(config: &ClientConfig, store: Arc<dyn CredentialStore>) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            base_url: config.base_url.clone(),
            store,
            on_unauthorized: None,
        }
    }

    /// Register the hook fired on any 401 response.
    #[must_use]
    pub fn with_on_unauthorized(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(hook));
        self
    }

    /// The credential store this gateway reads the bearer token from.
    #[must_use]
    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Check backend availability via `GET /health`.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` with message `"Health check failed"` when
    /// the backend is unreachable or unhealthy.
    pub async fn health(&self) -> Result<HealthStatus, GatewayError> {
        self.get("/health", "Health check failed").await
    }

    // =========================================================================
    // Request plumbing shared by the endpoint modules
    // =========================================================================

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        default: &str,
    ) -> Result<T, GatewayError> {
        let response = self.dispatch(self.request(Method::GET, path), path, default).await?;
        Self::decode(response, default).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
        default: &str,
    ) -> Result<T, GatewayError> {
        let builder = self.request(Method::GET, path).query(query);
        let response = self.dispatch(builder, path, default).await?;
        Self::decode(response, default).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        default: &str,
    ) -> Result<T, GatewayError> {
        let builder = self.request(Method::POST, path).json(body);
        let response = self.dispatch(builder, path, default).await?;
        Self::decode(response, default).await
    }

    /// POST where the caller does not care about the response body.
    pub(crate) async fn post_unit(&self, path: &str, default: &str) -> Result<(), GatewayError> {
        self.dispatch(self.request(Method::POST, path), path, default)
            .await?;
        Ok(())
    }

    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        default: &str,
    ) -> Result<T, GatewayError> {
        let builder = self.request(Method::PATCH, path).json(body);
        let response = self.dispatch(builder, path, default).await?;
        Self::decode(response, default).await
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.base_url.as_str().trim_end_matches('/'));
        let mut builder = self.http.request(method, url);
        // Bearer attachment: the token lives in durable storage, not in
        // gateway state, so a login in one component is visible here
        // immediately.
        if let Some(token) = self.store.token() {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder
    }

    /// Send the request and turn transport failures and error statuses into
    /// a normalized `GatewayError`.
    async fn dispatch(
        &self,
        builder: reqwest::RequestBuilder,
        path: &str,
        default: &str,
    ) -> Result<reqwest::Response, GatewayError> {
        let response = builder.send().await.map_err(|source| {
            tracing::debug!(path, error = %source, "transport failure");
            GatewayError::Transport {
                message: default.to_string(),
                source,
            }
        })?;

        let status = response.status();
        tracing::debug!(path, status = status.as_u16(), "backend response");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            self.force_logout(path);
            return Err(GatewayError::Unauthorized);
        }

        Err(Self::server_error(response, default).await)
    }

    /// Stale or invalid session: clear the stored credentials and notify
    /// the hosting application. Out-of-band with respect to the endpoint
    /// that happened to observe the 401.
    fn force_logout(&self, path: &str) {
        tracing::warn!(path, "401 from backend, forcing logout");
        if let Err(error) = self.store.clear() {
            tracing::error!(%error, "failed to clear credentials on forced logout");
        }
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    async fn server_error(response: reqwest::Response, default: &str) -> GatewayError {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| default.to_string()),
            Err(_) => default.to_string(),
        };
        GatewayError::Server { status, message }
    }

    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
        default: &str,
    ) -> Result<T, GatewayError> {
        let body = response.text().await.map_err(|source| {
            tracing::debug!(error = %source, "failed to read response body");
            GatewayError::Parse(default.to_string())
        })?;
        serde_json::from_str(&body).map_err(|error| {
            tracing::debug!(%error, "failed to decode response body");
            GatewayError::Parse(default.to_string())
        })
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("base_url", &self.base_url.as_str())
            .field("has_unauthorized_hook", &self.on_unauthorized.is_some())
            .finish_non_exhaustive()
    }
}
