//! The effectful session store.
//!
//! Owns a [`SessionState`] and mutates it only by dispatching
//! [`SessionAction`]s through the pure reducer. Durable-storage writes
//! happen here, around every success and logout path, never inside the
//! reducer. Single writer: all mutation goes through `&mut self`.

use std::sync::Arc;

use thiserror::Error;

use crate::error::GatewayError;
use crate::gateway::Gateway;
use crate::models::{AuthResponse, Credentials, RegisterRequest, UserRecord, UserUpdate};
use crate::session::state::{SessionAction, SessionState, reduce};
use crate::storage::{CredentialStore, StorageError, StoredCredentials};

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Authentication failed; the message is already user-facing and has
    /// been mirrored into [`SessionState::error`].
    #[error("{0}")]
    Auth(String),

    /// The operation requires an authenticated session.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Durable storage failed outside an auth path.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Reducer-driven container for the authenticated identity.
///
/// Created empty, rehydrated once from durable storage at construction,
/// then mutated only via the named transitions. The gateway and the
/// session share one credential store, so a forced logout on 401 is
/// observed here on the next read.
pub struct Session {
    state: SessionState,
    gateway: Arc<Gateway>,
    store: Arc<dyn CredentialStore>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("gateway", &self.gateway)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session bound to the given gateway, rehydrating any
    /// previously stored identity.
    ///
    /// A corrupted stored pair is cleared and the session stays
    /// unauthenticated; constructing again afterwards is a no-op.
    #[must_use]
    pub fn new(gateway: Arc<Gateway>) -> Self {
        let store = Arc::clone(gateway.credentials());
        let mut session = Self {
            state: SessionState::default(),
            gateway,
            store,
        };
        session.rehydrate();
        session
    }

    /// Current state, for rendering.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// The authenticated user, if any.
    #[must_use]
    pub const fn current_user(&self) -> Option<&UserRecord> {
        self.state.user.as_ref()
    }

    /// Register a new account and open a session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Auth`] with the normalized message; the
    /// same message is set on [`SessionState::error`]. Never panics.
    pub async fn register(&mut self, request: &RegisterRequest) -> Result<(), SessionError> {
        self.dispatch(SessionAction::AuthStart);
        let result = self.gateway.register(request).await;
        self.finish_auth(result)
    }

    /// Log in with email and password.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Auth`] with the normalized message; the
    /// same message is set on [`SessionState::error`]. Never panics.
    pub async fn login(&mut self, credentials: &Credentials) -> Result<(), SessionError> {
        self.dispatch(SessionAction::AuthStart);
        let result = self.gateway.login(credentials).await;
        self.finish_auth(result)
    }

    /// Log out.
    ///
    /// The backend call is best-effort: a failure is logged, never
    /// surfaced. Durable storage is cleared and the state reset
    /// unconditionally.
    pub async fn logout(&mut self) {
        if let Err(error) = self.gateway.logout().await {
            tracing::warn!(%error, "backend logout failed, clearing local session anyway");
        }
        if let Err(error) = self.store.clear() {
            tracing::error!(%error, "failed to clear stored credentials on logout");
        }
        self.dispatch(SessionAction::Logout);
    }

    /// Merge a partial update into the current user and re-persist.
    ///
    /// Does not contact the backend; the token is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NotAuthenticated`] when no user is logged
    /// in, or [`SessionError::Storage`] if re-persisting fails.
    pub fn update_user(&mut self, update: UserUpdate) -> Result<(), SessionError> {
        let (user, token) = match (&self.state.user, &self.state.token) {
            (Some(user), Some(token)) => (user.clone(), token.clone()),
            _ => return Err(SessionError::NotAuthenticated),
        };

        let merged = user.merged(update);
        self.persist(&merged, &token)?;
        self.dispatch(SessionAction::AuthSuccess {
            user: merged,
            token,
        });
        Ok(())
    }

    /// Clear the error flag, leaving the rest of the state unchanged.
    pub fn clear_error(&mut self) {
        self.dispatch(SessionAction::ClearError);
    }

    fn dispatch(&mut self, action: SessionAction) {
        self.state = reduce(&self.state, action);
        debug_assert!(self.state.invariant_holds());
    }

    fn finish_auth(
        &mut self,
        result: Result<AuthResponse, GatewayError>,
    ) -> Result<(), SessionError> {
        match result {
            Ok(auth) => {
                if let Err(error) = self.persist(&auth.user, &auth.token) {
                    tracing::error!(%error, "failed to persist credentials");
                    let message = "Failed to persist session".to_string();
                    self.dispatch(SessionAction::AuthFailure(message.clone()));
                    return Err(SessionError::Auth(message));
                }
                self.dispatch(SessionAction::AuthSuccess {
                    user: auth.user,
                    token: auth.token,
                });
                Ok(())
            }
            Err(error) => {
                let message = error.to_string();
                self.dispatch(SessionAction::AuthFailure(message.clone()));
                Err(SessionError::Auth(message))
            }
        }
    }

    /// Write the token/user pair to durable storage, together.
    fn persist(&self, user: &UserRecord, token: &str) -> Result<(), StorageError> {
        let user_json = serde_json::to_string(user)
            .map_err(|e| StorageError::Corrupted(e.to_string()))?;
        self.store.save(&StoredCredentials {
            token: token.to_string(),
            user_json,
        })
    }

    /// Startup rehydration from durable storage.
    fn rehydrate(&mut self) {
        let credentials = match self.store.load() {
            Ok(Some(credentials)) => credentials,
            Ok(None) => return,
            Err(error) => {
                tracing::warn!(%error, "stored credentials unreadable, clearing");
                self.clear_corrupted();
                return;
            }
        };

        match serde_json::from_str::<UserRecord>(&credentials.user_json) {
            Ok(user) => self.dispatch(SessionAction::AuthSuccess {
                user,
                token: credentials.token,
            }),
            Err(error) => {
                tracing::warn!(%error, "stored user record corrupted, clearing");
                self.clear_corrupted();
            }
        }
    }

    fn clear_corrupted(&mut self) {
        if let Err(error) = self.store.clear() {
            tracing::error!(%error, "failed to clear corrupted credentials");
        }
    }
}
