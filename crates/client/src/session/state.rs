//! The pure session state machine.
//!
//! States: idle -> authenticating -> {authenticated, failed};
//! authenticated -> idle (logout). Invariant: `is_authenticated` holds
//! exactly when both `user` and `token` are present, after every
//! transition.

use crate::models::UserRecord;

/// Session state visible to the UI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SessionState {
    /// The authenticated user, if any.
    pub user: Option<UserRecord>,
    /// Opaque bearer token, if any.
    pub token: Option<String>,
    /// True iff both `user` and `token` are present.
    pub is_authenticated: bool,
    /// An auth call is in flight.
    pub is_loading: bool,
    /// Last failure message, until cleared.
    pub error: Option<String>,
}

impl SessionState {
    /// Whether the state upholds the authentication invariant.
    ///
    /// Always true for states produced by [`reduce`]; exposed for tests.
    #[must_use]
    pub const fn invariant_holds(&self) -> bool {
        self.is_authenticated == (self.user.is_some() && self.token.is_some())
    }
}

/// Named transitions of the session state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// An auth call started; clear any prior error.
    AuthStart,
    /// Authentication succeeded.
    AuthSuccess {
        user: UserRecord,
        token: String,
    },
    /// Authentication failed with a user-facing message.
    AuthFailure(String),
    /// Reset to the initial empty state.
    Logout,
    /// Clear the error, leaving everything else unchanged.
    ClearError,
}

/// Apply one transition. Pure: storage side effects live in the
/// [`Session`](super::Session) handlers, never here.
#[must_use]
pub fn reduce(state: &SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::AuthStart => SessionState {
            is_loading: true,
            error: None,
            ..state.clone()
        },
        SessionAction::AuthSuccess { user, token } => SessionState {
            user: Some(user),
            token: Some(token),
            is_authenticated: true,
            is_loading: false,
            error: None,
        },
        SessionAction::AuthFailure(message) => SessionState {
            user: None,
            token: None,
            is_authenticated: false,
            is_loading: false,
            error: Some(message),
        },
        SessionAction::Logout => SessionState::default(),
        SessionAction::ClearError => SessionState {
            error: None,
            ..state.clone()
        },
    }
}
