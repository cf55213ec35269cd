//! Normalized boundary errors.
//!
//! Every gateway endpoint returns `Result<T, GatewayError>`. The error's
//! `Display` output is the user-facing message: a server-supplied `message`
//! field when the backend sent one, otherwise an endpoint-specific default.
//! No raw transport errors or panics cross the gateway boundary.

use thiserror::Error;

/// Errors produced at the HTTP gateway boundary.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Backend replied with a non-success status.
    #[error("{message}")]
    Server {
        /// HTTP status code of the response.
        status: u16,
        /// Server-supplied message, or the endpoint default.
        message: String,
    },

    /// The request never completed (connection failure, timeout, DNS).
    ///
    /// Timeouts are deliberately not a distinct kind; they surface with the
    /// same endpoint default message as any other transport failure.
    #[error("{message}")]
    Transport {
        /// Endpoint default message.
        message: String,
        /// Underlying transport error, for logs.
        #[source]
        source: reqwest::Error,
    },

    /// A 2xx response body did not match the expected shape.
    #[error("{0}")]
    Parse(String),

    /// The backend rejected the stored token; credentials have been cleared
    /// and the registered unauthorized hook has already fired.
    #[error("Session expired. Please log in again.")]
    Unauthorized,
}

impl GatewayError {
    /// HTTP status of the response, when one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            Self::Transport { .. } | Self::Parse(_) => None,
        }
    }

    /// Whether this error is the global stale-session case.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_error_displays_message() {
        let err = GatewayError::Server {
            status: 400,
            message: "Invalid credentials".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid credentials");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_unauthorized_display() {
        let err = GatewayError::Unauthorized;
        assert_eq!(err.to_string(), "Session expired. Please log in again.");
        assert!(err.is_unauthorized());
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_parse_error_carries_default_message() {
        let err = GatewayError::Parse("Failed to fetch restaurants".to_string());
        assert_eq!(err.to_string(), "Failed to fetch restaurants");
        assert_eq!(err.status(), None);
    }
}
