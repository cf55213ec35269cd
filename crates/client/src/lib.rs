//! Tavola Client - typed SDK for the Tavola food-delivery backend.
//!
//! # Architecture
//!
//! Two cooperating pieces form the core:
//!
//! - [`Gateway`] - the single shared entry point for all backend
//!   communication. Attaches the bearer token from durable storage to every
//!   outbound request, intercepts 401 responses to force a client-side
//!   logout, and normalizes every transport or server failure into a
//!   [`GatewayError`] carrying a user-facing message.
//! - [`Session`] - a reducer-driven state container holding the
//!   authenticated identity (user record, bearer token, loading/error
//!   flags). Mutates only through a fixed set of named transitions and
//!   mirrors the token/user pair into durable storage around every
//!   success and logout path.
//!
//! Data flow: callers invoke [`Session`] actions, the session calls
//! [`Gateway`] endpoints, results flow back as `Result<T, GatewayError>`,
//! and the session updates its state and storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use tavola_client::{ClientConfig, Credentials, Gateway, MemoryCredentialStore, Session};
//!
//! let config = ClientConfig::from_env()?;
//! let store = Arc::new(MemoryCredentialStore::new());
//! let gateway = Arc::new(Gateway::new(&config, store));
//! let mut session = Session::new(Arc::clone(&gateway));
//!
//! let credentials = Credentials {
//!     email: "a@b.com".parse()?,
//!     password: "hunter2".into(),
//! };
//! session.login(&credentials).await?;
//! assert!(session.state().is_authenticated);
//!
//! let restaurants = gateway.list_restaurants(&Default::default()).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod session;
pub mod storage;
pub mod validate;

pub use config::{ClientConfig, ConfigError};
pub use error::GatewayError;
pub use gateway::Gateway;
pub use models::*;
pub use session::{Session, SessionAction, SessionError, SessionState, reduce};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore, StoredCredentials};
pub use validate::{CardDetails, CheckoutForm, PaymentSelection, RegistrationForm, ValidationErrors};
