//! Authenticated session state.
//!
//! Split in two, so the state machine stays trivially testable:
//!
//! - [`state`] - the pure reducer: [`SessionState`], [`SessionAction`],
//!   and [`reduce`]. No I/O, no side effects.
//! - [`store`] - the effectful [`Session`]: dispatches actions, calls the
//!   gateway, and mirrors the token/user pair into durable storage around
//!   every success and logout path.

pub mod state;
pub mod store;

pub use state::{SessionAction, SessionState, reduce};
pub use store::{Session, SessionError};
