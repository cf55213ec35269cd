//! End-to-end session tests against the stub backend.
//!
//! Cover the spec'd auth flows: login/register success and failure,
//! best-effort logout, and startup rehydration.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use tavola_client::{
    ClientConfig, CredentialStore, Credentials, Gateway, MemoryCredentialStore, RegisterRequest,
    Session, SessionState, StoredCredentials, UserRecord,
};
use tavola_core::UserRole;
use tavola_integration_tests::{BROKEN_TOKEN, StubBackend, VALID_EMAIL, VALID_PASSWORD};

async fn setup() -> (StubBackend, Arc<MemoryCredentialStore>, Arc<Gateway>) {
    let backend = StubBackend::spawn().await;
    let store = Arc::new(MemoryCredentialStore::new());
    let config = ClientConfig::with_base_url(&backend.base_url).unwrap();
    let gateway = Arc::new(Gateway::new(&config, Arc::clone(&store) as _));
    (backend, store, gateway)
}

fn good_credentials() -> Credentials {
    Credentials {
        email: VALID_EMAIL.parse().unwrap(),
        password: VALID_PASSWORD.to_string(),
    }
}

#[tokio::test]
async fn login_success_authenticates_and_persists_the_returned_pair() {
    let (_backend, store, gateway) = setup().await;
    let mut session = Session::new(gateway);

    session.login(&good_credentials()).await.unwrap();

    let state = session.state();
    assert!(state.is_authenticated);
    assert!(!state.is_loading);
    assert!(state.error.is_none());
    assert_eq!(state.token.as_deref(), Some("t1"));

    // Durable storage contains exactly what the backend returned.
    let stored = store.load().unwrap().unwrap();
    assert_eq!(stored.token, "t1");
    let stored_user: UserRecord = serde_json::from_str(&stored.user_json).unwrap();
    assert_eq!(stored_user, *session.current_user().unwrap());
    assert_eq!(stored_user.name, "A");
}

#[tokio::test]
async fn login_failure_surfaces_the_server_message() {
    let (_backend, store, gateway) = setup().await;
    let mut session = Session::new(gateway);

    let credentials = Credentials {
        email: VALID_EMAIL.parse().unwrap(),
        password: "wrong".to_string(),
    };
    let error = session.login(&credentials).await.unwrap_err();

    assert_eq!(error.to_string(), "Invalid credentials");
    let state = session.state();
    assert!(!state.is_authenticated);
    assert!(state.user.is_none());
    assert!(state.token.is_none());
    assert_eq!(state.error.as_deref(), Some("Invalid credentials"));
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn register_success_opens_a_session() {
    let (_backend, store, gateway) = setup().await;
    let mut session = Session::new(gateway);

    let request = RegisterRequest {
        name: "B".to_string(),
        email: "b@c.com".parse().unwrap(),
        password: "hunter22".to_string(),
        role: UserRole::Customer,
    };
    session.register(&request).await.unwrap();

    assert!(session.state().is_authenticated);
    assert_eq!(session.state().token.as_deref(), Some("t2"));
    assert_eq!(session.current_user().unwrap().name, "B");
    assert_eq!(store.load().unwrap().unwrap().token, "t2");
}

#[tokio::test]
async fn register_conflict_surfaces_the_server_message() {
    let (_backend, _store, gateway) = setup().await;
    let mut session = Session::new(gateway);

    let request = RegisterRequest {
        name: "B".to_string(),
        email: "taken@example.com".parse().unwrap(),
        password: "hunter22".to_string(),
        role: UserRole::Customer,
    };
    let error = session.register(&request).await.unwrap_err();

    assert_eq!(
        error.to_string(),
        "An account with this email already exists"
    );
    assert_eq!(
        session.state().error.as_deref(),
        Some("An account with this email already exists")
    );
}

#[tokio::test]
async fn logout_clears_storage_and_state() {
    let (_backend, store, gateway) = setup().await;
    let mut session = Session::new(gateway);
    session.login(&good_credentials()).await.unwrap();

    session.logout().await;

    assert_eq!(session.state(), &SessionState::default());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn logout_clears_storage_even_when_backend_call_fails() {
    let (_backend, store, gateway) = setup().await;

    // A stored token whose server-side logout returns 500.
    store
        .save(&StoredCredentials {
            token: BROKEN_TOKEN.to_string(),
            user_json: r#"{"id":1,"name":"A","email":"a@b.com","role":"customer"}"#.to_string(),
        })
        .unwrap();
    let mut session = Session::new(gateway);
    assert!(session.state().is_authenticated);

    session.logout().await;

    assert_eq!(session.state(), &SessionState::default());
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn a_second_session_rehydrates_the_logged_in_identity() {
    let (_backend, _store, gateway) = setup().await;
    let mut session = Session::new(Arc::clone(&gateway));
    session.login(&good_credentials()).await.unwrap();

    let rehydrated = Session::new(gateway);
    assert!(rehydrated.state().is_authenticated);
    assert_eq!(rehydrated.state().token.as_deref(), Some("t1"));
    assert_eq!(
        rehydrated.current_user().unwrap(),
        session.current_user().unwrap()
    );
}

#[tokio::test]
async fn profile_endpoint_works_with_the_stored_token() {
    let (_backend, _store, gateway) = setup().await;
    let mut session = Session::new(Arc::clone(&gateway));
    session.login(&good_credentials()).await.unwrap();

    let profile = gateway.profile().await.unwrap();
    assert_eq!(profile, *session.current_user().unwrap());
}
