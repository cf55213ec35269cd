//! User identity payloads.

use serde::{Deserialize, Serialize};

use tavola_core::{Email, UserId, UserRole};

/// The authenticated user's record.
///
/// Owned exclusively by the session; callers request changes through
/// `Session::update_user`, which merges fields and re-persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: Email,
    pub role: UserRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl UserRecord {
    /// Merge a partial update into this record, field by field.
    #[must_use]
    pub fn merged(&self, update: UserUpdate) -> Self {
        Self {
            id: self.id,
            name: update.name.unwrap_or_else(|| self.name.clone()),
            email: update.email.unwrap_or_else(|| self.email.clone()),
            role: self.role,
            avatar: update.avatar.or_else(|| self.avatar.clone()),
            phone: update.phone.or_else(|| self.phone.clone()),
        }
    }
}

/// Partial user update, merged into the current record.
///
/// `id` and `role` are backend-owned and cannot be changed client-side.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub avatar: Option<String>,
    pub phone: Option<String>,
}

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: Email,
    pub password: String,
    pub role: UserRole,
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub email: Email,
    pub password: String,
}

/// Successful response of `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserRecord,
    /// Opaque bearer token for subsequent requests.
    pub token: String,
}
