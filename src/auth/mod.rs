//! Authentication — credentials, user profile, login/register/logout.
//!
//! ## Security Model
//!
//! - Tokens are persisted in the [`Storage`](crate::storage::Storage) backend
//!   under namespaced keys and attached to requests as `Authorization:
//!   Bearer` headers by the HTTP core.
//! - The access/refresh pair is written and cleared only as a pair.
//! - Logout always clears local credentials, even when the remote
//!   `POST /api/logout` fails.
//!
//! ## Session Hydration
//!
//! Use `client.session().initialize()` on startup to validate persisted
//! credentials against `GET /api/profile` and land in either
//! `Authenticated(user)` or `Anonymous`.

pub mod client;
pub mod session;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// User profile
// ============================================================================

/// A SafeDeal account profile.
///
/// Returned by login, refresh, and `GET /api/profile`. The backend's ORM
/// emits `CreatedAt`/`UpdatedAt` in Go-style casing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub activated: bool,
    pub version: i64,
    #[serde(rename = "CreatedAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl User {
    /// Display name, `"First Last"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// ============================================================================
// Wire types
// ============================================================================

/// Body for `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Body for `POST /register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Token pair + profile returned by `POST /login` and `POST /refresh-token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// Body for `POST /refresh-token`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}
