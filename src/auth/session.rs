//! Session provider — application-wide reactive authentication state.
//!
//! One [`SessionState`] cell is shared between this provider and the HTTP
//! core (which drops the session to `Anonymous` on irrecoverable refresh
//! failure). The cell is owned by the client instance, not a global, so
//! every client — and every test — gets isolated state.

use std::sync::Arc;

use async_lock::RwLock;

use crate::auth::{LoginRequest, RegisterRequest, User};
use crate::client::SafeDealClient;
use crate::error::SdkError;
use crate::shared::MessageResponse;

const LOGIN_SUCCESS: &str = "Successfully logged in!";
const REGISTER_SUCCESS: &str =
    "Account created successfully! Please check your email to activate your account.";
const LOGOUT_SUCCESS: &str = "Successfully logged out!";

/// Authentication status of the application.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Before `initialize()` has been called.
    #[default]
    Uninitialized,
    /// `initialize()` is validating persisted credentials.
    Initializing,
    /// A user is logged in.
    Authenticated(User),
    /// No valid session.
    Anonymous,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

pub(crate) type SharedSessionState = Arc<RwLock<SessionState>>;

/// Sub-client exposing and mutating the session state.
pub struct Session<'a> {
    pub(crate) client: &'a SafeDealClient,
}

impl<'a> Session<'a> {
    /// Current session state.
    pub async fn state(&self) -> SessionState {
        self.client.session_state.read().await.clone()
    }

    /// The logged-in user, if any.
    pub async fn user(&self) -> Option<User> {
        self.client.session_state.read().await.user().cloned()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.session_state.read().await.is_authenticated()
    }

    /// Hydrate the session from persisted credentials on application start.
    ///
    /// The cached profile is not treated as authoritative — a fresh
    /// `GET /api/profile` decides. When the fetch fails the stale
    /// credentials are cleared and the session lands in `Anonymous`.
    pub async fn initialize(&self) -> SessionState {
        self.set_state(SessionState::Initializing).await;

        if !self.client.storage.has_credentials() {
            self.set_state(SessionState::Anonymous).await;
            return SessionState::Anonymous;
        }

        match self.client.auth().profile().await {
            Ok(user) => {
                if let Err(e) = self.client.storage.set_user(&user) {
                    tracing::warn!(error = %e, "failed to cache user profile");
                }
                let state = SessionState::Authenticated(user);
                self.set_state(state.clone()).await;
                state
            }
            Err(err) => {
                tracing::warn!(error = %err, "stored session is no longer valid");
                if let Err(e) = self.client.auth().logout().await {
                    tracing::warn!(error = %e, "session cleanup failed");
                }
                self.set_state(SessionState::Anonymous).await;
                SessionState::Anonymous
            }
        }
    }

    /// Log in and transition to `Authenticated`.
    ///
    /// Errors propagate to the caller for inline display; the session stays
    /// in its previous state on failure.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<User, SdkError> {
        let response = self.client.auth().login(credentials).await?;
        self.set_state(SessionState::Authenticated(response.user.clone()))
            .await;
        self.client.events.success(LOGIN_SUCCESS);
        Ok(response.user)
    }

    /// Create an account. Does not authenticate the session.
    pub async fn register(&self, data: &RegisterRequest) -> Result<MessageResponse, SdkError> {
        let response = self.client.auth().register(data).await?;
        self.client.events.success(REGISTER_SUCCESS);
        Ok(response)
    }

    /// End the session. Always lands in `Anonymous` with cleared
    /// credentials, even when the remote logout call fails.
    pub async fn logout(&self) -> Result<(), SdkError> {
        let result = self.client.auth().logout().await;
        self.set_state(SessionState::Anonymous).await;
        self.client.events.success(LOGOUT_SUCCESS);
        result
    }

    /// Best-effort profile refresh. Failures are logged and swallowed; the
    /// session state is untouched on failure.
    pub async fn refresh_user(&self) {
        if !self.is_authenticated().await {
            return;
        }
        match self.client.auth().profile().await {
            Ok(user) => {
                if let Err(e) = self.client.storage.set_user(&user) {
                    tracing::warn!(error = %e, "failed to cache user profile");
                }
                self.set_state(SessionState::Authenticated(user)).await;
            }
            Err(err) => {
                tracing::debug!(error = %err, "profile refresh failed");
            }
        }
    }

    async fn set_state(&self, state: SessionState) {
        *self.client.session_state.write().await = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: 1,
            first_name: "Lily".to_string(),
            last_name: "Abate".to_string(),
            email: "lily@example.com".to_string(),
            activated: true,
            version: 1,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_default_state_is_uninitialized() {
        assert_eq!(SessionState::default(), SessionState::Uninitialized);
    }

    #[test]
    fn test_only_authenticated_state_has_a_user() {
        let authed = SessionState::Authenticated(sample_user());
        assert!(authed.is_authenticated());
        assert_eq!(authed.user().unwrap().email, "lily@example.com");

        for state in [
            SessionState::Uninitialized,
            SessionState::Initializing,
            SessionState::Anonymous,
        ] {
            assert!(!state.is_authenticated());
            assert!(state.user().is_none());
        }
    }
}
