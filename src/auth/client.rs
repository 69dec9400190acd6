//! Auth sub-client — login, register, activation, logout, profile.

use crate::auth::{AuthResponse, LoginRequest, RegisterRequest, User};
use crate::client::SafeDealClient;
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::notice::NoticePolicy;
use crate::shared::MessageResponse;

/// Sub-client for authentication operations.
pub struct Auth<'a> {
    pub(crate) client: &'a SafeDealClient,
}

impl<'a> Auth<'a> {
    /// Authenticate with email/password and persist the returned token pair
    /// and profile.
    ///
    /// Failures propagate silently (no transient notice) so the login form
    /// can render them inline.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse, SdkError> {
        let response: AuthResponse = self
            .client
            .http
            .post("/login", credentials, RetryPolicy::None, NoticePolicy::Silent)
            .await?;

        self.client
            .storage
            .set_tokens(&response.access_token, &response.refresh_token)?;
        self.client.storage.set_user(&response.user)?;

        Ok(response)
    }

    /// Create an account. Registration never authenticates the session; the
    /// account must be activated and logged into explicitly.
    pub async fn register(&self, data: &RegisterRequest) -> Result<MessageResponse, SdkError> {
        self.client
            .http
            .post("/register", data, RetryPolicy::None, NoticePolicy::Silent)
            .await
    }

    /// Activate an account with the emailed token.
    pub async fn activate(&self, token: &str) -> Result<MessageResponse, SdkError> {
        let path = format!("/activate?token={}", urlencoding::encode(token));
        self.client
            .http
            .get(&path, RetryPolicy::Idempotent, NoticePolicy::Surface)
            .await
    }

    /// Invalidate the session server-side and clear local credentials.
    ///
    /// The remote call is best-effort — local credentials are cleared even
    /// when it fails.
    pub async fn logout(&self) -> Result<(), SdkError> {
        let remote: Result<serde_json::Value, SdkError> = self
            .client
            .http
            .post(
                "/api/logout",
                &serde_json::json!({}),
                RetryPolicy::None,
                NoticePolicy::Silent,
            )
            .await;
        if let Err(err) = remote {
            tracing::warn!(error = %err, "remote logout failed, clearing local session anyway");
        }

        self.client.storage.clear()?;
        Ok(())
    }

    /// Fetch the current user's profile.
    pub async fn profile(&self) -> Result<User, SdkError> {
        self.client
            .http
            .get("/api/profile", RetryPolicy::Idempotent, NoticePolicy::Surface)
            .await
    }
}
