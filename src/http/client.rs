//! Core HTTP client — `SafeDealHttp`.
//!
//! Every backend call passes through here. The core attaches the persisted
//! bearer token, decodes the response envelope, normalizes failures into
//! [`HttpError`], and runs the token-refresh protocol on 401s from
//! authenticated requests. Sub-clients in `auth/` and `domain/` shape
//! requests; this layer owns everything else.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{header, Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::session::{SessionState, SharedSessionState};
use crate::auth::{AuthResponse, RefreshTokenRequest};
use crate::error::{AuthError, HttpError, SdkError};
use crate::http::envelope;
use crate::http::refresh::{RefreshGate, Ticket};
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::notice::{EventHub, NoticePolicy, SdkEvent};
use crate::storage::AuthStorage;

/// How many idle connections to keep per host.
const POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Core HTTP client for the SafeDeal REST API.
///
/// Internal to the SDK — the sub-clients wrap this.
pub struct SafeDealHttp {
    base_url: String,
    client: Client,
    storage: AuthStorage,
    events: EventHub,
    session: SharedSessionState,
    refresh_gate: Arc<RefreshGate>,
}

impl SafeDealHttp {
    pub(crate) fn new(
        base_url: &str,
        timeout: Duration,
        storage: AuthStorage,
        events: EventHub,
        session: SharedSessionState,
    ) -> Result<Self, SdkError> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(POOL_MAX_IDLE_PER_HOST)
            .build()
            .map_err(|e| SdkError::Other(format!("failed to initialize HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            storage,
            events,
            session,
            refresh_gate: Arc::new(RefreshGate::new()),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    // ── Generic HTTP methods ─────────────────────────────────────────────

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        retry: RetryPolicy,
        notices: NoticePolicy,
    ) -> Result<T, SdkError> {
        self.execute(Method::GET, path, None::<&()>, retry, notices)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        retry: RetryPolicy,
        notices: NoticePolicy,
    ) -> Result<T, SdkError> {
        self.execute(Method::POST, path, Some(body), retry, notices)
            .await
    }

    #[allow(dead_code)]
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
        retry: RetryPolicy,
        notices: NoticePolicy,
    ) -> Result<T, SdkError> {
        self.execute(Method::PUT, path, Some(body), retry, notices)
            .await
    }

    #[allow(dead_code)]
    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
        retry: RetryPolicy,
        notices: NoticePolicy,
    ) -> Result<T, SdkError> {
        self.execute(Method::DELETE, path, None::<&()>, retry, notices)
            .await
    }

    // ── Request pipeline ─────────────────────────────────────────────────

    async fn execute<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        retry: RetryPolicy,
        notices: NoticePolicy,
    ) -> Result<T, SdkError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        // A 401 on a request that carried no token (login, register) is a
        // plain authentication failure, not a refresh trigger.
        let authenticated = matches!(self.storage.access_token(), Ok(Some(_)));

        match self.request_with_retry(&method, path, body, &retry).await {
            Ok(value) => Ok(value),
            Err(HttpError::Unauthorized(_)) if authenticated => {
                self.refresh_and_replay(method, path, body, retry, notices)
                    .await
            }
            Err(err) => {
                self.surface(&err, notices);
                Err(err.into())
            }
        }
    }

    /// The refresh protocol: serialize concurrent refresh attempts through
    /// the gate, then replay the triggering request exactly once.
    async fn refresh_and_replay<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        retry: RetryPolicy,
        notices: NoticePolicy,
    ) -> Result<T, SdkError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let outcome = match self.refresh_gate.join().await {
            Ticket::Leader => {
                let outcome = self.run_refresh().await;
                if let Err(err) = &outcome {
                    self.expire_session(err).await;
                }
                self.refresh_gate.settle(outcome.clone()).await;
                outcome
            }
            Ticket::Waiter(rx) => rx.await.unwrap_or_else(|_| {
                Err(AuthError::RefreshFailed("refresh abandoned".to_string()))
            }),
        };

        match outcome {
            Ok(()) => {
                // Replay once. A second 401 is returned to the caller rather
                // than re-entering the protocol.
                match self.request_with_retry(&method, path, body, &retry).await {
                    Ok(value) => Ok(value),
                    Err(err) => {
                        self.surface(&err, notices);
                        Err(err.into())
                    }
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Exchange the refresh token for a new pair and persist it.
    ///
    /// Goes through `request_with_retry` directly, so a failing exchange can
    /// never recurse into the refresh protocol.
    async fn run_refresh(&self) -> Result<(), AuthError> {
        let refresh_token = match self.storage.refresh_token() {
            Ok(Some(token)) => token,
            Ok(None) => return Err(AuthError::MissingRefreshToken),
            Err(e) => return Err(AuthError::RefreshFailed(e.to_string())),
        };

        tracing::debug!("access token rejected, exchanging refresh token");

        let request = RefreshTokenRequest { refresh_token };
        let response: AuthResponse = self
            .request_with_retry(
                &Method::POST,
                "/refresh-token",
                Some(&request),
                &RetryPolicy::None,
            )
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        self.storage
            .set_tokens(&response.access_token, &response.refresh_token)
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;
        if let Err(e) = self.storage.set_user(&response.user) {
            tracing::warn!(error = %e, "failed to cache refreshed user profile");
        }

        Ok(())
    }

    /// Irrecoverable refresh failure: clear credentials, drop to anonymous,
    /// and signal the application to navigate to its login entry point.
    async fn expire_session(&self, err: &AuthError) {
        tracing::warn!(error = %err, "token refresh failed, ending session");
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "failed to clear persisted credentials");
        }
        *self.session.write().await = SessionState::Anonymous;
        self.events.emit(SdkEvent::SessionExpired);
    }

    /// Emit a transient notice for a failure, per policy. 401s are owned by
    /// the refresh protocol and never shown directly.
    fn surface(&self, err: &HttpError, notices: NoticePolicy) {
        if notices == NoticePolicy::Silent {
            return;
        }
        if matches!(err, HttpError::Unauthorized(_)) {
            return;
        }
        self.events.error(err.user_message());
    }

    async fn request_with_retry<T, B>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&B>,
        retry: &RetryPolicy,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let config = match retry {
            RetryPolicy::None => return self.do_request(method, path, body).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut attempt = 0;
        loop {
            match self.do_request(method, path, body).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::Server { status, .. }
                        | HttpError::Unexpected { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::Network(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if !should_retry || attempt >= config.max_retries {
                        return Err(e);
                    }

                    let delay = config.delay_for_attempt(attempt);
                    tracing::debug!(
                        attempt = attempt + 1,
                        max = config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying request to {}",
                        path
                    );
                    futures_timer::Delay::new(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn do_request<T, B>(
        &self,
        method: &Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
        B: Serialize,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method.clone(), &url);

        // Read the token fresh on every attempt so replays after a refresh
        // carry the new credential.
        if let Ok(Some(token)) = self.storage.access_token() {
            req = req.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(HttpError::Network)?;
        let status = resp.status();
        let text = resp.text().await.map_err(HttpError::Network)?;

        if status.is_success() {
            return envelope::decode(&text);
        }
        Err(HttpError::from_status(status, &text))
    }
}

impl Clone for SafeDealHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            storage: self.storage.clone(),
            events: self.events.clone(),
            session: self.session.clone(),
            refresh_gate: self.refresh_gate.clone(),
        }
    }
}
