//! High-level client — `SafeDealClient` with nested sub-client accessors.
//!
//! Each domain has its own sub-client (`client.escrows()`, `client.payments()`,
//! `client.auth()`, `client.session()`). This module keeps the builder, the
//! shared session state cell, and the accessor methods.

use std::sync::Arc;
use std::time::Duration;

use async_lock::RwLock;
use tokio::sync::broadcast;

use crate::auth::client::Auth;
use crate::auth::session::{Session, SessionState, SharedSessionState};
use crate::domain::escrow::client::Escrows;
use crate::domain::payment::client::Payments;
use crate::error::SdkError;
use crate::http::SafeDealHttp;
use crate::notice::{EventHub, SdkEvent};
use crate::storage::{AuthStorage, FileStore, Storage};

// Re-export sub-client types for convenience.
pub use crate::auth::client::Auth as AuthClient;
pub use crate::auth::session::Session as SessionClient;
pub use crate::domain::escrow::client::Escrows as EscrowsClient;
pub use crate::domain::payment::client::Payments as PaymentsClient;

/// Default per-request transport timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The primary entry point for the SafeDeal SDK.
///
/// Provides nested sub-client accessors for each domain:
/// `client.session()`, `client.escrows()`, `client.payments()`, etc.
pub struct SafeDealClient {
    pub(crate) http: SafeDealHttp,
    pub(crate) storage: AuthStorage,
    pub(crate) session_state: SharedSessionState,
    pub(crate) events: EventHub,
}

impl SafeDealClient {
    pub fn builder() -> SafeDealClientBuilder {
        SafeDealClientBuilder::default()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn auth(&self) -> Auth<'_> {
        Auth { client: self }
    }

    pub fn session(&self) -> Session<'_> {
        Session { client: self }
    }

    pub fn escrows(&self) -> Escrows<'_> {
        Escrows { client: self }
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments { client: self }
    }

    /// Subscribe to SDK events: transient notices and the session-expired
    /// redirect signal.
    pub fn events(&self) -> broadcast::Receiver<SdkEvent> {
        self.events.subscribe()
    }

    /// The persistent store — exposed for theme preference and cached-user
    /// access.
    pub fn storage(&self) -> &AuthStorage {
        &self.storage
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }
}

impl Clone for SafeDealClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            storage: self.storage.clone(),
            session_state: self.session_state.clone(),
            events: self.events.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct SafeDealClientBuilder {
    base_url: String,
    timeout: Duration,
    storage: Option<Arc<dyn Storage>>,
}

impl Default for SafeDealClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            storage: None,
        }
    }
}

impl SafeDealClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom storage backend instead of the default file store.
    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn build(self) -> Result<SafeDealClient, SdkError> {
        let store = self
            .storage
            .unwrap_or_else(|| Arc::new(FileStore::default_location()));
        let storage = AuthStorage::new(store);
        let events = EventHub::new();
        let session_state: SharedSessionState =
            Arc::new(RwLock::new(SessionState::Uninitialized));

        let http = SafeDealHttp::new(
            &self.base_url,
            self.timeout,
            storage.clone(),
            events.clone(),
            session_state.clone(),
        )?;

        Ok(SafeDealClient {
            http,
            storage,
            session_state,
            events,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_builder_defaults() {
        let client = SafeDealClient::builder().build().unwrap();
        assert_eq!(client.base_url(), crate::network::DEFAULT_API_URL);
    }

    #[test]
    fn test_builder_strips_trailing_slash() {
        let client = SafeDealClient::builder()
            .base_url("https://api.safedeal.example/")
            .storage(Arc::new(MemoryStore::new()))
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.safedeal.example");
    }

    #[tokio::test]
    async fn test_fresh_client_is_uninitialized() {
        let client = SafeDealClient::builder()
            .storage(Arc::new(MemoryStore::new()))
            .build()
            .unwrap();
        assert_eq!(client.session().state().await, SessionState::Uninitialized);
    }
}
