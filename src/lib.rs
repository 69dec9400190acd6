//! # SafeDeal SDK
//!
//! A typed Rust client for the SafeDeal escrow platform.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Domain types, wire types, errors (no I/O)
//! 2. **Storage** — Durable key-value persistence for credentials and
//!    preferences
//! 3. **HTTP** — `SafeDealHttp` with credential attachment, envelope
//!    decoding, per-endpoint retry policies, and single-flight token refresh
//! 4. **High-Level Client** — `SafeDealClient` with nested sub-clients and
//!    reactive session state
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use safedeal_sdk::prelude::*;
//!
//! let client = SafeDealClient::builder()
//!     .base_url("https://api.safedeal.example")
//!     .build()?;
//!
//! client.session().initialize().await;
//! let user = client
//!     .session()
//!     .login(&LoginRequest::new("a@b.com", "Secret123"))
//!     .await?;
//!
//! let escrows = client.escrows().list(None, None).await?;
//! ```
//!
//! Expired access tokens are refreshed transparently: on the first 401 the
//! core exchanges the refresh token (one exchange at a time, no matter how
//! many requests fail concurrently) and replays the original request. When
//! the exchange itself fails, credentials are cleared and
//! [`SdkEvent::SessionExpired`](notice::SdkEvent) tells the application to
//! return to its login screen.

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Wire types shared across domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

/// SDK events: transient notices and session-expiry signals.
pub mod notice;

// ── Layer 2: Storage ─────────────────────────────────────────────────────────

/// Durable key-value storage for credentials and preferences.
pub mod storage;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// HTTP client with credential attachment and token-refresh coordination.
pub mod http;

// ── Layer 4: High-Level Client ───────────────────────────────────────────────

/// Authentication: credentials, session state, login/logout.
pub mod auth;

/// `SafeDealClient` — the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Auth + session types
    pub use crate::auth::session::SessionState;
    pub use crate::auth::{AuthResponse, LoginRequest, RegisterRequest, User};

    // Domain types — escrow
    pub use crate::domain::escrow::wire::CreateEscrowRequest;
    pub use crate::domain::escrow::{Escrow, EscrowStatus};

    // Domain types — payment
    pub use crate::domain::payment::wire::InitiatePaymentRequest;
    pub use crate::domain::payment::{Payment, TransactionStatus};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError, StorageError};

    // Events
    pub use crate::notice::{Notice, NoticeLevel, SdkEvent};

    // Network
    pub use crate::network::DEFAULT_API_URL;

    // Shared wire types
    pub use crate::shared::MessageResponse;

    // Storage
    pub use crate::storage::{AuthStorage, FileStore, MemoryStore, Storage, ThemeMode};

    // Client + sub-clients
    pub use crate::client::{
        AuthClient, EscrowsClient, PaymentsClient, SafeDealClient, SafeDealClientBuilder,
        SessionClient,
    };
}
