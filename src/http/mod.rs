//! HTTP client layer — `SafeDealHttp` with credential attachment, envelope
//! decoding, per-endpoint retry policies, and single-flight token refresh.

pub mod client;
pub(crate) mod envelope;
pub(crate) mod refresh;
pub mod retry;

pub use client::SafeDealHttp;
pub use retry::{RetryConfig, RetryPolicy};
