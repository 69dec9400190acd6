//! Unified SDK error types.

use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors, one variant per backend failure class.
///
/// Every variant that carries a `String` holds the final user-facing message:
/// the server-supplied `error`/`message` field when the body had one, the
/// generic text for that status otherwise.
#[derive(Error, Debug)]
pub enum HttpError {
    /// No response received — connection failure or transport timeout.
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// 400
    #[error("Bad request: {0}")]
    Validation(String),

    /// 401
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// 403
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 5xx
    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    /// Any other status.
    #[error("Unexpected status {status}: {message}")]
    Unexpected { status: u16, message: String },

    /// Response body did not decode as the expected payload.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl HttpError {
    /// Map an error status and raw body into the matching variant.
    ///
    /// A server-supplied `error` or `message` field wins over the generic
    /// text for the status.
    pub(crate) fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let supplied = server_message(body);
        let code = status.as_u16();
        let message = |generic: &str| supplied.clone().unwrap_or_else(|| generic.to_string());

        match code {
            400 => HttpError::Validation(message(messages::VALIDATION)),
            401 => HttpError::Unauthorized(message(messages::UNAUTHORIZED)),
            403 => HttpError::Forbidden(message(messages::FORBIDDEN)),
            404 => HttpError::NotFound(message(messages::NOT_FOUND)),
            500..=599 => HttpError::Server {
                status: code,
                message: message(messages::SERVER),
            },
            _ => HttpError::Unexpected {
                status: code,
                message: message(messages::UNKNOWN),
            },
        }
    }

    /// The transient-notification text for this error.
    pub fn user_message(&self) -> &str {
        match self {
            HttpError::Network(_) => messages::NETWORK,
            HttpError::Decode(_) => messages::UNKNOWN,
            HttpError::Validation(m)
            | HttpError::Unauthorized(m)
            | HttpError::Forbidden(m)
            | HttpError::NotFound(m) => m,
            HttpError::Server { message, .. } | HttpError::Unexpected { message, .. } => message,
        }
    }
}

/// Extract the server-supplied error text from an error body, preferring
/// `error` over `message`.
fn server_message(body: &str) -> Option<String> {
    #[derive(serde::Deserialize)]
    struct ErrorBody {
        #[serde(default)]
        error: Option<String>,
        #[serde(default)]
        message: Option<String>,
    }

    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed.error.or(parsed.message).filter(|m| !m.is_empty())
}

/// Authentication errors.
///
/// `Clone` so a single refresh outcome can be distributed to every queued
/// waiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The refresh protocol ran with no persisted refresh token.
    #[error("No refresh token available")]
    MissingRefreshToken,

    /// The refresh endpoint rejected the exchange.
    #[error("Token refresh failed: {0}")]
    RefreshFailed(String),
}

/// Durable key-value storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Generic per-status messages, used when the backend supplies none.
pub(crate) mod messages {
    pub const NETWORK: &str = "Network error. Please check your connection.";
    pub const UNAUTHORIZED: &str = "Please log in to continue.";
    pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
    pub const NOT_FOUND: &str = "The requested resource was not found.";
    pub const SERVER: &str = "Server error. Please try again later.";
    pub const VALIDATION: &str = "Please check your input and try again.";
    pub const UNKNOWN: &str = "An unexpected error occurred.";
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_prefers_server_error_field() {
        let err = HttpError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"error": "amount must be positive", "message": "validation failed"}"#,
        );
        match err {
            HttpError::Validation(m) => assert_eq!(m, "amount must be positive"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_falls_back_to_message_field() {
        let err = HttpError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"message": "escrow 42 not found"}"#,
        );
        match err {
            HttpError::NotFound(m) => assert_eq!(m, "escrow 42 not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_generic_message_for_unparseable_body() {
        let err = HttpError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        match err {
            HttpError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, messages::SERVER);
            }
            other => panic!("expected Server, got {:?}", other),
        }
    }

    #[test]
    fn test_from_status_maps_all_classes() {
        assert!(matches!(
            HttpError::from_status(StatusCode::UNAUTHORIZED, ""),
            HttpError::Unauthorized(_)
        ));
        assert!(matches!(
            HttpError::from_status(StatusCode::FORBIDDEN, ""),
            HttpError::Forbidden(_)
        ));
        assert!(matches!(
            HttpError::from_status(StatusCode::BAD_GATEWAY, ""),
            HttpError::Server { status: 502, .. }
        ));
        assert!(matches!(
            HttpError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            HttpError::Unexpected { status: 429, .. }
        ));
    }

    #[test]
    fn test_user_message_generic_for_decode() {
        let err = HttpError::Decode("missing field `id`".to_string());
        assert_eq!(err.user_message(), messages::UNKNOWN);
    }
}
