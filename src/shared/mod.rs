//! Wire types shared across domains.

use serde::{Deserialize, Serialize};

/// A bare `{ "message": ... }` acknowledgement from the backend.
///
/// Returned by register, activate, and escrow release.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}
