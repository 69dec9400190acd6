//! Escrow domain — lifecycle status, validated escrow type, conversions.

pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Escrow lifecycle status. Transitions are enforced by the backend; the
/// client only ever observes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EscrowStatus {
    Pending,
    Funded,
    Released,
    Disputed,
}

impl EscrowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscrowStatus::Pending => "Pending",
            EscrowStatus::Funded => "Funded",
            EscrowStatus::Released => "Released",
            EscrowStatus::Disputed => "Disputed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(EscrowStatus::Pending),
            "Funded" => Some(EscrowStatus::Funded),
            "Released" => Some(EscrowStatus::Released),
            "Disputed" => Some(EscrowStatus::Disputed),
            _ => None,
        }
    }
}

impl fmt::Display for EscrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Escrow ──────────────────────────────────────────────────────────────────

/// A validated escrow agreement between a buyer and a seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escrow {
    pub id: i64,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub amount: Decimal,
    pub status: EscrowStatus,
    pub conditions: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Escrow {
    /// Whether the funds are held and can be released.
    pub fn is_releasable(&self) -> bool {
        self.status == EscrowStatus::Funded
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    MissingId,
    InvalidStatus(String),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MissingId => write!(f, "Escrow is missing an id"),
            ValidationError::InvalidStatus(s) => write!(f, "Unknown escrow status: {}", s),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            EscrowStatus::Pending,
            EscrowStatus::Funded,
            EscrowStatus::Released,
            EscrowStatus::Disputed,
        ] {
            assert_eq!(EscrowStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(EscrowStatus::from_str("Cancelled"), None);
    }

    #[test]
    fn test_only_funded_escrows_are_releasable() {
        let mut escrow = Escrow {
            id: 1,
            buyer_id: 2,
            seller_id: 3,
            amount: Decimal::new(50_000, 2),
            status: EscrowStatus::Funded,
            conditions: None,
            created_at: None,
            updated_at: None,
        };
        assert!(escrow.is_releasable());

        escrow.status = EscrowStatus::Released;
        assert!(!escrow.is_releasable());
    }
}
