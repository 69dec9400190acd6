//! Payment domain — transaction status, validated payment type, conversions.

pub mod client;
mod convert;
pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Settlement status of a payment transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Refunded,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Completed => "Completed",
            TransactionStatus::Failed => "Failed",
            TransactionStatus::Refunded => "Refunded",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(TransactionStatus::Pending),
            "Completed" => Some(TransactionStatus::Completed),
            "Failed" => Some(TransactionStatus::Failed),
            "Refunded" => Some(TransactionStatus::Refunded),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Payment ─────────────────────────────────────────────────────────────────

/// A payment funding an escrow, tracked by gateway transaction reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub escrow_id: i64,
    pub buyer_id: i64,
    pub transaction_ref: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
    /// Gateway checkout URL, present while the payment awaits completion.
    pub payment_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Payment {
    pub fn is_completed(&self) -> bool {
        self.status == TransactionStatus::Completed
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransactionStatus::Pending
    }

    /// Amount with currency, e.g. `"250.00 ETB"`.
    pub fn format_amount(&self) -> String {
        format!("{:.2} {}", self.amount, self.currency)
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
            ValidationError::MissingId => write!(f, "Payment is missing an id"),
            ValidationError::InvalidStatus(s) => write!(f, "Unknown transaction status: {}", s),
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_payment(status: TransactionStatus) -> Payment {
        Payment {
            id: 1,
            escrow_id: 2,
            buyer_id: 3,
            transaction_ref: "tx-abc".to_string(),
            amount: Decimal::new(2_500, 1),
            currency: "ETB".to_string(),
            status,
            payment_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Failed,
            TransactionStatus::Refunded,
        ] {
            assert_eq!(TransactionStatus::from_str(status.as_str()), Some(status));
        }
        assert_eq!(TransactionStatus::from_str("Settled"), None);
    }

    #[test]
    fn test_status_helpers() {
        assert!(sample_payment(TransactionStatus::Completed).is_completed());
        assert!(sample_payment(TransactionStatus::Pending).is_pending());
        assert!(!sample_payment(TransactionStatus::Refunded).is_completed());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(
            sample_payment(TransactionStatus::Pending).format_amount(),
            "250.00 ETB"
        );
    }
}
