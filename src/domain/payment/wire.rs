//! Wire types for payment requests and responses (REST).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw payment record from the REST API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentResponse {
    #[serde(rename = "ID", default)]
    pub id: Option<i64>,
    pub escrow_id: i64,
    pub buyer_id: i64,
    pub transaction_ref: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "DeletedAt", default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Body for `POST /api/payments/initiate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitiatePaymentRequest {
    pub escrow_id: i64,
    pub amount: Decimal,
    pub currency: String,
}

impl InitiatePaymentRequest {
    pub fn new(escrow_id: i64, amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            escrow_id,
            amount,
            currency: currency.into(),
        }
    }
}
