//! Wire types for escrow requests and responses (REST).
//!
//! The backend's ORM serializes record metadata in Go-style casing
//! (`ID`, `CreatedAt`, ...); domain field names stay snake_case.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Raw escrow record from the REST API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EscrowResponse {
    #[serde(rename = "ID", default)]
    pub id: Option<i64>,
    pub buyer_id: i64,
    pub seller_id: i64,
    pub amount: Decimal,
    pub status: String,
    #[serde(default)]
    pub conditions: Option<String>,
    #[serde(rename = "CreatedAt", default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "UpdatedAt", default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(rename = "DeletedAt", default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Body for `POST /api/escrows`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEscrowRequest {
    pub seller_id: i64,
    pub amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<String>,
}

impl CreateEscrowRequest {
    pub fn new(seller_id: i64, amount: Decimal) -> Self {
        Self {
            seller_id,
            amount,
            conditions: None,
        }
    }

    /// Attach the release conditions agreed with the seller.
    pub fn with_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_builder() {
        let request = CreateEscrowRequest::new(9, Decimal::new(125_50, 2))
            .with_conditions("ship within 7 days");
        assert_eq!(request.seller_id, 9);
        assert_eq!(request.conditions.as_deref(), Some("ship within 7 days"));
    }

    #[test]
    fn test_create_request_omits_empty_conditions() {
        let request = CreateEscrowRequest::new(9, Decimal::new(10, 0));
        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("conditions"));
    }
}
