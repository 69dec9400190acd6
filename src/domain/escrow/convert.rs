//! Conversions from wire types to domain types for escrows.

use super::wire::EscrowResponse;
use super::{Escrow, EscrowStatus, ValidationError};

impl TryFrom<EscrowResponse> for Escrow {
    type Error = ValidationError;

    fn try_from(resp: EscrowResponse) -> Result<Self, Self::Error> {
        let id = resp.id.ok_or(ValidationError::MissingId)?;
        let status = EscrowStatus::from_str(&resp.status)
            .ok_or_else(|| ValidationError::InvalidStatus(resp.status.clone()))?;

        Ok(Self {
            id,
            buyer_id: resp.buyer_id,
            seller_id: resp.seller_id,
            amount: resp.amount,
            status,
            conditions: resp.conditions,
            created_at: resp.created_at,
            updated_at: resp.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn sample_response() -> EscrowResponse {
        serde_json::from_str(
            r#"{
                "ID": 12,
                "buyer_id": 3,
                "seller_id": 4,
                "amount": 250.75,
                "status": "Funded",
                "conditions": "deliver the laptop",
                "CreatedAt": "2024-05-10T08:00:00Z",
                "UpdatedAt": "2024-05-11T08:00:00Z",
                "DeletedAt": null
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_escrow_conversion() {
        let escrow: Escrow = sample_response().try_into().unwrap();
        assert_eq!(escrow.id, 12);
        assert_eq!(escrow.amount, Decimal::new(250_75, 2));
        assert_eq!(escrow.status, EscrowStatus::Funded);
        assert_eq!(escrow.conditions.as_deref(), Some("deliver the laptop"));
        assert!(escrow.created_at.is_some());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let mut resp = sample_response();
        resp.id = None;
        let err = Escrow::try_from(resp).unwrap_err();
        assert_eq!(err, ValidationError::MissingId);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut resp = sample_response();
        resp.status = "Cancelled".to_string();
        let err = Escrow::try_from(resp).unwrap_err();
        assert_eq!(err, ValidationError::InvalidStatus("Cancelled".to_string()));
    }
}
