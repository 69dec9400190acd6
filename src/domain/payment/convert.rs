//! Conversions from wire types to domain types for payments.

use super::wire::PaymentResponse;
use super::{Payment, TransactionStatus, ValidationError};

impl TryFrom<PaymentResponse> for Payment {
    type Error = ValidationError;

    fn try_from(resp: PaymentResponse) -> Result<Self, Self::Error> {
        let id = resp.id.ok_or(ValidationError::MissingId)?;
        let status = TransactionStatus::from_str(&resp.status)
            .ok_or_else(|| ValidationError::InvalidStatus(resp.status.clone()))?;

        Ok(Self {
            id,
            escrow_id: resp.escrow_id,
            buyer_id: resp.buyer_id,
            transaction_ref: resp.transaction_ref,
            amount: resp.amount,
            currency: resp.currency,
            status,
            payment_url: resp.payment_url,
            created_at: resp.created_at,
            updated_at: resp.updated_at,
        })
    }
}
