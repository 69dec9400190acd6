//! Payments sub-client — initiate and list escrow payments.

use crate::client::SafeDealClient;
use crate::domain::payment::wire::{InitiatePaymentRequest, PaymentResponse};
use crate::domain::payment::{Payment, TransactionStatus, ValidationError};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::notice::NoticePolicy;

/// Sub-client for payment operations.
pub struct Payments<'a> {
    pub(crate) client: &'a SafeDealClient,
}

impl<'a> Payments<'a> {
    /// Start a payment against an escrow. The response carries the gateway
    /// checkout URL the user must be sent to.
    pub async fn initiate(&self, request: &InitiatePaymentRequest) -> Result<Payment, SdkError> {
        let resp: PaymentResponse = self
            .client
            .http
            .post(
                "/api/payments/initiate",
                request,
                RetryPolicy::None,
                NoticePolicy::Surface,
            )
            .await?;
        convert(resp)
    }

    /// List the current user's payments.
    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Vec<Payment>, SdkError> {
        let mut path = String::from("/api/payments");
        let mut params = Vec::new();
        if let Some(p) = page {
            params.push(format!("page={}", p));
        }
        if let Some(l) = limit {
            params.push(format!("limit={}", l));
        }
        if !params.is_empty() {
            path = format!("{}?{}", path, params.join("&"));
        }

        let resp: Vec<PaymentResponse> = self
            .client
            .http
            .get(&path, RetryPolicy::Idempotent, NoticePolicy::Surface)
            .await?;
        resp.into_iter().map(convert).collect()
    }

    /// List payments made against one escrow.
    pub async fn list_by_escrow(&self, escrow_id: i64) -> Result<Vec<Payment>, SdkError> {
        let path = format!("/api/payments?escrow_id={}", escrow_id);
        let resp: Vec<PaymentResponse> = self
            .client
            .http
            .get(&path, RetryPolicy::Idempotent, NoticePolicy::Surface)
            .await?;
        resp.into_iter().map(convert).collect()
    }

    /// List payments in one settlement status.
    pub async fn list_by_status(&self, status: TransactionStatus) -> Result<Vec<Payment>, SdkError> {
        let path = format!("/api/payments?status={}", status.as_str());
        let resp: Vec<PaymentResponse> = self
            .client
            .http
            .get(&path, RetryPolicy::Idempotent, NoticePolicy::Surface)
            .await?;
        resp.into_iter().map(convert).collect()
    }
}

fn convert(resp: PaymentResponse) -> Result<Payment, SdkError> {
    resp.try_into()
        .map_err(|e: ValidationError| SdkError::Validation(e.to_string()))
}
