//! Escrows sub-client — create, fetch, list, release.

use crate::client::SafeDealClient;
use crate::domain::escrow::wire::{CreateEscrowRequest, EscrowResponse};
use crate::domain::escrow::{Escrow, EscrowStatus, ValidationError};
use crate::error::SdkError;
use crate::http::RetryPolicy;
use crate::notice::NoticePolicy;
use crate::shared::MessageResponse;

/// Sub-client for escrow operations.
pub struct Escrows<'a> {
    pub(crate) client: &'a SafeDealClient,
}

impl<'a> Escrows<'a> {
    /// Create a new escrow with the caller as buyer.
    pub async fn create(&self, request: &CreateEscrowRequest) -> Result<Escrow, SdkError> {
        let resp: EscrowResponse = self
            .client
            .http
            .post(
                "/api/escrows",
                request,
                RetryPolicy::None,
                NoticePolicy::Surface,
            )
            .await?;
        convert(resp)
    }

    /// Fetch a single escrow by id.
    pub async fn get(&self, id: i64) -> Result<Escrow, SdkError> {
        let resp: EscrowResponse = self
            .client
            .http
            .get(
                &format!("/api/escrows/{}", id),
                RetryPolicy::Idempotent,
                NoticePolicy::Surface,
            )
            .await?;
        convert(resp)
    }

    /// List the current user's escrows.
    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<Vec<Escrow>, SdkError> {
        let mut path = String::from("/api/escrows");
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

        let resp: Vec<EscrowResponse> = self
            .client
            .http
            .get(&path, RetryPolicy::Idempotent, NoticePolicy::Surface)
            .await?;
        resp.into_iter().map(convert).collect()
    }

    /// List the current user's escrows in one lifecycle status.
    pub async fn list_by_status(&self, status: EscrowStatus) -> Result<Vec<Escrow>, SdkError> {
        let path = format!("/api/escrows?status={}", status.as_str());
        let resp: Vec<EscrowResponse> = self
            .client
            .http
            .get(&path, RetryPolicy::Idempotent, NoticePolicy::Surface)
            .await?;
        resp.into_iter().map(convert).collect()
    }

    /// Release the held funds to the seller.
    ///
    /// The endpoint mutates despite being a GET, so it is never retried.
    pub async fn release(&self, id: i64) -> Result<MessageResponse, SdkError> {
        self.client
            .http
            .get(
                &format!("/api/escrows/{}/release", id),
                RetryPolicy::None,
                NoticePolicy::Surface,
            )
            .await
    }
}

fn convert(resp: EscrowResponse) -> Result<Escrow, SdkError> {
    resp.try_into()
        .map_err(|e: ValidationError| SdkError::Validation(e.to_string()))
}
