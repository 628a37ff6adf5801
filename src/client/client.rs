//! # Client Core
//!
//! Minimal core client: one method per patient endpoint, one round trip each.
//!
//! ## Responsibility
//!
//! [`ClientCore`] builds the request for an endpoint, sends it through its
//! [`Transport`], and returns the decoded envelope. It does not look at the
//! `success` flag, talk to the user, or navigate; those concerns belong to the
//! [`PatientClient`](super::middleware::PatientClient).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use patient_client::client::ClientCore;
//! use patient_client::common::connection::HttpTransport;
//!
//! let core = ClientCore::new(HttpTransport::new(&config.api)?);
//! let result = core.get_patient("3").await?;
//! ```

use log::info;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::common::connection::Transport;
use crate::common::error::ClientResult;
use crate::common::messages::{ApiRequest, ApiResult, PatientInput, PatientUpdateInput};

/// Issues patient API requests through a [`Transport`].
///
/// # Fields
///
/// * `transport` - How requests reach the API
/// * `next_request_id` - Counter tagging each request in the logs
pub struct ClientCore<T> {
    transport: T,
    next_request_id: AtomicU64,
}

impl<T: Transport> ClientCore<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_request_id: AtomicU64::new(1),
        }
    }

    /// Access the underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends a new patient to `POST /api/paciente/criar`.
    pub async fn create_patient(&self, input: &PatientInput) -> ClientResult<ApiResult> {
        self.execute(ApiRequest::create(input)?).await
    }

    /// Fetches a patient and its derived metrics from `GET /api/paciente/{id}`.
    pub async fn get_patient(&self, patient_id: &str) -> ClientResult<ApiResult> {
        self.execute(ApiRequest::get(patient_id)).await
    }

    /// Sends a pruned partial update to `PUT /api/paciente/{id}/atualizar`.
    pub async fn update_patient(
        &self,
        patient_id: &str,
        update: &PatientUpdateInput,
    ) -> ClientResult<ApiResult> {
        self.execute(ApiRequest::update(patient_id, update)?).await
    }

    /// Removes a patient through `DELETE /api/paciente/{id}/deletar`.
    pub async fn delete_patient(&self, patient_id: &str) -> ClientResult<ApiResult> {
        self.execute(ApiRequest::delete(patient_id)).await
    }

    async fn execute(&self, request: ApiRequest) -> ClientResult<ApiResult> {
        let request_id = self.next_request_id.fetch_add(1, Ordering::Relaxed);
        info!("📤 Request #{}: {} {}", request_id, request.method, request.path);

        let result = self.transport.send(request).await?;

        info!(
            "📨 Response #{}: success={}",
            request_id, result.success
        );
        Ok(result)
    }
}
