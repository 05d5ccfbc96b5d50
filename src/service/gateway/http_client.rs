//! `reqwest` implementation of [`LoanServiceGateway`].

use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::LoanServiceGateway;
use super::error_mapping::{map_status_error, map_transport_error};
use crate::config::LoanAdminConfig;
use crate::service::error::{LoanServiceError, ServiceOperation};
use crate::service::models::{
    AadharNumber, ApplicationDetail, ApprovalRequest, DataEnvelope, LoanApplication,
    StatusUpdateRequest,
};

const ADMIN_SEGMENT: &str = "admin";

/// Gateway that performs HTTP requests against the loan service.
#[derive(Debug, Clone)]
pub struct HttpLoanGateway {
    client: Client,
    base_url: Url,
}

impl HttpLoanGateway {
    /// Creates a gateway rooted at `base_url`.
    ///
    /// Requests have no deadline unless `timeout` is provided.
    ///
    /// # Errors
    ///
    /// Returns [`LoanServiceError::InvalidUrl`] when `base_url` cannot carry
    /// a path, or [`LoanServiceError::Configuration`] when the HTTP client
    /// cannot be constructed.
    pub fn new(base_url: Url, timeout: Option<Duration>) -> Result<Self, LoanServiceError> {
        if base_url.cannot_be_a_base() {
            return Err(LoanServiceError::InvalidUrl(base_url.to_string()));
        }

        let builder = timeout.map_or_else(Client::builder, |limit| {
            Client::builder().timeout(limit)
        });
        let client = builder
            .build()
            .map_err(|error| LoanServiceError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;

        Ok(Self { client, base_url })
    }

    /// Creates a gateway from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Propagates URL validation and client construction failures.
    pub fn from_config(config: &LoanAdminConfig) -> Result<Self, LoanServiceError> {
        Self::new(config.service_url()?, config.request_timeout())
    }

    /// Root URL the gateway was built with.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, LoanServiceError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| LoanServiceError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn send(
        operation: ServiceOperation,
        request: RequestBuilder,
    ) -> Result<Response, LoanServiceError> {
        let response = request
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        tracing::debug!(%operation, status = status.as_u16(), "loan service responded");
        if status == StatusCode::OK {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(operation, status, &body))
    }

    async fn read_data<T: DeserializeOwned>(
        operation: ServiceOperation,
        response: Response,
    ) -> Result<T, LoanServiceError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        let envelope: DataEnvelope<T> =
            serde_json::from_slice(&bytes).map_err(|error| LoanServiceError::Decode {
                operation,
                message: error.to_string(),
            })?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl LoanServiceGateway for HttpLoanGateway {
    async fn list_applications(&self) -> Result<Vec<LoanApplication>, LoanServiceError> {
        let operation = ServiceOperation::ListApplications;
        let url = self.endpoint(&[ADMIN_SEGMENT, "loan-applications"])?;
        tracing::debug!(%operation, %url, "sending loan service request");

        let response = Self::send(operation, self.client.get(url)).await?;
        Self::read_data(operation, response).await
    }

    async fn view_application(
        &self,
        aadhar_number: &AadharNumber,
    ) -> Result<ApplicationDetail, LoanServiceError> {
        let operation = ServiceOperation::ViewApplication;
        let url = self.endpoint(&[ADMIN_SEGMENT, "view-application", aadhar_number.as_str()])?;
        tracing::debug!(%operation, %url, "sending loan service request");

        let response = Self::send(operation, self.client.get(url)).await?;
        Self::read_data(operation, response).await
    }

    async fn update_status(&self, request: &StatusUpdateRequest) -> Result<(), LoanServiceError> {
        let operation = ServiceOperation::UpdateStatus;
        let url = self.endpoint(&[ADMIN_SEGMENT, "update-loan-status"])?;
        tracing::debug!(%operation, %url, status = %request.status, "sending loan service request");

        Self::send(operation, self.client.post(url).json(request)).await?;
        Ok(())
    }

    async fn approve_loan(&self, request: &ApprovalRequest) -> Result<(), LoanServiceError> {
        let operation = ServiceOperation::ApproveLoan;
        let url = self.endpoint(&[ADMIN_SEGMENT, "approve-loan"])?;
        tracing::debug!(%operation, %url, "sending loan service request");

        Self::send(operation, self.client.post(url).json(request)).await?;
        Ok(())
    }
}
