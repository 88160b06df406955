//! PredictionApiClient - REST client for the dish suggestion endpoint.
//!
//! Posts the collected values as JSON and normalizes every outcome
//! (transport failure, HTTP status, body) into `PredictionError`.

use async_trait::async_trait;
use rasoi_core::config::ApiConfig;
use rasoi_core::prediction::{
    PredictionError, PredictionPayload, PredictionRequest, PredictionService, normalize_response,
};
use rasoi_core::Result;
use reqwest::Client;
use std::time::Duration;

/// `PredictionService` backed by an HTTP POST.
#[derive(Clone)]
pub struct PredictionApiClient {
    client: Client,
    endpoint: String,
}

impl PredictionApiClient {
    /// Creates a client for `endpoint` whose requests give up after `timeout`.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self::with_client(crate::build_http_client(timeout)?, endpoint))
    }

    /// Creates a client from the API section of the configuration.
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        Self::new(api.prediction_endpoint(), api.timeout())
    }

    /// Uses a preconfigured `reqwest::Client`.
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionService for PredictionApiClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> std::result::Result<PredictionPayload, PredictionError> {
        tracing::debug!(endpoint = %self.endpoint, "POST prediction request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|err| map_transport_error(&err))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| map_transport_error(&err))?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "Prediction response");

        normalize_response(status.as_u16(), &body)
    }
}

fn map_transport_error(err: &reqwest::Error) -> PredictionError {
    let timed_out = err.is_timeout();
    let message = if timed_out {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed ({err})")
    } else {
        err.to_string()
    };
    PredictionError::network(message, timed_out)
}
