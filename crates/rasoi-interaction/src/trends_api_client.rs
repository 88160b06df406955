//! TrendsApiClient - REST client for the food popularity endpoint.

use async_trait::async_trait;
use rasoi_core::Result;
use rasoi_core::config::ApiConfig;
use rasoi_core::trends::{FoodTrend, TrendsError, TrendsService, normalize_trends_response};
use reqwest::Client;
use std::time::Duration;

/// `TrendsService` backed by an HTTP GET.
#[derive(Clone)]
pub struct TrendsApiClient {
    client: Client,
    endpoint: String,
}

impl TrendsApiClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: crate::build_http_client(timeout)?,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        Self::new(api.trends_endpoint(), api.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TrendsService for TrendsApiClient {
    async fn fetch_trends(&self) -> std::result::Result<Vec<FoodTrend>, TrendsError> {
        tracing::debug!(endpoint = %self.endpoint, "GET food trends");

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|err| TrendsError::Network {
                message: err.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| TrendsError::Network {
            message: err.to_string(),
        })?;

        normalize_trends_response(status, &body)
    }
}
