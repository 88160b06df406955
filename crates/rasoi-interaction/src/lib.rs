//! HTTP collaborators for the RasoiMitra backend.

pub mod prediction_api_client;
pub mod trends_api_client;

pub use prediction_api_client::PredictionApiClient;
pub use trends_api_client::TrendsApiClient;

use rasoi_core::{RasoiError, Result};
use reqwest::Client;
use std::time::Duration;

/// Builds the shared `reqwest::Client` with a whole-request timeout.
pub(crate) fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| RasoiError::config(format!("failed to build HTTP client: {err}")))
}
