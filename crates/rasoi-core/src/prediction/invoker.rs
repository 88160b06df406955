//! Terminal action: turning collected values into one prediction call.

use super::error::PredictionError;
use super::model::{PredictionPayload, PredictionRequest};
use crate::dialogue::SlotValues;
use async_trait::async_trait;
use std::sync::Arc;

/// The prediction collaborator.
///
/// One capability: send a request, get back a normalized payload or error.
/// Implementations must capture every transport failure as a
/// `PredictionError` instead of panicking.
#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionPayload, PredictionError>;
}

/// Packages a completed value mapping and performs exactly one outbound call.
#[derive(Clone)]
pub struct TerminalActionInvoker {
    service: Arc<dyn PredictionService>,
}

impl TerminalActionInvoker {
    pub fn new(service: Arc<dyn PredictionService>) -> Self {
        Self { service }
    }

    /// Builds the request and calls the collaborator once.
    ///
    /// Missing required values are reported without making a call. No retry
    /// happens here; callers that want one invoke again with the same values.
    pub async fn invoke(&self, values: &SlotValues) -> Result<PredictionPayload, PredictionError> {
        let request = PredictionRequest::from_values(values)?;

        tracing::info!(
            dish_name = %request.dish_name,
            order_date = %request.order_date,
            option = %request.option,
            language = %request.language,
            "Requesting prediction"
        );

        let result = self.service.predict(&request).await;

        match &result {
            Ok(_) => tracing::debug!("Prediction received"),
            Err(err) => tracing::warn!(
                error = %err,
                retryable = err.is_retryable(),
                "Prediction failed"
            ),
        }

        result
    }
}
