//! Prediction collaborator module.
//!
//! # Module Structure
//!
//! - `model`: request/payload types (`PredictionRequest`, `PredictionPayload`)
//! - `error`: `PredictionError`
//! - `normalize`: status + body → payload or error
//! - `render`: chat-style display text
//! - `invoker`: `PredictionService` trait and `TerminalActionInvoker`

mod error;
mod invoker;
mod model;
mod normalize;
mod render;

pub use error::PredictionError;
pub use invoker::{PredictionService, TerminalActionInvoker};
pub use model::{
    PredictionPayload, PredictionRequest, PredictionSummary, ReplyLanguage, SuggestionOption,
};
pub use normalize::{error_indicator, normalize_response};
pub use render::{render_prediction, render_prediction_error, render_summary};
