//! Display text for prediction outcomes.

use super::error::PredictionError;
use super::model::{PredictionPayload, PredictionSummary, SuggestionOption};

const NO_SUGGESTIONS: &str = "No suggestions";

/// Renders a payload as the chat reply, showing only the sections the user
/// asked for.
///
/// Bodies that do not have the known shape are shown as pretty JSON.
pub fn render_prediction(payload: &PredictionPayload, option: SuggestionOption) -> String {
    match payload.summary() {
        Some(summary) => render_summary(&summary, option),
        None => serde_json::to_string_pretty(payload.as_json())
            .unwrap_or_else(|_| payload.as_json().to_string()),
    }
}

pub fn render_summary(summary: &PredictionSummary, option: SuggestionOption) -> String {
    let mut sections = vec![format!(
        "🍽️ Prediction Results for {}\n\n📅 Date: {}\n🌤 Season: {}\n🎉 Festival: {}",
        summary.dish_name, summary.date, summary.season, summary.festival
    )];

    if option.includes_toppings() {
        sections.push(format!("👨‍🍳 Toppings:\n{}", bullet_list(&summary.toppings)));
    }
    if option.includes_addons() {
        sections.push(format!("📦 Add-ons:\n{}", bullet_list(&summary.addons)));
    }

    sections.join("\n\n")
}

pub fn render_prediction_error(error: &PredictionError) -> String {
    format!("⚠️ Error: {}", error.message())
}

fn bullet_list(items: &[String]) -> String {
    if items.is_empty() {
        return NO_SUGGESTIONS.to_string();
    }
    items
        .iter()
        .map(|item| format!("• {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
