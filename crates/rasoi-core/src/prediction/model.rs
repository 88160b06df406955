//! Prediction request and response models.

use super::error::PredictionError;
use crate::dialogue::SlotValues;
use crate::dialogue::slot_ids;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// What the user wants suggestions for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SuggestionOption {
    Topping,
    Addon,
    #[default]
    Both,
}

impl SuggestionOption {
    pub fn includes_toppings(self) -> bool {
        matches!(self, Self::Topping | Self::Both)
    }

    pub fn includes_addons(self) -> bool {
        matches!(self, Self::Addon | Self::Both)
    }
}

/// Language the suggestions are written in.
///
/// Parsed from the lowercase choice token, sent capitalised on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[strum(serialize_all = "lowercase")]
pub enum ReplyLanguage {
    #[default]
    English,
    Marathi,
}

/// Body of the outbound prediction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub dish_name: String,
    pub order_date: String,
    pub option: SuggestionOption,
    pub language: ReplyLanguage,
}

impl PredictionRequest {
    /// Packages collected slot values into a request.
    ///
    /// Dish name and date are required. An absent or unknown option falls
    /// back to `both`, an absent or unknown language to `English`.
    pub fn from_values(values: &SlotValues) -> Result<Self, PredictionError> {
        let dish_name = values
            .get(slot_ids::DISH_NAME)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PredictionError::missing_value(slot_ids::DISH_NAME))?;
        let order_date = values
            .get(slot_ids::ORDER_DATE)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| PredictionError::missing_value(slot_ids::ORDER_DATE))?;

        let option = values
            .get(slot_ids::OPTION_TYPE)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        let language = values
            .get(slot_ids::LANGUAGE)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        Ok(Self {
            dish_name: dish_name.to_string(),
            order_date: order_date.to_string(),
            option,
            language,
        })
    }
}

/// A successful prediction body, passed through exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PredictionPayload(Value);

impl PredictionPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    pub fn into_json(self) -> Value {
        self.0
    }

    /// Typed view of the well-known fields, if the body has that shape.
    pub fn summary(&self) -> Option<PredictionSummary> {
        serde_json::from_value(self.0.clone()).ok()
    }
}

/// The fields the suggestion service is known to return.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionSummary {
    pub dish_name: String,
    pub date: String,
    pub season: String,
    pub festival: String,
    pub toppings: Vec<String>,
    pub addons: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn margherita_values() -> SlotValues {
        [
            (slot_ids::DISH_NAME, "Margherita Pizza"),
            (slot_ids::ORDER_DATE, "2025-10-20"),
            (slot_ids::OPTION_TYPE, "both"),
            (slot_ids::LANGUAGE, "english"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_request_wire_shape() {
        let request = PredictionRequest::from_values(&margherita_values()).unwrap();
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "dish_name": "Margherita Pizza",
                "order_date": "2025-10-20",
                "option": "both",
                "language": "English"
            })
        );
    }

    #[test]
    fn test_marathi_and_addon_tokens() {
        let mut values = margherita_values();
        values.insert(slot_ids::OPTION_TYPE, "addon");
        values.insert(slot_ids::LANGUAGE, "marathi");
        let request = PredictionRequest::from_values(&values).unwrap();
        assert_eq!(request.option, SuggestionOption::Addon);
        assert_eq!(request.language, ReplyLanguage::Marathi);
        assert_eq!(serde_json::to_value(request.language).unwrap(), json!("Marathi"));
    }

    #[test]
    fn test_defaults_for_missing_choices() {
        let values: SlotValues = [
            (slot_ids::DISH_NAME, "Vada Pav"),
            (slot_ids::ORDER_DATE, "2025-08-27"),
        ]
        .into_iter()
        .collect();
        let request = PredictionRequest::from_values(&values).unwrap();
        assert_eq!(request.option, SuggestionOption::Both);
        assert_eq!(request.language, ReplyLanguage::English);
    }

    #[test]
    fn test_missing_dish_name_is_reported() {
        let values: SlotValues = [(slot_ids::ORDER_DATE, "2025-10-20")].into_iter().collect();
        let err = PredictionRequest::from_values(&values).unwrap_err();
        assert_eq!(err, PredictionError::missing_value(slot_ids::DISH_NAME));
    }

    #[test]
    fn test_option_helpers() {
        assert!(SuggestionOption::Topping.includes_toppings());
        assert!(!SuggestionOption::Topping.includes_addons());
        assert!(SuggestionOption::Both.includes_addons());
        assert_eq!(SuggestionOption::Addon.to_string(), "addon");
    }

    #[test]
    fn test_payload_summary() {
        let payload = PredictionPayload::new(json!({
            "dish_name": "Margherita Pizza",
            "date": "2025-10-20",
            "season": "Autumn",
            "festival": "None",
            "toppings": ["Basil", "Olives"],
            "addons": ["Garlic Bread"]
        }));
        let summary = payload.summary().unwrap();
        assert_eq!(summary.season, "Autumn");
        assert_eq!(summary.toppings, vec!["Basil", "Olives"]);
        assert_eq!(summary.addons, vec!["Garlic Bread"]);
    }

    #[test]
    fn test_payload_summary_tolerates_missing_fields() {
        let payload = PredictionPayload::new(json!({ "dish_name": "Poha" }));
        let summary = payload.summary().unwrap();
        assert_eq!(summary.dish_name, "Poha");
        assert!(summary.toppings.is_empty());
    }
}
