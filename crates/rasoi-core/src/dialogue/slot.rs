//! Slot definitions: what a dialogue step collects and how input is checked.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static ISO_DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("ISO date pattern is valid"));

/// How the user answers a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputKind {
    /// Any typed text.
    FreeText,
    /// Exactly one of the slot's declared choice tokens.
    SingleChoice,
}

/// Whether a slot stores its answer or only triggers the terminal action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotPurpose {
    #[default]
    Collect,
    Confirm,
}

/// One selectable answer of a single-choice slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown to the user (e.g. "Add-ons")
    pub label: String,
    /// Token submitted back to the engine (e.g. "addon")
    pub token: String,
    /// Optional emoji shown next to the label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Choice {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// Pure accept/reject rules attached to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotValidator {
    /// Rejects blank input.
    NonEmpty,
    /// Accepts `YYYY-MM-DD` strings naming a real calendar date.
    IsoDate,
}

impl SlotValidator {
    /// Runs the rule against a candidate value.
    ///
    /// Returns the human-readable rejection reason on failure.
    pub fn validate(&self, value: &str) -> Result<(), String> {
        match self {
            SlotValidator::NonEmpty => {
                if value.trim().is_empty() {
                    Err("A value is required".to_string())
                } else {
                    Ok(())
                }
            }
            SlotValidator::IsoDate => {
                if !ISO_DATE_PATTERN.is_match(value) {
                    return Err(format!(
                        "'{value}' is not in YYYY-MM-DD format (e.g. 2025-10-20)"
                    ));
                }
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .map(|_| ())
                    .map_err(|_| format!("'{value}' is not a real calendar date"))
            }
        }
    }
}

/// A named field the dialogue must collect before completing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Identifier used as the key in the collected values
    pub id: String,
    /// Prompt shown when the slot becomes active
    pub prompt: String,
    pub kind: InputKind,
    /// Declared choices, in display order (single-choice slots only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validator: Option<SlotValidator>,
    #[serde(default)]
    pub purpose: SlotPurpose,
}

impl Slot {
    /// A free-text slot without a validator.
    pub fn free_text(id: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: InputKind::FreeText,
            choices: Vec::new(),
            validator: None,
            purpose: SlotPurpose::Collect,
        }
    }

    /// A single-choice slot that stores the selected token.
    pub fn single_choice(
        id: impl Into<String>,
        prompt: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            id: id.into(),
            prompt: prompt.into(),
            kind: InputKind::SingleChoice,
            choices,
            validator: None,
            purpose: SlotPurpose::Collect,
        }
    }

    /// A single-choice slot whose selection fires the terminal action and
    /// stores nothing.
    pub fn confirmation(id: impl Into<String>, prompt: impl Into<String>, choice: Choice) -> Self {
        Self {
            purpose: SlotPurpose::Confirm,
            ..Self::single_choice(id, prompt, vec![choice])
        }
    }

    pub fn with_validator(mut self, validator: SlotValidator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn is_confirmation(&self) -> bool {
        self.purpose == SlotPurpose::Confirm
    }

    pub fn choice_tokens(&self) -> impl Iterator<Item = &str> {
        self.choices.iter().map(|c| c.token.as_str())
    }

    /// Checks raw input against this slot.
    ///
    /// Order: emptiness, declared choices (case-sensitive), then the validator.
    pub fn check(&self, raw: &str) -> Result<(), String> {
        if raw.trim().is_empty() {
            return Err("Input must not be empty".to_string());
        }

        if self.kind == InputKind::SingleChoice && !self.choice_tokens().any(|t| t == raw) {
            let allowed = self.choice_tokens().collect::<Vec<_>>().join(", ");
            return Err(format!("'{raw}' is not one of: {allowed}"));
        }

        match &self.validator {
            Some(validator) => validator.validate(raw),
            None => Ok(()),
        }
    }
}
