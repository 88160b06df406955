//! Application configuration model.
//!
//! Loaded from `~/.config/rasoi/config.toml` by the infrastructure crate;
//! every field has a default so a missing file is a valid configuration.

use crate::i18n::{DEFAULT_LANGUAGE, TranslationCatalog};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_PREDICTION_PATH: &str = "/api/suggest";
pub const DEFAULT_TRENDS_PATH: &str = "/api/food-trends";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct RasoiConfig {
    pub api: ApiConfig,
    pub ui: UiConfig,
    /// Extra catalog entries per language, merged over the built-in strings.
    pub translations: HashMap<String, HashMap<String, String>>,
}

impl RasoiConfig {
    /// Built-in catalog with this configuration's overrides applied.
    pub fn catalog(&self) -> TranslationCatalog {
        let mut catalog = TranslationCatalog::builtin();
        for (language, entries) in &self.translations {
            catalog.merge(language.clone(), entries.clone());
        }
        catalog
    }
}

/// Locations of the remote collaborators.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub prediction_path: String,
    pub trends_path: String,
    /// Full prediction URL; wins over `base_url + prediction_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction_url: Option<String>,
    /// Full trends URL; wins over `base_url + trends_path`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            prediction_path: DEFAULT_PREDICTION_PATH.to_string(),
            trends_path: DEFAULT_TRENDS_PATH.to_string(),
            prediction_url: None,
            trends_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    pub fn prediction_endpoint(&self) -> String {
        self.prediction_url
            .clone()
            .unwrap_or_else(|| join_url(&self.base_url, &self.prediction_path))
    }

    pub fn trends_endpoint(&self) -> String {
        self.trends_url
            .clone()
            .unwrap_or_else(|| join_url(&self.base_url, &self.trends_path))
    }

    /// Whole-request timeout; `0` means the default.
    pub fn timeout(&self) -> Duration {
        match self.timeout_secs {
            0 => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            secs => Duration::from_secs(secs),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Catalog language for CLI chrome strings
    pub language: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
