//! Effective configuration: file, then environment, then explicit overrides.

use crate::paths::RasoiPaths;
use crate::storage::{ConfigStorage, ConfigStorageError};
use rasoi_core::config::RasoiConfig;
use std::path::PathBuf;

pub const ENV_BASE_URL: &str = "RASOI_API_BASE_URL";
pub const ENV_PREDICTION_URL: &str = "RASOI_PREDICTION_URL";
pub const ENV_TRENDS_URL: &str = "RASOI_TRENDS_URL";
pub const ENV_TIMEOUT_SECS: &str = "RASOI_TIMEOUT_SECS";
pub const ENV_LANGUAGE: &str = "RASOI_LANGUAGE";

/// Values given on the command line; they beat file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub prediction_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub language: Option<String>,
}

/// Resolves the configuration the application runs with.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: Option<PathBuf>,
}

impl ConfigService {
    /// Uses `~/.config/rasoi/config.toml` (skipped if the platform has no
    /// config directory).
    pub fn new() -> Self {
        Self {
            path: RasoiPaths::config_file().ok(),
        }
    }

    /// Uses an explicit file path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Loads the file (defaults when absent), then applies environment
    /// variables and finally `overrides`.
    pub fn load(&self, overrides: &ConfigOverrides) -> Result<RasoiConfig, ConfigStorageError> {
        self.load_with_env(overrides, |key| std::env::var(key).ok())
    }

    /// Same as [`ConfigService::load`] with an injectable environment lookup.
    pub fn load_with_env<F>(
        &self,
        overrides: &ConfigOverrides,
        env: F,
    ) -> Result<RasoiConfig, ConfigStorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match &self.path {
            Some(path) => {
                let loaded = ConfigStorage::new(path.clone()).load()?;
                if loaded.is_none() {
                    tracing::debug!(path = %path.display(), "No config file, using defaults");
                }
                loaded.unwrap_or_default()
            }
            None => RasoiConfig::default(),
        };

        apply_env(&mut config, env);
        apply_overrides(&mut config, overrides);

        tracing::debug!(
            prediction = %config.api.prediction_endpoint(),
            trends = %config.api.trends_endpoint(),
            timeout_secs = config.api.timeout_secs,
            "Configuration resolved"
        );

        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_env<F>(config: &mut RasoiConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(base_url) = non_empty(ENV_BASE_URL) {
        config.api.base_url = base_url;
    }
    if let Some(url) = non_empty(ENV_PREDICTION_URL) {
        config.api.prediction_url = Some(url);
    }
    if let Some(url) = non_empty(ENV_TRENDS_URL) {
        config.api.trends_url = Some(url);
    }
    if let Some(raw) = non_empty(ENV_TIMEOUT_SECS) {
        match raw.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => config.api.timeout_secs = secs,
            _ => tracing::warn!(value = %raw, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
        }
    }
    if let Some(language) = non_empty(ENV_LANGUAGE) {
        config.ui.language = language;
    }
}

fn apply_overrides(config: &mut RasoiConfig, overrides: &ConfigOverrides) {
    if let Some(base_url) = &overrides.base_url {
        config.api.base_url = base_url.clone();
    }
    if let Some(url) = &overrides.prediction_url {
        config.api.prediction_url = Some(url.clone());
    }
    if let Some(secs) = overrides.timeout_secs.filter(|secs| *secs > 0) {
        config.api.timeout_secs = secs;
    }
    if let Some(language) = &overrides.language {
        config.ui.language = language.clone();
    }
}
