pub mod chat;
pub mod predict;
pub mod trends;

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;

use rasoi_core::config::RasoiConfig;
use rasoi_core::dialogue::{FlowEngine, Prompt, SlotValues};
use rasoi_core::i18n::{TranslationCatalog, Translator};
use rasoi_core::prediction::{PredictionRequest, SuggestionOption, TerminalActionInvoker};
use rasoi_interaction::{PredictionApiClient, TrendsApiClient};

/// Resolved configuration plus the catalog built from it.
pub struct AppContext {
    pub config: RasoiConfig,
    catalog: TranslationCatalog,
}

impl AppContext {
    pub fn new(config: RasoiConfig) -> Self {
        let catalog = config.catalog();
        if !catalog.has_language(&config.ui.language) {
            tracing::warn!(language = %config.ui.language, "No strings for language, showing keys");
        }
        Self { config, catalog }
    }

    pub fn translator(&self) -> Translator<'_> {
        self.catalog.translator(self.config.ui.language.clone())
    }

    /// Engine wired to the configured suggestion endpoint.
    pub fn flow_engine(&self) -> Result<FlowEngine> {
        let client = PredictionApiClient::from_config(&self.config.api)?;
        tracing::debug!(endpoint = %client.endpoint(), "Prediction client ready");
        Ok(FlowEngine::new(TerminalActionInvoker::new(Arc::new(client))))
    }

    pub fn trends_client(&self) -> Result<TrendsApiClient> {
        Ok(TrendsApiClient::from_config(&self.config.api)?)
    }
}

/// Option type the user picked, for filtering the rendered result.
pub fn chosen_option(values: &SlotValues) -> SuggestionOption {
    PredictionRequest::from_values(values)
        .map(|request| request.option)
        .unwrap_or_default()
}

pub fn print_prompt(prompt: &Prompt) {
    println!("{}", prompt.text.bright_blue());
    for choice in &prompt.choices {
        let icon = choice.icon.as_deref().unwrap_or(" ");
        println!(
            "  {} {} {}",
            icon,
            format!("[{}]", choice.token).bright_cyan(),
            choice.label
        );
    }
}
