//! Translation catalog for UI chrome strings.
//!
//! A read-only `language -> key -> text` table that is built once and passed
//! to whatever renders text. Lookups that miss fall back to the key itself.

use std::collections::HashMap;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Keys every built-in language provides.
pub const CHROME_KEYS: &[&str] = &[
    "app.name",
    "app.subtitle",
    "chefguru.title",
    "chefguru.subtitle",
    "chefguru.trends",
    "chefguru.greeting",
];

const BUILTIN: &[(&str, &[(&str, &str)])] = &[
    (
        "en",
        &[
            ("app.name", "RasoiMitra"),
            ("app.subtitle", "Your Kitchen Partner"),
            ("chefguru.title", "ChefGuru - Your Kitchen Intelligence"),
            ("chefguru.subtitle", "Smart insights for business growth"),
            ("chefguru.trends", "Trend Analysis"),
            (
                "chefguru.greeting",
                "👋 Hello! I can help you find the best toppings or add-ons for your dish 🍛",
            ),
        ],
    ),
    (
        "hi",
        &[
            ("app.name", "रसोईमित्र"),
            ("app.subtitle", "आपका रसोई साथी"),
            ("chefguru.title", "ChefGuru - आपकी रसोई बुद्धिमत्ता"),
            ("chefguru.subtitle", "व्यवसाय विकास के लिए स्मार्ट अंतर्दृष्टि"),
            ("chefguru.trends", "ट्रेंड विश्लेषण"),
            (
                "chefguru.greeting",
                "👋 नमस्ते! मैं आपकी डिश के लिए सबसे अच्छे टॉपिंग या ऐड-ऑन खोजने में मदद कर सकता हूँ 🍛",
            ),
        ],
    ),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationCatalog {
    tables: HashMap<String, HashMap<String, String>>,
}

impl TranslationCatalog {
    /// An empty catalog: every lookup returns its key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-filled with the built-in `en` and `hi` strings.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        for (language, entries) in BUILTIN {
            catalog.merge(
                *language,
                entries.iter().map(|(k, v)| (k.to_string(), v.to_string())),
            );
        }
        catalog
    }

    /// Adds or overrides entries for a language.
    pub fn merge<I>(&mut self, language: impl Into<String>, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.tables
            .entry(language.into())
            .or_default()
            .extend(entries);
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.tables.contains_key(language)
    }

    /// Looks up `key` for `language`, falling back to the key itself.
    pub fn translate<'a>(&'a self, language: &str, key: &'a str) -> &'a str {
        self.tables
            .get(language)
            .and_then(|table| table.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Binds the catalog to one language.
    pub fn translator(&self, language: impl Into<String>) -> Translator<'_> {
        Translator {
            catalog: self,
            language: language.into(),
        }
    }
}

/// A catalog bound to one language.
#[derive(Debug, Clone)]
pub struct Translator<'a> {
    catalog: &'a TranslationCatalog,
    language: String,
}

impl<'a> Translator<'a> {
    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn t(&self, key: &'a str) -> &'a str {
        self.catalog.translate(&self.language, key)
    }
}
