//! Localized text model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping from language code to display string.
///
/// Uses a `BTreeMap` so serialization order is stable across runs,
/// which keeps re-imported documents byte-identical.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    /// Language code -> translated string
    pub values: BTreeMap<String, String>,
}

impl LocalizedText {
    /// Create an empty localized text
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Build from a single string, duplicated across the given languages.
    ///
    /// Authors often write `"title": "Foo"` instead of a language map;
    /// the single value becomes the text for every listed language.
    #[must_use]
    pub fn from_single(text: &str, languages: &[&str]) -> Self {
        let mut values = BTreeMap::new();
        for lang in languages {
            values.insert((*lang).to_string(), text.to_string());
        }
        Self { values }
    }

    /// Insert a translation for a language
    pub fn insert(&mut self, language: String, text: String) {
        self.values.insert(language, text);
    }

    /// Look up the text for a language, falling back to the given
    /// fallback language, then to any available translation.
    #[must_use]
    pub fn get(&self, language: &str, fallback: &str) -> Option<&str> {
        self.values
            .get(language)
            .or_else(|| self.values.get(fallback))
            .or_else(|| self.values.values().next())
            .map(String::as_str)
    }

    /// Whether no translation is present at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
