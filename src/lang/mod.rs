//! Translations
//!
//! English and Brazilian Portuguese string tables. Lookups fall back to
//! English, then to the key itself.

mod strings;

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// UI language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-br")]
    PtBr,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::PtBr => "pt-br",
        }
    }

    pub fn toggled(&self) -> Language {
        match self {
            Language::En => Language::PtBr,
            Language::PtBr => Language::En,
        }
    }

    fn table(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::En => strings::EN,
            Language::PtBr => strings::PT_BR,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Key lookup for the active language
#[derive(Debug, Clone)]
pub struct Translator {
    language: Language,
    active: HashMap<&'static str, &'static str>,
    fallback: HashMap<&'static str, &'static str>,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            active: language.table().iter().copied().collect(),
            fallback: Language::En.table().iter().copied().collect(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            *self = Self::new(language);
        }
    }

    /// Translated text, if either table has `key`
    pub fn lookup(&self, key: &str) -> Option<&'static str> {
        self.active
            .get(key)
            .or_else(|| self.fallback.get(key))
            .copied()
    }

    /// Translated text, or the key itself
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(key)
    }

    /// Translated text, or `default` when neither table has `key`
    pub fn t_or<'a>(&self, key: &str, default: &'a str) -> &'a str {
        self.lookup(key).unwrap_or(default)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(Language::default())
    }
}
