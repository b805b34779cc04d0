use std::collections::BTreeMap;
use std::str::FromStr;
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Supported menu locales. Japanese is the fallback.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Locale {
    #[display("en")]
    En,
    #[display("zh")]
    Zh,
    #[display("ko")]
    Ko,
    #[display("ja")]
    Ja,
}

impl Locale {
    pub const FALLBACK: Locale = Locale::Ja;
}

impl Default for Locale {
    fn default() -> Self {
        Self::FALLBACK
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "zh" => Ok(Self::Zh),
            "ko" => Ok(Self::Ko),
            "ja" => Ok(Self::Ja),
            s => Err(format!("Invalid Locale: {s}")),
        }
    }
}

/// One logical text field keyed by locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct LocalizedText(BTreeMap<Locale, String>);

impl LocalizedText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, skipping absent or blank values.
    pub fn with(mut self, locale: Locale, value: Option<String>) -> Self {
        if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
            self.0.insert(locale, value);
        }
        self
    }

    /// Value for `locale`, then the fallback locale, then any value at all.
    pub fn resolve(&self, locale: Locale) -> Option<&str> {
        self.0
            .get(&locale)
            .or_else(|| self.0.get(&Locale::FALLBACK))
            .or_else(|| self.0.values().next())
            .map(String::as_str)
    }
}

/// Families of localized fields an entity may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldFamily {
    Name,
    Description,
}

pub(crate) trait Localized {
    fn field(&self, family: FieldFamily) -> Option<&LocalizedText>;
}

/// Resolve a localized field of `entity` for `locale`. Missing fields resolve to an empty string.
pub(crate) fn localized_field(entity: &impl Localized, locale: Locale, family: FieldFamily) -> String {
    entity
        .field(family)
        .and_then(|text| text.resolve(locale))
        .unwrap_or_default()
        .to_string()
}
