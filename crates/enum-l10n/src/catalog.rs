//! Static per-locale resource tables with locale fallback.
//!
//! # Invariants
//!
//! 1. **Fallback chain terminates**: every lookup walks the chain exactly
//!    once, returning `None` if no locale provides the key.
//!
//! 2. **Thread safety**: `StringCatalog` is `Send + Sync` (all data is
//!    immutable after construction).
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing key | Key not in any locale | Returns `None` |
//! | Missing locale | Locale not loaded | Falls through chain |
//! | Empty catalog | No locales loaded | All lookups return `None` |
//! | Malformed JSON | `from_json` input invalid | `I18nError::ParseError` |

use std::borrow::Cow;
use std::collections::HashMap;

use crate::lookup::StringLookup;

/// Locale identifier (e.g., `"en"`, `"en-US"`, `"ru"`).
pub type Locale = String;

/// Errors from loading resource tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I18nError {
    /// A locale string was malformed.
    InvalidLocale(String),
    /// A resource file could not be parsed.
    ParseError(String),
}

impl std::fmt::Display for I18nError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidLocale(l) => write!(f, "invalid locale: {l}"),
            Self::ParseError(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for I18nError {}

/// Check that a locale tag is non-empty and made of ASCII alphanumeric
/// subtags separated by `-` or `_`.
///
/// # Errors
///
/// Returns [`I18nError::InvalidLocale`] for malformed tags.
pub fn validate_locale(locale: &str) -> Result<(), I18nError> {
    let well_formed = !locale.is_empty()
        && locale
            .split(['-', '_'])
            .all(|sub| !sub.is_empty() && sub.chars().all(|c| c.is_ascii_alphanumeric()));
    if well_formed {
        Ok(())
    } else {
        Err(I18nError::InvalidLocale(locale.to_string()))
    }
}

/// Strings for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleStrings {
    strings: HashMap<String, String>,
}

impl LocaleStrings {
    /// Create an empty locale string set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a string, replacing any previous value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    /// Look up a string by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the locale has no strings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over all keys in this locale.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut strings = Self::new();
        for (key, value) in iter {
            strings.insert(key, value);
        }
        strings
    }
}

/// Resource tables for every locale, with a fallback chain.
///
/// # Example
///
/// ```
/// use enum_l10n::catalog::{LocaleStrings, StringCatalog};
///
/// let mut catalog = StringCatalog::new();
/// catalog.add_locale("en", [("Suit_Hearts", "Hearts")].into_iter().collect());
/// catalog.add_locale("fr", [("Suit_Hearts", "Cœurs")].into_iter().collect());
/// catalog.add_locale("de", LocaleStrings::new());
/// catalog.set_fallback_chain(vec!["en".into()]);
///
/// assert_eq!(catalog.get("fr", "Suit_Hearts"), Some("Cœurs"));
/// assert_eq!(catalog.get("de", "Suit_Hearts"), Some("Hearts"));
/// assert_eq!(catalog.get("de", "Suit_Spades"), None);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: HashMap<Locale, LocaleStrings>,
    fallback_chain: Vec<Locale>,
}

impl StringCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add strings for a locale, replacing any previous table.
    pub fn add_locale(&mut self, locale: impl Into<String>, strings: LocaleStrings) {
        self.locales.insert(locale.into(), strings);
    }

    /// Set the locales tried, in order, when the requested locale lacks a key.
    ///
    /// With `["es-MX", "es", "en"]` a miss in Mexican Spanish is retried in
    /// generic Spanish and then in English.
    pub fn set_fallback_chain(&mut self, chain: Vec<Locale>) {
        self.fallback_chain = chain;
    }

    /// Load a catalog from a JSON object of locale tables.
    ///
    /// The expected shape is `{ "<locale>": { "<key>": "<string>" } }`,
    /// typically embedded with `include_str!`.
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::ParseError`] if the input is not that shape and
    /// [`I18nError::InvalidLocale`] for a malformed locale tag.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, I18nError> {
        let tables: HashMap<String, HashMap<String, String>> =
            serde_json::from_str(json).map_err(|e| I18nError::ParseError(e.to_string()))?;

        let mut catalog = Self::new();
        for (locale, strings) in tables {
            validate_locale(&locale)?;
            catalog.add_locale(locale, strings.into_iter().collect());
        }
        Ok(catalog)
    }

    /// Look up a string by key.
    ///
    /// Tries the specified locale first, then walks the fallback chain.
    /// Returns `None` if no locale provides the key.
    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        if let Some(value) = self.get_exact(locale, key) {
            return Some(value);
        }

        self.fallback_chain
            .iter()
            .filter(|fallback| fallback.as_str() != locale)
            .find_map(|fallback| self.get_exact(fallback, key))
    }

    fn get_exact(&self, locale: &str, key: &str) -> Option<&str> {
        self.locales.get(locale).and_then(|ls| ls.get(key))
    }

    /// All registered locale tags.
    #[must_use]
    pub fn locales(&self) -> Vec<&str> {
        self.locales.keys().map(String::as_str).collect()
    }
}

impl StringLookup for StringCatalog {
    fn lookup<'a>(&'a self, key: &str, locale: &str) -> Option<Cow<'a, str>> {
        self.get(locale, key).map(Cow::Borrowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english_catalog() -> StringCatalog {
        let mut catalog = StringCatalog::new();
        let mut en = LocaleStrings::new();
        en.insert("Suit_Hearts", "Hearts");
        en.insert("Suit_Spades", "Spades");
        catalog.add_locale("en", en);
        catalog.set_fallback_chain(vec!["en".into()]);
        catalog
    }

    #[test]
    fn simple_lookup() {
        let catalog = english_catalog();
        assert_eq!(catalog.get("en", "Suit_Hearts"), Some("Hearts"));
    }

    #[test]
    fn missing_key_returns_none() {
        let catalog = english_catalog();
        assert_eq!(catalog.get("en", "Suit_Clubs"), None);
    }

    #[test]
    fn missing_locale_falls_back() {
        let catalog = english_catalog();
        // "fr" not in catalog, falls back to "en"
        assert_eq!(catalog.get("fr", "Suit_Hearts"), Some("Hearts"));
    }

    #[test]
    fn fallback_chain_order() {
        let mut catalog = StringCatalog::new();

        let mut en = LocaleStrings::new();
        en.insert("Suit_Hearts", "Hearts");
        en.insert("Suit_Spades", "Spades");

        let mut es = LocaleStrings::new();
        es.insert("Suit_Hearts", "Corazones");
        // "Suit_Spades" not in es

        let mut es_mx = LocaleStrings::new();
        es_mx.insert("Suit_Hearts", "Corazón");

        catalog.add_locale("en", en);
        catalog.add_locale("es", es);
        catalog.add_locale("es-MX", es_mx);
        catalog.set_fallback_chain(vec!["es-MX".into(), "es".into(), "en".into()]);

        assert_eq!(catalog.get("es-MX", "Suit_Hearts"), Some("Corazón"));
        // Falls through es-MX -> es -> en
        assert_eq!(catalog.get("es-MX", "Suit_Spades"), Some("Spades"));
    }

    #[test]
    fn no_fallback_chain_means_exact_only() {
        let mut catalog = StringCatalog::new();
        catalog.add_locale("en", [("Suit_Hearts", "Hearts")].into_iter().collect());
        assert_eq!(catalog.get("de", "Suit_Hearts"), None);
    }

    #[test]
    fn lookup_borrows_from_catalog() {
        let catalog = english_catalog();
        let found = catalog.lookup("Suit_Spades", "en");
        assert!(matches!(found, Some(Cow::Borrowed("Spades"))));
    }

    #[test]
    fn empty_catalog() {
        let catalog = StringCatalog::new();
        assert_eq!(catalog.get("en", "anything"), None);
        assert!(catalog.locales().is_empty());
    }

    #[test]
    fn locale_strings_len_and_keys() {
        let ls: LocaleStrings = [("alpha", "A"), ("beta", "B")].into_iter().collect();
        assert_eq!(ls.len(), 2);
        assert!(!ls.is_empty());

        let mut keys: Vec<&str> = ls.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, vec!["alpha", "beta"]);
    }

    #[test]
    fn locale_validation() {
        assert!(validate_locale("en").is_ok());
        assert!(validate_locale("en-US").is_ok());
        assert!(validate_locale("zh_Hant_TW").is_ok());
        assert_eq!(
            validate_locale(""),
            Err(I18nError::InvalidLocale(String::new()))
        );
        assert!(validate_locale("en--US").is_err());
        assert!(validate_locale("en US").is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_loads_tables() {
        let catalog = StringCatalog::from_json(
            r#"{ "en": { "Suit_Hearts": "Hearts" }, "de": { "Suit_Hearts": "Herz" } }"#,
        )
        .unwrap();
        assert_eq!(catalog.get("de", "Suit_Hearts"), Some("Herz"));
        assert_eq!(catalog.locales().len(), 2);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn from_json_rejects_bad_input() {
        assert!(matches!(
            StringCatalog::from_json(r#"{ "en": ["Hearts"] }"#),
            Err(I18nError::ParseError(_))
        ));
        assert_eq!(
            StringCatalog::from_json(r#"{ "e n": {} }"#).unwrap_err(),
            I18nError::InvalidLocale("e n".into())
        );
    }
}
