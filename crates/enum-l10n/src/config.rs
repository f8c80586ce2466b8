//! Converter configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::catalog::Locale;
use crate::error::ConfigError;

/// Separator placed between flag labels.
pub const DEFAULT_FLAGS_DELIMITER: &str = ", ";

/// Locale used when the caller does not name one.
pub const DEFAULT_LOCALE: &str = "en";

/// Configuration for [`EnumConverter`](crate::EnumConverter) and
/// [`EnumLocalizer`](crate::EnumLocalizer).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ConverterConfig {
    /// Separator used to join and split flag labels.
    pub delimiter: String,
    /// Locale for the `*_default` conversions.
    pub default_locale: Locale,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_FLAGS_DELIMITER.to_string(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ConverterConfig {
    /// Set the flags delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Set the default locale.
    #[must_use]
    pub fn with_default_locale(mut self, locale: impl Into<Locale>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyDelimiter`] if the delimiter is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ConverterConfig::default();
        assert_eq!(config.delimiter, ", ");
        assert_eq!(config.default_locale, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_setters() {
        let config = ConverterConfig::default()
            .with_delimiter(" | ")
            .with_default_locale("de");
        assert_eq!(config.delimiter, " | ");
        assert_eq!(config.default_locale, "de");
    }

    #[test]
    fn empty_delimiter_rejected() {
        let config = ConverterConfig::default().with_delimiter("");
        assert_eq!(config.validate(), Err(ConfigError::EmptyDelimiter));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_fills_missing_fields() {
        let config: ConverterConfig = serde_json::from_str(r#"{ "default_locale": "fr" }"#).unwrap();
        assert_eq!(config.default_locale, "fr");
        assert_eq!(config.delimiter, DEFAULT_FLAGS_DELIMITER);
    }
}
