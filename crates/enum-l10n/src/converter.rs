//! Typed conversion between enum values and localized labels.
//!
//! # Example
//!
//! ```
//! use enum_l10n::catalog::{LocaleStrings, StringCatalog};
//! use enum_l10n::{EnumConverter, impl_localized_flags};
//!
//! bitflags::bitflags! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub struct Perm: u32 {
//!         const READ = 1;
//!         const WRITE = 2;
//!         const EXECUTE = 4;
//!     }
//! }
//! impl_localized_flags!(Perm as "Perm" {
//!     READ => "Read",
//!     WRITE => "Write",
//!     EXECUTE => "Execute",
//! });
//!
//! let mut en = LocaleStrings::new();
//! en.insert("Perm_Read", "Read");
//! en.insert("Perm_Write", "Write");
//! en.insert("Perm_Execute", "Execute");
//! let mut catalog = StringCatalog::new();
//! catalog.add_locale("en", en);
//!
//! let perms = EnumConverter::<Perm, _>::new(catalog).unwrap();
//! assert_eq!(perms.to_label(Perm::READ | Perm::WRITE, "en"), "Read, Write");
//! assert_eq!(perms.parse_label("Read, Write", "en"), Some(Perm::READ | Perm::WRITE));
//! assert_eq!(perms.parse_label("Read, Bogus", "en"), Some(Perm::READ));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::cache::CultureCache;
use crate::config::ConverterConfig;
use crate::descriptor::{EnumDescriptor, LocalizedEnum};
use crate::error::ConfigError;
use crate::localizer::EnumLocalizer;
use crate::lookup::StringLookup;

/// Converts values of `E` to labels through the lookup `L`, and back.
///
/// A converter is meant to be built once per type and shared; it is
/// `Send + Sync` whenever `L` is.
pub struct EnumConverter<E, L> {
    localizer: EnumLocalizer<L>,
    _enum: PhantomData<fn() -> E>,
}

impl<E: LocalizedEnum, L: StringLookup> EnumConverter<E, L> {
    /// Create a converter with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `E`'s registration is not a usable enum.
    pub fn new(lookup: L) -> Result<Self, ConfigError> {
        Self::with_config(lookup, ConverterConfig::default())
    }

    /// Create a converter with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `E`'s registration or `config` is invalid.
    pub fn with_config(lookup: L, config: ConverterConfig) -> Result<Self, ConfigError> {
        let descriptor = EnumDescriptor::of::<E>()?;
        Ok(Self {
            localizer: EnumLocalizer::with_config(descriptor, lookup, config)?,
            _enum: PhantomData,
        })
    }

    /// Use a shared cache instead of the private one.
    #[must_use]
    pub fn with_cache(self, cache: Arc<CultureCache>) -> Self {
        Self {
            localizer: self.localizer.with_cache(cache),
            _enum: PhantomData,
        }
    }

    /// The untyped localizer underneath.
    #[must_use]
    pub fn localizer(&self) -> &EnumLocalizer<L> {
        &self.localizer
    }

    /// Whether `E` is a flags type.
    #[must_use]
    pub fn is_flags(&self) -> bool {
        self.localizer.descriptor().is_flags()
    }

    /// Localized label of a single value, or its key if untranslated.
    #[must_use]
    pub fn label_of(&self, value: E, locale: &str) -> String {
        self.localizer.label_of(value.to_bits(), locale)
    }

    /// Render a value as a label; combined flags become a delimited list.
    #[must_use]
    pub fn to_label(&self, value: E, locale: &str) -> String {
        self.localizer.to_label(value.to_bits(), locale)
    }

    /// Parse a label (or delimited flag labels) back into a value.
    ///
    /// Returns `None` when a plain type's label is unknown.
    #[must_use]
    pub fn parse_label(&self, text: &str, locale: &str) -> Option<E> {
        self.localizer
            .parse_label(text, locale)
            .and_then(E::from_bits)
    }

    /// [`to_label`](Self::to_label) in the configured default locale.
    #[must_use]
    pub fn to_label_default(&self, value: E) -> String {
        self.to_label(value, &self.localizer.config().default_locale)
    }

    /// [`parse_label`](Self::parse_label) in the configured default locale.
    #[must_use]
    pub fn parse_label_default(&self, text: &str) -> Option<E> {
        self.parse_label(text, &self.localizer.config().default_locale)
    }

    /// Every defined member with its label, in declaration order.
    #[must_use]
    pub fn labels(&self, locale: &str) -> Vec<(String, E)> {
        self.localizer
            .labels(locale)
            .into_iter()
            .filter_map(|(label, bits)| E::from_bits(bits).map(|value| (label, value)))
            .collect()
    }

    /// Keys of members without a translation for `locale`.
    #[must_use]
    pub fn missing_translations(&self, locale: &str) -> Vec<String> {
        self.localizer.missing_translations(locale)
    }

    /// Drop the cached label map for `locale`.
    pub fn invalidate(&self, locale: &str) -> bool {
        self.localizer.invalidate(locale)
    }

    /// Drop every cached label map of this converter.
    pub fn clear_cache(&self) {
        self.localizer.clear_cache();
    }
}

impl<E: LocalizedEnum, L: fmt::Debug> fmt::Debug for EnumConverter<E, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnumConverter")
            .field("type_name", &E::TYPE_NAME)
            .field("localizer", &self.localizer)
            .finish()
    }
}
