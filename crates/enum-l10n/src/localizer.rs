//! Label conversion over raw bit patterns.
//!
//! [`EnumLocalizer`] is the untyped engine behind
//! [`EnumConverter`](crate::EnumConverter): it knows an [`EnumDescriptor`]
//! and a [`StringLookup`], and converts `u32` values to labels and back.
//!
//! # Flags
//!
//! For flags types, a value that is not exactly one defined member is
//! rendered as the labels of every member whose bits are all set in it,
//! in declaration order, joined by the configured delimiter. Parsing splits
//! on the same delimiter, ignores unknown labels, and ORs the rest together.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing translation | Lookup returns `None` or `""` | Key used as label |
//! | Unknown label | Not in the locale's label map | `None` (plain types) |
//! | Unknown flag label | Not in the locale's label map | Ignored |
//! | No known flag labels | Nothing matched | Zero value |

use std::sync::Arc;

#[cfg(feature = "tracing")]
use tracing::trace;

use crate::cache::{CacheScope, CultureCache, LabelMap};
use crate::config::ConverterConfig;
use crate::descriptor::{EnumDescriptor, Member};
use crate::error::ConfigError;
use crate::lookup::StringLookup;

/// Converts bit patterns of one enum type to localized labels and back.
///
/// Each localizer owns a [`CacheScope`], so its label maps stay separate
/// from those of any other localizer in a shared cache, including one for
/// the same type name with a different lookup.
#[derive(Debug)]
pub struct EnumLocalizer<L> {
    descriptor: EnumDescriptor,
    lookup: L,
    cache: Arc<CultureCache>,
    scope: CacheScope,
    config: ConverterConfig,
}

impl<L: StringLookup> EnumLocalizer<L> {
    /// Create a localizer with default configuration and a private cache.
    #[must_use]
    pub fn new(descriptor: EnumDescriptor, lookup: L) -> Self {
        Self {
            scope: CacheScope::new(descriptor.type_name()),
            descriptor,
            lookup,
            cache: Arc::new(CultureCache::new()),
            config: ConverterConfig::default(),
        }
    }

    /// Create a localizer with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` is invalid.
    pub fn with_config(
        descriptor: EnumDescriptor,
        lookup: L,
        config: ConverterConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::new(descriptor, lookup)
        })
    }

    /// Use a shared cache instead of the private one.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<CultureCache>) -> Self {
        self.cache = cache;
        self
    }

    /// The type being converted.
    #[must_use]
    pub fn descriptor(&self) -> &EnumDescriptor {
        &self.descriptor
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// The label map cache.
    #[must_use]
    pub fn cache(&self) -> &Arc<CultureCache> {
        &self.cache
    }

    /// This localizer's partition of the cache.
    #[must_use]
    pub fn scope(&self) -> &CacheScope {
        &self.scope
    }

    /// The lookup back-end.
    #[must_use]
    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Localized label of a single value, or its key if untranslated.
    #[must_use]
    pub fn label_of(&self, bits: u32, locale: &str) -> String {
        self.resolve(self.descriptor.key_for(bits), locale)
    }

    fn member_label(&self, member: &Member, locale: &str) -> String {
        self.resolve(self.descriptor.key_for_name(member.name()), locale)
    }

    fn resolve(&self, key: String, locale: &str) -> String {
        match self.lookup.lookup(&key, locale) {
            Some(label) if !label.is_empty() => label.into_owned(),
            _ => {
                #[cfg(feature = "tracing")]
                trace!(key = key.as_str(), locale, "no translation; using key");
                key
            }
        }
    }

    /// Render a value as a label.
    ///
    /// Plain types and exact members render as one label. Other flags
    /// values render as the delimited labels of their contained members;
    /// a value containing none renders as `""`.
    #[must_use]
    pub fn to_label(&self, bits: u32, locale: &str) -> String {
        if !self.descriptor.is_flags() || self.descriptor.is_defined(bits) {
            return self.label_of(bits, locale);
        }

        self.descriptor
            .members()
            .iter()
            .filter(|member| member.is_contained_in(bits))
            .map(|member| self.member_label(member, locale))
            .collect::<Vec<_>>()
            .join(&self.config.delimiter)
    }

    /// Parse a label back into a value.
    ///
    /// Plain types return `None` for unknown labels. Flags types always
    /// return a value: the OR of every recognized delimited label.
    #[must_use]
    pub fn parse_label(&self, text: &str, locale: &str) -> Option<u32> {
        let map = self.label_map(locale);
        if !self.descriptor.is_flags() {
            return map.get(text);
        }

        let bits = text
            .split(self.config.delimiter.as_str())
            .filter_map(|candidate| map.get(candidate))
            .fold(0, |acc, bits| acc | bits);
        Some(bits)
    }

    /// Every member's label in declaration order, paired with its bits.
    #[must_use]
    pub fn labels(&self, locale: &str) -> Vec<(String, u32)> {
        self.descriptor
            .members()
            .iter()
            .map(|member| (self.member_label(member, locale), member.bits()))
            .collect()
    }

    /// Keys of members without a translation for `locale`.
    #[must_use]
    pub fn missing_translations(&self, locale: &str) -> Vec<String> {
        self.descriptor
            .members()
            .iter()
            .map(|member| self.descriptor.key_for_name(member.name()))
            .filter(|key| {
                self.lookup
                    .lookup(key, locale)
                    .is_none_or(|label| label.is_empty())
            })
            .collect()
    }

    /// Drop the cached label map for `locale`.
    pub fn invalidate(&self, locale: &str) -> bool {
        self.cache.invalidate(&self.scope, locale)
    }

    /// Drop every cached label map of this localizer.
    pub fn clear_cache(&self) {
        self.cache.invalidate_scope(&self.scope);
    }

    /// The reverse label map for `locale`, built on first use.
    #[must_use]
    pub fn label_map(&self, locale: &str) -> Arc<LabelMap> {
        self.cache
            .get_or_build(&self.scope, locale, || {
                self.descriptor
                    .members()
                    .iter()
                    .map(|member| (self.member_label(member, locale), member.bits()))
                    .collect()
            })
    }
}
