#![forbid(unsafe_code)]

//! Localized labels for enums and bitflags.
//!
//! Converts enum values to human-readable, locale-specific labels and
//! parses those labels back, including bitmask ("flags") types rendered as
//! delimited lists of flag labels.
//!
//! # How it fits together
//! - [`LocalizedEnum`] registers a type: its name, members, and whether it
//!   is a flags type. The [`impl_localized_enum!`] and
//!   [`impl_localized_flags!`] macros write the impl.
//! - A [`StringLookup`] answers "key + locale → string". Static tables live
//!   in [`StringCatalog`]; pluggable services go through [`ServiceLookup`].
//! - [`EnumConverter`] does the conversions, keeping reverse label maps per
//!   locale in a [`CultureCache`].
//!
//! Keys have the form `"{TypeName}_{MemberName}"`; a member without a
//! translation is labelled with its key.

pub mod cache;
pub mod catalog;
pub mod config;
pub mod converter;
pub mod descriptor;
pub mod error;
pub mod localizer;
pub mod lookup;

pub use cache::{CacheScope, CultureCache, LabelMap};
pub use catalog::{I18nError, Locale, LocaleStrings, StringCatalog};
pub use config::{ConverterConfig, DEFAULT_FLAGS_DELIMITER, DEFAULT_LOCALE};
pub use converter::EnumConverter;
pub use descriptor::{EnumDescriptor, LocalizedEnum, Member};
pub use error::ConfigError;
pub use localizer::EnumLocalizer;
pub use lookup::{LocalizationService, NoTranslations, ServiceLookup, StringLookup};

#[doc(hidden)]
pub mod __private {
    pub use bitflags;
}
