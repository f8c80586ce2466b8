//! String lookup back-ends.
//!
//! A converter only ever asks one question of its back-end: "what is the
//! string for this key in this locale?" [`StringLookup`] is that question.
//! Two families implement it:
//!
//! - static resource tables, see [`StringCatalog`](crate::catalog::StringCatalog);
//! - a pluggable [`LocalizationService`], bound to a resource source by
//!   [`ServiceLookup`].

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::descriptor::LocalizedEnum;

/// Resolve a key to a localized string.
///
/// Returning `None` signals a missing translation; callers substitute the
/// key itself.
pub trait StringLookup: Send + Sync {
    /// Look up `key` for `locale`.
    fn lookup<'a>(&'a self, key: &str, locale: &str) -> Option<Cow<'a, str>>;
}

impl<T: StringLookup + ?Sized> StringLookup for &T {
    fn lookup<'a>(&'a self, key: &str, locale: &str) -> Option<Cow<'a, str>> {
        (**self).lookup(key, locale)
    }
}

impl<T: StringLookup + ?Sized> StringLookup for Arc<T> {
    fn lookup<'a>(&'a self, key: &str, locale: &str) -> Option<Cow<'a, str>> {
        (**self).lookup(key, locale)
    }
}

impl<T: StringLookup + ?Sized> StringLookup for Box<T> {
    fn lookup<'a>(&'a self, key: &str, locale: &str) -> Option<Cow<'a, str>> {
        (**self).lookup(key, locale)
    }
}

/// A pluggable localization service.
///
/// Services organize strings by resource source (typically one per enum
/// type), so a lookup names the resource as well as the key.
///
/// Any `Fn(&str, &str, &str) -> Option<String>` taking
/// `(resource, key, locale)` is a service.
pub trait LocalizationService: Send + Sync {
    /// Localize `key` from `resource` for `locale`.
    fn localize(&self, resource: &str, key: &str, locale: &str) -> Option<String>;
}

impl<F> LocalizationService for F
where
    F: Fn(&str, &str, &str) -> Option<String> + Send + Sync,
{
    fn localize(&self, resource: &str, key: &str, locale: &str) -> Option<String> {
        self(resource, key, locale)
    }
}

/// A [`LocalizationService`] bound to one resource source.
#[derive(Clone)]
pub struct ServiceLookup {
    service: Arc<dyn LocalizationService>,
    resource: String,
}

impl ServiceLookup {
    /// Bind `service` to an explicit resource source.
    #[must_use]
    pub fn new(service: Arc<dyn LocalizationService>, resource: impl Into<String>) -> Self {
        Self {
            service,
            resource: resource.into(),
        }
    }

    /// Bind `service` to the resource named after the enum type.
    #[must_use]
    pub fn for_enum<E: LocalizedEnum>(service: Arc<dyn LocalizationService>) -> Self {
        Self::new(service, E::TYPE_NAME)
    }

    /// The bound resource source.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }
}

impl fmt::Debug for ServiceLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceLookup")
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}

impl StringLookup for ServiceLookup {
    fn lookup<'a>(&'a self, key: &str, locale: &str) -> Option<Cow<'a, str>> {
        self.service
            .localize(&self.resource, key, locale)
            .map(Cow::Owned)
    }
}

/// A lookup that never translates anything.
///
/// Every label falls back to its key.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTranslations;

impl StringLookup for NoTranslations {
    fn lookup<'a>(&'a self, _key: &str, _locale: &str) -> Option<Cow<'a, str>> {
        None
    }
}
