//! Per-locale reverse label maps.
//!
//! # Invariants
//!
//! 1. **Built at most once per key in the steady state**: after the first
//!    successful insert for `(scope, locale)`, readers only take the read lock.
//! 2. **Concurrent first use is safe**: racing builders each produce a full
//!    map outside the lock; the first insert wins and later ones are
//!    discarded, so no entry is ever lost or half-written.
//! 3. **Maps are never rebuilt implicitly**: only the `invalidate*` methods
//!    and [`CultureCache::clear`] remove them.
//! 4. **Scopes never share maps**: a map is keyed by [`CacheScope`], which is
//!    unique per localizer, so two localizers for the same type name with
//!    different lookups each get their own map even in one shared cache.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Duplicate label | Two members localize to one string | Later member wins |
//! | Poisoned lock | A builder panicked | Lock recovered, cache kept |

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[cfg(feature = "tracing")]
use tracing::{debug, warn};

use crate::catalog::Locale;

/// Mapping from localized label to member bits, for one type and locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelMap {
    labels: HashMap<String, u32>,
}

impl LabelMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a label. A label already present is silently remapped.
    pub fn insert(&mut self, label: impl Into<String>, bits: u32) {
        let label = label.into();
        #[cfg(feature = "tracing")]
        if let Some(previous) = self.labels.get(&label) {
            debug!(label = label.as_str(), previous, bits, "localized label collision");
        }
        self.labels.insert(label, bits);
    }

    /// Bits of the member with this exact label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<u32> {
        self.labels.get(label).copied()
    }

    /// Number of distinct labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the map has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate over `(label, bits)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels.iter().map(|(label, &bits)| (label.as_str(), bits))
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for LabelMap {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, bits) in iter {
            map.insert(label, bits);
        }
        map
    }
}

type LocaleMaps = HashMap<Locale, Arc<LabelMap>>;

static NEXT_SCOPE_ID: AtomicU64 = AtomicU64::new(0);

/// Cache partition owned by one localizer.
///
/// Each call to [`CacheScope::new`] yields a distinct scope, even for the
/// same type name. Clones compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheScope {
    type_name: String,
    id: u64,
}

impl CacheScope {
    /// Allocate a fresh scope for `type_name`.
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            id: NEXT_SCOPE_ID.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Type name the scope was created for.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }
}

/// Memoized label maps keyed by [`CacheScope`] and locale.
///
/// One cache may be shared between any number of localizers.
#[derive(Debug, Default)]
pub struct CultureCache {
    maps: RwLock<HashMap<CacheScope, LocaleMaps>>,
}

impl CultureCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached map for `(scope, locale)`, building it with
    /// `build` on first use.
    ///
    /// `build` runs without holding the lock, so it may be invoked more
    /// than once under a race; only one result is kept.
    pub fn get_or_build<F>(&self, scope: &CacheScope, locale: &str, build: F) -> Arc<LabelMap>
    where
        F: FnOnce() -> LabelMap,
    {
        if let Some(map) = self.get(scope, locale) {
            return map;
        }

        let built = Arc::new(build());

        let mut maps = self.write();
        let entry = maps
            .entry(scope.clone())
            .or_default()
            .entry(locale.to_string())
            .or_insert_with(|| {
                #[cfg(feature = "tracing")]
                debug!(
                    type_name = scope.type_name(),
                    scope = scope.id,
                    locale,
                    labels = built.len(),
                    "built localized label map"
                );
                Arc::clone(&built)
            });
        Arc::clone(entry)
    }

    /// The cached map for `(scope, locale)`, if built.
    #[must_use]
    pub fn get(&self, scope: &CacheScope, locale: &str) -> Option<Arc<LabelMap>> {
        self.read()
            .get(scope)
            .and_then(|by_locale| by_locale.get(locale))
            .cloned()
    }

    /// Drop the map for `(scope, locale)`. Returns whether one existed.
    pub fn invalidate(&self, scope: &CacheScope, locale: &str) -> bool {
        let mut maps = self.write();
        let Some(by_locale) = maps.get_mut(scope) else {
            return false;
        };
        let removed = by_locale.remove(locale).is_some();
        if by_locale.is_empty() {
            maps.remove(scope);
        }
        removed
    }

    /// Drop every map in `scope`.
    pub fn invalidate_scope(&self, scope: &CacheScope) {
        self.write().remove(scope);
    }

    /// Drop every map of every scope created for `type_name`.
    pub fn invalidate_type(&self, type_name: &str) {
        self.write().retain(|scope, _| scope.type_name != type_name);
    }

    /// Drop every cached map.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Number of cached `(scope, locale)` maps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.read().values().map(HashMap::len).sum()
    }

    /// Whether nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<CacheScope, LocaleMaps>> {
        self.maps.read().unwrap_or_else(|poisoned| {
            #[cfg(feature = "tracing")]
            warn!("culture cache lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CacheScope, LocaleMaps>> {
        self.maps.write().unwrap_or_else(|poisoned| {
            #[cfg(feature = "tracing")]
            warn!("culture cache lock poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }
}
