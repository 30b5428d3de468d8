//! Canonical hash → type handle cache.
//!
//! The cache only grows: there is no removal, eviction, or expiry. An entry
//! is pure by construction (a hash always names the same type within one
//! type system), so entries stay valid even when a later decode fails.

use rustc_hash::FxHashMap;

use typelink_ir::CanonicalHash;

/// Identity cache shared by the encoder and decoder of one converter.
#[derive(Clone, Debug)]
pub struct IdentityCache<T> {
    entries: FxHashMap<CanonicalHash, T>,
}

impl<T> IdentityCache<T> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    #[inline]
    pub fn get(&self, hash: &str) -> Option<&T> {
        self.entries.get(hash)
    }

    #[inline]
    pub fn contains(&self, hash: &str) -> bool {
        self.entries.contains_key(hash)
    }

    /// Upsert an entry, returning the handle previously stored under `hash`.
    pub fn insert(&mut self, hash: CanonicalHash, ty: T) -> Option<T> {
        self.entries.insert(hash, ty)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalHash, &T)> {
        self.entries.iter()
    }

    pub fn hashes(&self) -> impl Iterator<Item = &CanonicalHash> {
        self.entries.keys()
    }
}

impl<T> Default for IdentityCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(CanonicalHash, T)> for IdentityCache<T> {
    fn from_iter<I: IntoIterator<Item = (CanonicalHash, T)>>(iter: I) -> Self {
        let mut cache = Self::new();
        cache.extend(iter);
        cache
    }
}

impl<T> Extend<(CanonicalHash, T)> for IdentityCache<T> {
    fn extend<I: IntoIterator<Item = (CanonicalHash, T)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}
