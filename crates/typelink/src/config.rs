//! Converter configuration.

use typelink_reflect::AmbiguityPolicy;

/// Tunables of a `TypeConverter`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Capacity reserved for the identity cache up front.
    pub initial_cache_capacity: usize,

    /// Resolution of duplicate `(name, arity)` generic definitions.
    pub ambiguity: AmbiguityPolicy,
}

impl ConverterConfig {
    pub const DEFAULT_CACHE_CAPACITY: usize = 8;

    pub const fn new() -> Self {
        Self {
            initial_cache_capacity: Self::DEFAULT_CACHE_CAPACITY,
            ambiguity: AmbiguityPolicy::Reject,
        }
    }

    #[must_use]
    pub const fn with_initial_cache_capacity(mut self, capacity: usize) -> Self {
        self.initial_cache_capacity = capacity;
        self
    }

    #[must_use]
    pub const fn with_ambiguity(mut self, ambiguity: AmbiguityPolicy) -> Self {
        self.ambiguity = ambiguity;
        self
    }
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self::new()
    }
}
