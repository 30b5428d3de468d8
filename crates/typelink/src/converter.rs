//! The converter: one identity cache, one type system, both directions.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;

use typelink_ir::{CanonicalHash, TypeDescriptor};
use typelink_reflect::{ModuleRegistry, TypeSystem};

use crate::{ConverterConfig, DecodeError, Decoder, Encoder, IdentityCache};

/// Encodes and decodes type identities against one `TypeSystem`.
///
/// The converter owns its identity cache; encode and decode both need
/// `&mut self`, so the cache's check-then-insert is never raced. Use
/// [`SharedTypeConverter`] to share one cache across threads.
///
/// Module loads are memoized by the type system's [`ModuleRegistry`], so
/// every converter over the same system loads each module once.
pub struct TypeConverter<S: TypeSystem> {
    system: S,
    cache: IdentityCache<S::Type>,
    config: ConverterConfig,
}

impl<S: TypeSystem> TypeConverter<S> {
    pub fn new(system: S) -> Self {
        Self::with_config(system, ConverterConfig::default())
    }

    pub fn with_config(system: S, config: ConverterConfig) -> Self {
        Self {
            system,
            cache: IdentityCache::with_capacity(config.initial_cache_capacity),
            config,
        }
    }

    /// Build a converter whose cache starts with `seed`.
    pub fn with_cache<I>(system: S, seed: I) -> Self
    where
        I: IntoIterator<Item = (CanonicalHash, S::Type)>,
    {
        let mut converter = Self::new(system);
        converter.cache.extend(seed);
        converter
    }

    pub fn system(&self) -> &S {
        &self.system
    }

    pub fn modules(&self) -> &ModuleRegistry<S::Module> {
        self.system.modules()
    }

    pub fn cache(&self) -> &IdentityCache<S::Type> {
        &self.cache
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    pub fn encode(&mut self, ty: &S::Type) -> TypeDescriptor {
        Encoder::new(&self.system, &mut self.cache).encode(ty)
    }

    pub fn decode(&mut self, node: &TypeDescriptor) -> Result<S::Type, DecodeError> {
        Decoder::new(&self.system, &mut self.cache, self.config.ambiguity).decode(node)
    }

    pub fn to_value(&mut self, ty: &S::Type) -> Value {
        self.encode(ty).to_value()
    }

    pub fn from_value(&mut self, value: &Value) -> Result<S::Type, DecodeError> {
        let node = TypeDescriptor::from_value(value)?;
        self.decode(&node)
    }

    pub fn to_json(&mut self, ty: &S::Type) -> String {
        self.encode(ty).to_json_string()
    }

    pub fn from_json(&mut self, text: &str) -> Result<S::Type, DecodeError> {
        let node = TypeDescriptor::from_json_str(text)?;
        self.decode(&node)
    }
}

impl<S: TypeSystem> std::fmt::Debug for TypeConverter<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeConverter")
            .field("modules", self.system.modules())
            .field("cached", &self.cache.len())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A `TypeConverter` behind a mutex, cheap to clone and share.
///
/// Each call holds the lock for the whole encode or decode, so
/// check-then-insert on the cache is atomic with respect to other threads.
pub struct SharedTypeConverter<S: TypeSystem> {
    inner: Arc<Mutex<TypeConverter<S>>>,
}

impl<S: TypeSystem> SharedTypeConverter<S> {
    pub fn new(converter: TypeConverter<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(converter)),
        }
    }

    pub fn encode(&self, ty: &S::Type) -> TypeDescriptor {
        self.inner.lock().encode(ty)
    }

    pub fn decode(&self, node: &TypeDescriptor) -> Result<S::Type, DecodeError> {
        self.inner.lock().decode(node)
    }

    pub fn to_value(&self, ty: &S::Type) -> Value {
        self.inner.lock().to_value(ty)
    }

    pub fn from_value(&self, value: &Value) -> Result<S::Type, DecodeError> {
        self.inner.lock().from_value(value)
    }

    pub fn to_json(&self, ty: &S::Type) -> String {
        self.inner.lock().to_json(ty)
    }

    pub fn from_json(&self, text: &str) -> Result<S::Type, DecodeError> {
        self.inner.lock().from_json(text)
    }

    /// Handle cached under `hash`, if any.
    pub fn cached(&self, hash: &str) -> Option<S::Type> {
        self.inner.lock().cache().get(hash).cloned()
    }

    pub fn cache_len(&self) -> usize {
        self.inner.lock().cache().len()
    }
}

impl<S: TypeSystem> Clone for SharedTypeConverter<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: TypeSystem> From<TypeConverter<S>> for SharedTypeConverter<S> {
    fn from(converter: TypeConverter<S>) -> Self {
        Self::new(converter)
    }
}
