//! Memoized module loading.
//!
//! A `ModuleRegistry` maps module names to loaded module handles. Entries
//! are created on first reference and never removed. Clones share the same
//! storage, so one registry can back many converters across threads.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{ModuleLoadError, TypeSystem};

/// Shared, lazily populated module name → module handle map.
pub struct ModuleRegistry<M> {
    modules: Arc<RwLock<FxHashMap<String, M>>>,
}

impl<M: Clone> ModuleRegistry<M> {
    pub fn new() -> Self {
        Self {
            modules: Arc::new(RwLock::new(FxHashMap::default())),
        }
    }

    /// Return the memoized module for `name`, loading it on first reference.
    ///
    /// The loader runs outside the lock. If two threads race on the same
    /// name, the first inserted handle wins and both callers receive it.
    pub fn get_or_load<F>(&self, name: &str, load: F) -> Result<M, ModuleLoadError>
    where
        F: FnOnce(&str) -> Result<M, ModuleLoadError>,
    {
        // Fast path: already loaded
        if let Some(module) = self.modules.read().get(name) {
            return Ok(module.clone());
        }

        let loaded = load(name)?;
        tracing::debug!(module = name, "loaded module");

        let mut guard = self.modules.write();
        Ok(guard.entry(name.to_owned()).or_insert(loaded).clone())
    }

    /// Resolve `name` through `system`, memoized.
    pub fn resolve<S>(&self, system: &S, name: &str) -> Result<M, ModuleLoadError>
    where
        S: TypeSystem<Module = M> + ?Sized,
    {
        self.get_or_load(name, |name| system.load_module(name))
    }

    pub fn get(&self, name: &str) -> Option<M> {
        self.modules.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.read().is_empty()
    }
}

impl<M: Clone> Default for ModuleRegistry<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> Clone for ModuleRegistry<M> {
    fn clone(&self) -> Self {
        Self {
            modules: Arc::clone(&self.modules),
        }
    }
}

impl<M> std::fmt::Debug for ModuleRegistry<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleRegistry")
            .field("modules", &self.modules.read().len())
            .finish()
    }
}
