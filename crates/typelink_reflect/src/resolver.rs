//! Name resolution from descriptor fields to type handles.

use crate::{ResolveError, TypeSystem};

/// What to do when more than one generic definition matches a name and arity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AmbiguityPolicy {
    /// Fail with `ResolveError::AmbiguousGenericDefinition`.
    #[default]
    Reject,

    /// Take the first match in module declaration order.
    FirstMatch,
}

/// A resolved module together with the name it was resolved by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedModule<M> {
    name: String,
    handle: M,
}

/// Resolves modules and types through a `TypeSystem`.
///
/// Module loads go through the system's `ModuleRegistry`; type lookups are
/// not cached here.
pub struct TypeResolver<'a, S: TypeSystem + ?Sized> {
    system: &'a S,
    ambiguity: AmbiguityPolicy,
}

impl<'a, S: TypeSystem + ?Sized> TypeResolver<'a, S> {
    pub fn new(system: &'a S, ambiguity: AmbiguityPolicy) -> Self {
        Self { system, ambiguity }
    }

    pub fn resolve_module(&self, name: &str) -> Result<LoadedModule<S::Module>, ResolveError> {
        let handle = self.system.modules().resolve(self.system, name)?;
        Ok(LoadedModule {
            name: name.to_owned(),
            handle,
        })
    }

    /// Direct lookup of a type by qualified name.
    pub fn resolve_simple_type(
        &self,
        module: &LoadedModule<S::Module>,
        qualified_name: &str,
    ) -> Result<S::Type, ResolveError> {
        self.system
            .lookup_type(&module.handle, qualified_name)
            .ok_or_else(|| ResolveError::TypeNotFound {
                module: module.name.clone(),
                name: qualified_name.to_owned(),
            })
    }

    /// Linear scan of the module's generic definitions for `(qualified_name, arity)`.
    pub fn resolve_generic_definition(
        &self,
        module: &LoadedModule<S::Module>,
        qualified_name: &str,
        arity: usize,
    ) -> Result<S::Type, ResolveError> {
        let mut matches = self
            .system
            .generic_definitions(&module.handle)
            .into_iter()
            .filter(|def| {
                self.system.declared_arity(def) == Some(arity)
                    && self.system.qualified_name(def) == qualified_name
            });

        let Some(first) = matches.next() else {
            return Err(ResolveError::GenericDefinitionNotFound {
                module: module.name.clone(),
                name: qualified_name.to_owned(),
                arity,
            });
        };

        if self.ambiguity == AmbiguityPolicy::Reject {
            let extra = matches.count();
            if extra > 0 {
                return Err(ResolveError::AmbiguousGenericDefinition {
                    module: module.name.clone(),
                    name: qualified_name.to_owned(),
                    arity,
                    count: extra + 1,
                });
            }
        }

        Ok(first)
    }
}

impl<S: TypeSystem + ?Sized> Clone for TypeResolver<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: TypeSystem + ?Sized> Copy for TypeResolver<'_, S> {}
