//! Errors at the type system boundary.

/// A module name that could not be turned into a loaded module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot load module `{module}`: {reason}")]
pub struct ModuleLoadError {
    module: String,
    reason: String,
}

impl ModuleLoadError {
    pub fn new(module: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            reason: reason.into(),
        }
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Rejection when closing a generic definition over arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConstructError {
    /// The target is not an open generic definition.
    #[error("`{name}` is not a generic definition")]
    NotGenericDefinition { name: String },

    /// Argument count differs from the declared type parameter count.
    #[error("expected {expected} type arguments, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    /// An argument is itself an open generic definition.
    #[error("type argument {index} (`{name}`) is an open generic definition")]
    OpenArgument { index: usize, name: String },
}

/// Failure to resolve a named type through a module.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    ModuleLoad(#[from] ModuleLoadError),

    #[error("type `{name}` not found in module `{module}`")]
    TypeNotFound { module: String, name: String },

    #[error("generic definition `{name}` with {arity} type parameters not found in module `{module}`")]
    GenericDefinitionNotFound {
        module: String,
        name: String,
        arity: usize,
    },

    /// More than one definition matched and ambiguity is rejected.
    #[error(
        "{count} generic definitions named `{name}` with {arity} type parameters in module `{module}`"
    )]
    AmbiguousGenericDefinition {
        module: String,
        name: String,
        arity: usize,
        count: usize,
    },
}

impl ResolveError {
    /// Whether the module loaded but the named type was absent.
    pub fn is_type_not_found(&self) -> bool {
        matches!(
            self,
            Self::TypeNotFound { .. } | Self::GenericDefinitionNotFound { .. }
        )
    }
}
