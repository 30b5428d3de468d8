//! The `TypeSystem` capability trait.

use std::fmt;
use std::sync::Arc;

use crate::{ConstructError, ModuleLoadError, ModuleRegistry};

/// Classification of a type handle.
///
/// Exactly one shape applies to every handle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeShape<T> {
    /// Declares `arity` type parameters and is not closed over arguments.
    GenericDefinition { arity: usize },

    /// A generic definition closed over concrete or further-generic arguments.
    GenericInstantiation { definition: T, arguments: Vec<T> },

    /// Anything else.
    Simple,
}

/// Host type/reflection system consumed by the encoder and decoder.
///
/// Implementations decide what a module and a type handle are. Handle
/// equality is type identity: resolving the same descriptor twice must yield
/// equal handles.
pub trait TypeSystem {
    type Type: Clone + Eq + fmt::Debug;
    type Module: Clone + fmt::Debug;

    /// Load a module by name. Not memoized here; see `ModuleRegistry`.
    fn load_module(&self, name: &str) -> Result<Self::Module, ModuleLoadError>;

    /// Memoized module loads, shared by every converter over this system.
    fn modules(&self) -> &ModuleRegistry<Self::Module>;

    /// Name of the module exposing `ty`.
    fn module_name(&self, ty: &Self::Type) -> String;

    /// Fully qualified name of `ty` within its module.
    fn qualified_name(&self, ty: &Self::Type) -> String;

    fn shape(&self, ty: &Self::Type) -> TypeShape<Self::Type>;

    /// Direct lookup of a type by qualified name.
    fn lookup_type(&self, module: &Self::Module, qualified_name: &str) -> Option<Self::Type>;

    /// Every open generic definition exposed by `module`, in declaration order.
    fn generic_definitions(&self, module: &Self::Module) -> Vec<Self::Type>;

    /// Close `definition` over `arguments`.
    fn construct_generic(
        &self,
        definition: &Self::Type,
        arguments: &[Self::Type],
    ) -> Result<Self::Type, ConstructError>;

    fn is_generic_definition(&self, ty: &Self::Type) -> bool {
        matches!(self.shape(ty), TypeShape::GenericDefinition { .. })
    }

    fn is_generic_instantiation(&self, ty: &Self::Type) -> bool {
        matches!(self.shape(ty), TypeShape::GenericInstantiation { .. })
    }

    /// Arguments of a closed generic, empty for any other shape.
    fn generic_arguments(&self, ty: &Self::Type) -> Vec<Self::Type> {
        match self.shape(ty) {
            TypeShape::GenericInstantiation { arguments, .. } => arguments,
            TypeShape::GenericDefinition { .. } | TypeShape::Simple => Vec::new(),
        }
    }

    /// Type parameter count of an open generic definition.
    fn declared_arity(&self, ty: &Self::Type) -> Option<usize> {
        match self.shape(ty) {
            TypeShape::GenericDefinition { arity } => Some(arity),
            TypeShape::GenericInstantiation { .. } | TypeShape::Simple => None,
        }
    }
}

macro_rules! forward_type_system {
    ($($ptr:ty),*) => {$(
        impl<S: TypeSystem + ?Sized> TypeSystem for $ptr {
            type Type = S::Type;
            type Module = S::Module;

            fn load_module(&self, name: &str) -> Result<Self::Module, ModuleLoadError> {
                (**self).load_module(name)
            }

            fn modules(&self) -> &ModuleRegistry<Self::Module> {
                (**self).modules()
            }

            fn module_name(&self, ty: &Self::Type) -> String {
                (**self).module_name(ty)
            }

            fn qualified_name(&self, ty: &Self::Type) -> String {
                (**self).qualified_name(ty)
            }

            fn shape(&self, ty: &Self::Type) -> TypeShape<Self::Type> {
                (**self).shape(ty)
            }

            fn lookup_type(&self, module: &Self::Module, qualified_name: &str) -> Option<Self::Type> {
                (**self).lookup_type(module, qualified_name)
            }

            fn generic_definitions(&self, module: &Self::Module) -> Vec<Self::Type> {
                (**self).generic_definitions(module)
            }

            fn construct_generic(
                &self,
                definition: &Self::Type,
                arguments: &[Self::Type],
            ) -> Result<Self::Type, ConstructError> {
                (**self).construct_generic(definition, arguments)
            }
        }
    )*};
}

forward_type_system!(&S, Arc<S>);
