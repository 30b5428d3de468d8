//! Type handle → descriptor.

use typelink_ir::{has_ambiguous_delimiter, CanonicalHash, TypeDescriptor};
use typelink_reflect::{TypeShape, TypeSystem};

use crate::IdentityCache;

/// Walks a type handle and emits its descriptor tree.
///
/// Every Simple and GenericDefinition node emitted is upserted into the
/// cache under its hash. Encoding cannot fail: every handle has exactly one
/// shape.
pub struct Encoder<'a, S: TypeSystem + ?Sized> {
    system: &'a S,
    cache: &'a mut IdentityCache<S::Type>,
}

impl<'a, S: TypeSystem + ?Sized> Encoder<'a, S> {
    pub fn new(system: &'a S, cache: &'a mut IdentityCache<S::Type>) -> Self {
        Self { system, cache }
    }

    #[tracing::instrument(level = "trace", skip_all, fields(ty = ?ty))]
    pub fn encode(&mut self, ty: &S::Type) -> TypeDescriptor {
        let module_name = self.system.module_name(ty);
        let qualified_name = self.system.qualified_name(ty);

        match self.system.shape(ty) {
            TypeShape::GenericDefinition { arity } => {
                let hash = CanonicalHash::generic_definition(&module_name, &qualified_name, arity);
                self.remember(&hash, ty, &module_name, &qualified_name);
                TypeDescriptor::GenericDefinition {
                    module_name,
                    qualified_name,
                    arity,
                    hash,
                }
            }
            TypeShape::GenericInstantiation {
                definition,
                arguments,
            } => {
                let definition = Box::new(self.encode(&definition));
                let arguments = arguments.iter().map(|arg| self.encode(arg)).collect();
                TypeDescriptor::GenericInstantiation {
                    module_name,
                    qualified_name,
                    definition,
                    arguments,
                }
            }
            TypeShape::Simple => {
                let hash = CanonicalHash::simple(&module_name, &qualified_name);
                self.remember(&hash, ty, &module_name, &qualified_name);
                TypeDescriptor::Simple {
                    module_name,
                    qualified_name,
                    hash,
                }
            }
        }
    }

    fn remember(&mut self, hash: &CanonicalHash, ty: &S::Type, module_name: &str, name: &str) {
        let first_seen = self.cache.insert(hash.clone(), ty.clone()).is_none();
        if first_seen && has_ambiguous_delimiter(module_name, name) {
            tracing::warn!(
                %hash,
                "type identity contains the hash delimiter; its hash may collide with another type"
            );
        }
    }
}
