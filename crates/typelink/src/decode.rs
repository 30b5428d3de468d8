//! Descriptor → type handle.

use typelink_ir::{MalformedDocument, TypeDescriptor};
use typelink_reflect::{AmbiguityPolicy, ConstructError, TypeResolver, TypeSystem};

use crate::{DecodeError, IdentityCache};

/// Resolves descriptor trees back into type handles.
///
/// A hashed node must carry the canonical hash of its own fields, or it is
/// rejected as malformed before the cache is consulted. A node whose hash is
/// already cached returns the cached handle without any resolution or
/// recursion. Otherwise the node is resolved through the type
/// system and, when hashed, cached before returning. Failures leave the
/// failing hash uncached; entries written for earlier siblings are kept.
pub struct Decoder<'a, S: TypeSystem + ?Sized> {
    system: &'a S,
    resolver: TypeResolver<'a, S>,
    cache: &'a mut IdentityCache<S::Type>,
}

impl<'a, S: TypeSystem + ?Sized> Decoder<'a, S> {
    pub fn new(
        system: &'a S,
        cache: &'a mut IdentityCache<S::Type>,
        ambiguity: AmbiguityPolicy,
    ) -> Self {
        Self {
            system,
            resolver: TypeResolver::new(system, ambiguity),
            cache,
        }
    }

    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(kind = node.kind().tag(), name = node.qualified_name())
    )]
    pub fn decode(&mut self, node: &TypeDescriptor) -> Result<S::Type, DecodeError> {
        if !node.has_canonical_hash() {
            return Err(MalformedDocument::new(format!(
                "hash of `{}` does not match its own fields",
                node.qualified_name()
            ))
            .into());
        }

        if let Some(ty) = node.hash().and_then(|hash| self.cache.get(hash.as_str())) {
            tracing::trace!("identity cache hit");
            return Ok(ty.clone());
        }

        let resolved = match node {
            TypeDescriptor::Simple {
                module_name,
                qualified_name,
                ..
            } => {
                let module = self.resolver.resolve_module(module_name)?;
                self.resolver.resolve_simple_type(&module, qualified_name)?
            }
            TypeDescriptor::GenericInstantiation {
                qualified_name,
                definition,
                arguments,
                ..
            } => {
                let definition = self.decode(definition)?;
                let arguments = arguments
                    .iter()
                    .map(|arg| self.decode(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                self.construct(qualified_name, &definition, &arguments)?
            }
            TypeDescriptor::GenericDefinition {
                module_name,
                qualified_name,
                arity,
                ..
            } => {
                let module = self.resolver.resolve_module(module_name)?;
                self.resolver
                    .resolve_generic_definition(&module, qualified_name, *arity)?
            }
        };

        if let Some(hash) = node.hash() {
            tracing::debug!(%hash, "resolved and cached type identity");
            self.cache.insert(hash.clone(), resolved.clone());
        }
        Ok(resolved)
    }

    /// Close `definition` over `arguments`, checking the declared arity first.
    fn construct(
        &self,
        name: &str,
        definition: &S::Type,
        arguments: &[S::Type],
    ) -> Result<S::Type, DecodeError> {
        let rejected = |source| DecodeError::GenericConstruction {
            name: name.to_owned(),
            source,
        };

        match self.system.declared_arity(definition) {
            Some(expected) if expected != arguments.len() => {
                return Err(rejected(ConstructError::ArityMismatch {
                    expected,
                    found: arguments.len(),
                }));
            }
            Some(_) => {}
            None => {
                return Err(rejected(ConstructError::NotGenericDefinition {
                    name: self.system.qualified_name(definition),
                }));
            }
        }

        self.system
            .construct_generic(definition, arguments)
            .map_err(rejected)
    }
}
