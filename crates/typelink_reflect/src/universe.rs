//! In-memory type system.
//!
//! A `TypeUniverse` holds modules and the types they expose as plain data.
//! Handles are 32-bit indices into the universe, so handle equality is type
//! identity.
//!
//! # Design
//!
//! - Modules and declared types are registered up front through `&mut self`
//! - Closed generics are interned on demand through `&self`: constructing the
//!   same `(definition, arguments)` twice yields the same `TypeRef`
//! - Interning uses read-then-write double checking under one `RwLock`
//! - Module loads are memoized in one `ModuleRegistry` owned by the universe
//!
//! # Foreign handles
//!
//! Handles are only meaningful in the universe that issued them. Lookups
//! taking a foreign `ModuleRef` find nothing; methods taking a foreign
//! `TypeRef` panic.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{ConstructError, ModuleLoadError, ModuleRegistry, TypeShape, TypeSystem};

/// Handle of a type registered in a `TypeUniverse`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TypeRef(u32);

impl TypeRef {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Handle of a module registered in a `TypeUniverse`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ModuleRef(u32);

impl ModuleRef {
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Debug)]
enum EntryKind {
    Simple,
    Definition {
        arity: usize,
    },
    Instantiation {
        definition: TypeRef,
        arguments: Vec<TypeRef>,
    },
}

#[derive(Clone, Debug)]
struct TypeEntry {
    module: ModuleRef,
    name: String,
    kind: EntryKind,
}

#[derive(Debug)]
struct ModuleEntry {
    name: String,
    /// First registration wins the name.
    types_by_name: FxHashMap<String, TypeRef>,
    /// Open generic definitions in registration order.
    definitions: Vec<TypeRef>,
}

#[derive(Debug, Default)]
struct UniverseData {
    modules: Vec<ModuleEntry>,
    modules_by_name: FxHashMap<String, ModuleRef>,
    types: Vec<TypeEntry>,
    instantiations: FxHashMap<(TypeRef, Vec<TypeRef>), TypeRef>,
}

impl UniverseData {
    fn push_type(&mut self, entry: TypeEntry) -> TypeRef {
        let idx = u32::try_from(self.types.len())
            .unwrap_or_else(|_| panic!("type universe exceeded u32::MAX types"));
        self.types.push(entry);
        TypeRef(idx)
    }
}

/// In-memory, thread-safe `TypeSystem`.
#[derive(Debug, Default)]
pub struct TypeUniverse {
    data: RwLock<UniverseData>,
    modules: ModuleRegistry<ModuleRef>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module, or return the existing one with this name.
    pub fn add_module(&mut self, name: impl Into<String>) -> ModuleRef {
        let name = name.into();
        let data = self.data.get_mut();
        if let Some(&existing) = data.modules_by_name.get(&name) {
            return existing;
        }

        let module = ModuleRef(
            u32::try_from(data.modules.len())
                .unwrap_or_else(|_| panic!("type universe exceeded u32::MAX modules")),
        );
        data.modules.push(ModuleEntry {
            name: name.clone(),
            types_by_name: FxHashMap::default(),
            definitions: Vec::new(),
        });
        data.modules_by_name.insert(name, module);
        module
    }

    /// Register a non-generic type.
    ///
    /// # Panics
    ///
    /// If `module` was not issued by this universe.
    pub fn add_type(&mut self, module: ModuleRef, qualified_name: impl Into<String>) -> TypeRef {
        self.declare(module, qualified_name.into(), EntryKind::Simple)
    }

    /// Register an open generic definition with `arity` type parameters.
    ///
    /// Several definitions may share a name; all of them take part in the
    /// generic definition scan, but only the first is found by name lookup.
    ///
    /// # Panics
    ///
    /// If `module` was not issued by this universe.
    pub fn add_generic_definition(
        &mut self,
        module: ModuleRef,
        qualified_name: impl Into<String>,
        arity: usize,
    ) -> TypeRef {
        let ty = self.declare(module, qualified_name.into(), EntryKind::Definition { arity });
        self.data.get_mut().modules[module.0 as usize]
            .definitions
            .push(ty);
        ty
    }

    fn declare(&mut self, module: ModuleRef, name: String, kind: EntryKind) -> TypeRef {
        let data = self.data.get_mut();
        let ty = data.push_type(TypeEntry {
            module,
            name: name.clone(),
            kind,
        });
        data.modules[module.0 as usize]
            .types_by_name
            .entry(name)
            .or_insert(ty);
        ty
    }

    /// Find a registered module without going through `load_module`.
    pub fn module(&self, name: &str) -> Option<ModuleRef> {
        self.data.read().modules_by_name.get(name).copied()
    }

    /// Number of types, including interned closed generics.
    pub fn type_count(&self) -> usize {
        self.data.read().types.len()
    }

    fn entry(&self, ty: TypeRef) -> TypeEntry {
        self.data.read().types[ty.0 as usize].clone()
    }
}

impl TypeSystem for TypeUniverse {
    type Type = TypeRef;
    type Module = ModuleRef;

    fn load_module(&self, name: &str) -> Result<ModuleRef, ModuleLoadError> {
        self.module(name)
            .ok_or_else(|| ModuleLoadError::new(name, "no module with this name is registered"))
    }

    fn modules(&self) -> &ModuleRegistry<ModuleRef> {
        &self.modules
    }

    fn module_name(&self, ty: &TypeRef) -> String {
        let data = self.data.read();
        let module = data.types[ty.0 as usize].module;
        data.modules[module.0 as usize].name.clone()
    }

    fn qualified_name(&self, ty: &TypeRef) -> String {
        self.data.read().types[ty.0 as usize].name.clone()
    }

    fn shape(&self, ty: &TypeRef) -> TypeShape<TypeRef> {
        match self.entry(*ty).kind {
            EntryKind::Simple => TypeShape::Simple,
            EntryKind::Definition { arity } => TypeShape::GenericDefinition { arity },
            EntryKind::Instantiation {
                definition,
                arguments,
            } => TypeShape::GenericInstantiation {
                definition,
                arguments,
            },
        }
    }

    fn lookup_type(&self, module: &ModuleRef, qualified_name: &str) -> Option<TypeRef> {
        self.data
            .read()
            .modules
            .get(module.0 as usize)?
            .types_by_name
            .get(qualified_name)
            .copied()
    }

    fn generic_definitions(&self, module: &ModuleRef) -> Vec<TypeRef> {
        self.data
            .read()
            .modules
            .get(module.0 as usize)
            .map(|entry| entry.definitions.clone())
            .unwrap_or_default()
    }

    fn construct_generic(
        &self,
        definition: &TypeRef,
        arguments: &[TypeRef],
    ) -> Result<TypeRef, ConstructError> {
        let key = (*definition, arguments.to_vec());

        // Validate and look up under the read lock
        let template = {
            let data = self.data.read();
            let def = &data.types[definition.0 as usize];
            let EntryKind::Definition { arity } = def.kind else {
                return Err(ConstructError::NotGenericDefinition {
                    name: def.name.clone(),
                });
            };
            if arity != arguments.len() {
                return Err(ConstructError::ArityMismatch {
                    expected: arity,
                    found: arguments.len(),
                });
            }
            for (index, arg) in arguments.iter().enumerate() {
                let arg = &data.types[arg.0 as usize];
                if matches!(arg.kind, EntryKind::Definition { .. }) {
                    return Err(ConstructError::OpenArgument {
                        index,
                        name: arg.name.clone(),
                    });
                }
            }
            if let Some(&existing) = data.instantiations.get(&key) {
                return Ok(existing);
            }
            (def.module, def.name.clone())
        };

        let mut data = self.data.write();

        // Double-check after acquiring write lock
        if let Some(&existing) = data.instantiations.get(&key) {
            return Ok(existing);
        }

        let (module, name) = template;
        let ty = data.push_type(TypeEntry {
            module,
            name,
            kind: EntryKind::Instantiation {
                definition: *definition,
                arguments: arguments.to_vec(),
            },
        });
        data.instantiations.insert(key, ty);
        tracing::trace!(closed = ty.raw(), "interned generic instantiation");
        Ok(ty)
    }
}
