//! Shared fixtures for conversion tests.

use std::cell::Cell;

use typelink::{
    ConstructError, ModuleLoadError, ModuleRef, ModuleRegistry, TypeRef, TypeShape, TypeSystem,
    TypeUniverse,
};

/// Two modules:
/// - `M`: `String`, `Int32`, `List`1`, `Map`2`
/// - `Lib`: `String`, `Result`2`
pub struct Universe {
    pub types: TypeUniverse,
    pub string: TypeRef,
    pub int32: TypeRef,
    pub list: TypeRef,
    pub map: TypeRef,
    pub lib_string: TypeRef,
    pub result: TypeRef,
}

impl Universe {
    pub fn new() -> Self {
        typelink::init_tracing();

        let mut types = TypeUniverse::new();
        let m = types.add_module("M");
        let string = types.add_type(m, "String");
        let int32 = types.add_type(m, "Int32");
        let list = types.add_generic_definition(m, "List`1", 1);
        let map = types.add_generic_definition(m, "Map`2", 2);

        let lib = types.add_module("Lib");
        let lib_string = types.add_type(lib, "String");
        let result = types.add_generic_definition(lib, "Result`2", 2);

        Self {
            types,
            string,
            int32,
            list,
            map,
            lib_string,
            result,
        }
    }

    pub fn close(&self, definition: TypeRef, arguments: &[TypeRef]) -> TypeRef {
        self.types
            .construct_generic(&definition, arguments)
            .expect("fixture instantiation should be valid")
    }
}

/// Delegates to a `TypeUniverse`, counting every resolution call.
pub struct Counting<'a> {
    inner: &'a TypeUniverse,
    resolutions: Cell<usize>,
}

impl<'a> Counting<'a> {
    pub fn new(inner: &'a TypeUniverse) -> Self {
        Self {
            inner,
            resolutions: Cell::new(0),
        }
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.get()
    }

    fn bump(&self) {
        self.resolutions.set(self.resolutions.get() + 1);
    }
}

impl TypeSystem for Counting<'_> {
    type Type = TypeRef;
    type Module = ModuleRef;

    fn load_module(&self, name: &str) -> Result<ModuleRef, ModuleLoadError> {
        self.bump();
        self.inner.load_module(name)
    }

    fn modules(&self) -> &ModuleRegistry<ModuleRef> {
        self.inner.modules()
    }

    fn module_name(&self, ty: &TypeRef) -> String {
        self.inner.module_name(ty)
    }

    fn qualified_name(&self, ty: &TypeRef) -> String {
        self.inner.qualified_name(ty)
    }

    fn shape(&self, ty: &TypeRef) -> TypeShape<TypeRef> {
        self.inner.shape(ty)
    }

    fn lookup_type(&self, module: &ModuleRef, qualified_name: &str) -> Option<TypeRef> {
        self.bump();
        self.inner.lookup_type(module, qualified_name)
    }

    fn generic_definitions(&self, module: &ModuleRef) -> Vec<TypeRef> {
        self.bump();
        self.inner.generic_definitions(module)
    }

    fn construct_generic(
        &self,
        definition: &TypeRef,
        arguments: &[TypeRef],
    ) -> Result<TypeRef, ConstructError> {
        self.inner.construct_generic(definition, arguments)
    }
}
