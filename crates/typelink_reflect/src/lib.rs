//! Type system capability boundary for typelink.
//!
//! The encoder and decoder never touch a concrete reflection API. They talk
//! to a [`TypeSystem`]: something that can classify a type handle into one of
//! three shapes, name it, load modules, look types up, and close generic
//! definitions over arguments.
//!
//! # Architecture
//!
//! ```text
//! TypeSystem (host capability)
//!     └── ModuleRegistry (memoized module loads, shared)
//!         └── TypeResolver (simple lookup + generic definition scan)
//! ```
//!
//! [`TypeUniverse`] is an in-memory `TypeSystem` for hosts that describe
//! their types as data.

mod error;
mod registry;
mod resolver;
mod system;
mod universe;

pub use error::{ConstructError, ModuleLoadError, ResolveError};
pub use registry::ModuleRegistry;
pub use resolver::{AmbiguityPolicy, LoadedModule, TypeResolver};
pub use system::{TypeShape, TypeSystem};
pub use universe::{ModuleRef, TypeRef, TypeUniverse};
