//! Typelink IR - the portable shape of a type identity.
//!
//! This crate owns everything that crosses the serialization boundary:
//! - `TypeDescriptor`: the three-variant tree naming a type
//! - `DescriptorKind`: the small integer discriminant carried on the wire
//! - `CanonicalHash`: the deterministic identity key of hashable descriptors
//!
//! It knows nothing about live type handles. Resolution lives in
//! `typelink_reflect`, and the cache-aware encoder/decoder in `typelink`.
//!
//! # Wire Shape
//!
//! ```text
//! Simple:               { hash, type: 1, assemblyName, typeName }
//! GenericInstantiation: { hash: null, type: 2, assemblyName, typeName, genericDef, genericArgs }
//! GenericDefinition:    { hash, type: 3, assemblyName, typeName, genericArity }
//! ```

mod descriptor;
mod error;
mod hash;
mod wire;

pub use descriptor::{DescriptorKind, TypeDescriptor};
pub use error::MalformedDocument;
pub use hash::{has_ambiguous_delimiter, CanonicalHash};
