//! The type descriptor tree.

use serde::{Deserialize, Serialize};

use crate::wire::RawNode;
use crate::{CanonicalHash, MalformedDocument};

/// Wire discriminant of a descriptor node (the `type` field).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DescriptorKind {
    /// A non-generic type.
    Simple = 1,
    /// A generic definition closed over concrete arguments.
    GenericInstantiation = 2,
    /// An open generic definition.
    GenericDefinition = 3,
}

impl DescriptorKind {
    /// The integer written to the `type` field.
    #[inline]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Self::Simple),
            2 => Some(Self::GenericInstantiation),
            3 => Some(Self::GenericDefinition),
            _ => None,
        }
    }

    /// Whether nodes of this kind carry a canonical hash.
    #[inline]
    pub const fn is_hashed(self) -> bool {
        !matches!(self, Self::GenericInstantiation)
    }
}

/// Portable identity of a type exposed by some module.
///
/// Hashed variants carry the hash they were built or read with. Nodes built
/// through [`TypeDescriptor::simple`] and [`TypeDescriptor::generic_definition`],
/// or read from JSON, always carry the canonical hash of their fields; a
/// variant built by hand may not, and the decoder rejects it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "RawNode", try_from = "RawNode")]
pub enum TypeDescriptor {
    Simple {
        module_name: String,
        qualified_name: String,
        hash: CanonicalHash,
    },

    /// Never hashed: its identity is its definition plus its arguments.
    GenericInstantiation {
        module_name: String,
        qualified_name: String,
        definition: Box<TypeDescriptor>,
        arguments: Vec<TypeDescriptor>,
    },

    GenericDefinition {
        module_name: String,
        qualified_name: String,
        arity: usize,
        hash: CanonicalHash,
    },
}

impl TypeDescriptor {
    /// Build a Simple node with its canonical hash.
    pub fn simple(module_name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        let module_name = module_name.into();
        let qualified_name = qualified_name.into();
        let hash = CanonicalHash::simple(&module_name, &qualified_name);
        Self::Simple {
            module_name,
            qualified_name,
            hash,
        }
    }

    /// Build a GenericDefinition node with its canonical hash.
    pub fn generic_definition(
        module_name: impl Into<String>,
        qualified_name: impl Into<String>,
        arity: usize,
    ) -> Self {
        let module_name = module_name.into();
        let qualified_name = qualified_name.into();
        let hash = CanonicalHash::generic_definition(&module_name, &qualified_name, arity);
        Self::GenericDefinition {
            module_name,
            qualified_name,
            arity,
            hash,
        }
    }

    /// Build a GenericInstantiation node.
    ///
    /// The argument count is not checked here; a mismatch with the
    /// definition's arity surfaces when the node is resolved.
    pub fn generic_instantiation(
        module_name: impl Into<String>,
        qualified_name: impl Into<String>,
        definition: TypeDescriptor,
        arguments: Vec<TypeDescriptor>,
    ) -> Self {
        Self::GenericInstantiation {
            module_name: module_name.into(),
            qualified_name: qualified_name.into(),
            definition: Box::new(definition),
            arguments,
        }
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Simple { .. } => DescriptorKind::Simple,
            Self::GenericInstantiation { .. } => DescriptorKind::GenericInstantiation,
            Self::GenericDefinition { .. } => DescriptorKind::GenericDefinition,
        }
    }

    /// The canonical hash, absent for generic instantiations.
    pub fn hash(&self) -> Option<&CanonicalHash> {
        match self {
            Self::Simple { hash, .. } | Self::GenericDefinition { hash, .. } => Some(hash),
            Self::GenericInstantiation { .. } => None,
        }
    }

    /// The hash this node's fields imply, absent for generic instantiations.
    pub fn canonical_hash(&self) -> Option<CanonicalHash> {
        match self {
            Self::Simple {
                module_name,
                qualified_name,
                ..
            } => Some(CanonicalHash::simple(module_name, qualified_name)),
            Self::GenericDefinition {
                module_name,
                qualified_name,
                arity,
                ..
            } => Some(CanonicalHash::generic_definition(
                module_name,
                qualified_name,
                *arity,
            )),
            Self::GenericInstantiation { .. } => None,
        }
    }

    /// Whether the carried hash is exactly the one the node's fields imply.
    ///
    /// Children of a generic instantiation are not inspected.
    pub fn has_canonical_hash(&self) -> bool {
        self.hash() == self.canonical_hash().as_ref()
    }

    pub fn module_name(&self) -> &str {
        match self {
            Self::Simple { module_name, .. }
            | Self::GenericInstantiation { module_name, .. }
            | Self::GenericDefinition { module_name, .. } => module_name,
        }
    }

    pub fn qualified_name(&self) -> &str {
        match self {
            Self::Simple { qualified_name, .. }
            | Self::GenericInstantiation { qualified_name, .. }
            | Self::GenericDefinition { qualified_name, .. } => qualified_name,
        }
    }

    /// Generic nesting depth: 0 for hashed nodes, 1 + deepest child otherwise.
    pub fn depth(&self) -> usize {
        match self {
            Self::GenericInstantiation {
                definition,
                arguments,
                ..
            } => {
                let deepest = arguments
                    .iter()
                    .map(TypeDescriptor::depth)
                    .fold(definition.depth(), usize::max);
                deepest + 1
            }
            Self::Simple { .. } | Self::GenericDefinition { .. } => 0,
        }
    }

    /// Render as a JSON tree in canonical field order.
    pub fn to_value(&self) -> serde_json::Value {
        crate::wire::to_value(self)
    }

    /// Read a JSON tree. Field order is not significant.
    pub fn from_value(value: &serde_json::Value) -> Result<Self, MalformedDocument> {
        let raw = RawNode::deserialize(value)?;
        Self::try_from(raw)
    }

    /// Render as compact JSON text in canonical field order.
    pub fn to_json_string(&self) -> String {
        self.to_value().to_string()
    }

    pub fn from_json_str(text: &str) -> Result<Self, MalformedDocument> {
        let raw: RawNode = serde_json::from_str(text)?;
        Self::try_from(raw)
    }
}
