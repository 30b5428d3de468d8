//! Canonical identity hashes.
//!
//! A hash is a discriminant-prefixed, `:`-joined string of a descriptor's
//! identity fields:
//!
//! ```text
//! Simple:            1:<module>:<qualified name>
//! GenericDefinition: 3:<module>:<qualified name>:<arity>
//! ```
//!
//! Generic instantiations have no hash; their identity is the structure of
//! their definition and arguments.
//!
//! The delimiter is not escaped. Names containing `:` can collide with a
//! differently split name; see [`has_ambiguous_delimiter`].

use std::borrow::Borrow;
use std::fmt;

use crate::DescriptorKind;

/// Deterministic identity key of a Simple or GenericDefinition descriptor.
///
/// Constructed only through [`CanonicalHash::simple`] and
/// [`CanonicalHash::generic_definition`], so the prefix always names a
/// hashable discriminant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalHash(String);

impl CanonicalHash {
    /// Separator between identity fields.
    pub const DELIMITER: char = ':';

    /// Hash of a plain, non-generic type.
    pub fn simple(module_name: &str, qualified_name: &str) -> Self {
        Self(format!(
            "{}:{module_name}:{qualified_name}",
            DescriptorKind::Simple.tag()
        ))
    }

    /// Hash of an open generic definition with `arity` type parameters.
    pub fn generic_definition(module_name: &str, qualified_name: &str, arity: usize) -> Self {
        Self(format!(
            "{}:{module_name}:{qualified_name}:{arity}",
            DescriptorKind::GenericDefinition.tag()
        ))
    }

    /// The discriminant encoded in the prefix.
    pub fn kind(&self) -> DescriptorKind {
        if self.0.starts_with('1') {
            DescriptorKind::Simple
        } else {
            DescriptorKind::GenericDefinition
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for CanonicalHash {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for CanonicalHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Whether hashing these names could collide with a different split.
pub fn has_ambiguous_delimiter(module_name: &str, qualified_name: &str) -> bool {
    module_name.contains(CanonicalHash::DELIMITER)
        || qualified_name.contains(CanonicalHash::DELIMITER)
}
