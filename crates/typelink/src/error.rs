//! Decode failures.

use typelink_ir::MalformedDocument;
use typelink_reflect::{ConstructError, ResolveError};

/// Why a descriptor could not be turned back into a type handle.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Module load or type lookup failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Closing a generic definition over its decoded arguments was rejected.
    #[error("cannot construct generic type `{name}`: {source}")]
    GenericConstruction {
        name: String,
        #[source]
        source: ConstructError,
    },

    #[error(transparent)]
    Malformed(#[from] MalformedDocument),
}

impl DecodeError {
    pub fn is_type_not_found(&self) -> bool {
        matches!(self, Self::Resolve(err) if err.is_type_not_found())
    }

    pub fn is_module_load(&self) -> bool {
        matches!(self, Self::Resolve(ResolveError::ModuleLoad(_)))
    }

    pub fn is_generic_construction(&self) -> bool {
        matches!(self, Self::GenericConstruction { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}
