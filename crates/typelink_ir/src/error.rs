//! Errors raised while reading a descriptor document.

/// A wire node that cannot be turned into a `TypeDescriptor`.
///
/// Raised for unrecognized discriminants, fields missing for the node's
/// discriminant, and hashes that disagree with the node carrying them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed type document: {reason}")]
pub struct MalformedDocument {
    reason: String,
}

impl MalformedDocument {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    /// Human-readable description of what was wrong with the node.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl From<serde_json::Error> for MalformedDocument {
    fn from(err: serde_json::Error) -> Self {
        Self::new(err.to_string())
    }
}
