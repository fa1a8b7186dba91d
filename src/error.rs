//! Errors reported by the relation registry and document resolution.
//!
//! All variants are fail-fast validation errors. None are retried; they signal
//! a misconfigured profile that the caller has to fix.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    /// A required argument addressed nothing (e.g. a root table handle that
    /// does not belong to the profile's catalog, or no root table at all).
    #[error("Missing required {what}")]
    NullInput { what: &'static str },

    #[error("Invalid reference: {message}")]
    InvalidReference { message: String },

    #[error("Relation {parent} -> {child} would create a cycle")]
    CycleDetected { parent: String, child: String },

    #[error("Join key ({parent}, {child}) is already registered on the relation")]
    DuplicateJoinKey { parent: String, child: String },
}

impl ProfileError {
    pub(crate) fn invalid_reference(message: impl Into<String>) -> Self {
        ProfileError::InvalidReference {
            message: message.into(),
        }
    }
}
