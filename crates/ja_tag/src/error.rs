use alloc::string::String;

use thiserror::Error;

use crate::Role;

// -----------------------------------------------------------------------------
// Error

/// A malformed field descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TagError {
    #[error("field descriptor is empty")]
    Empty,

    #[error("unknown field role `{0}`")]
    UnknownRole(String),

    #[error("`{role}` descriptor expects {expected} components, found {found}")]
    Arity {
        role: Role,
        expected: &'static str,
        found: usize,
    },

    #[error("`{0}` descriptor has an empty name")]
    EmptyName(Role),

    #[error("unknown field option, only `omitempty` is supported")]
    UnknownOption,

    #[error("`{spec}` descriptor cannot be applied to a {kind} value")]
    RoleMismatch { spec: Role, kind: &'static str },
}
