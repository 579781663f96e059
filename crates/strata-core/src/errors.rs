//! Error types shared across the Strata workspace.

use thiserror::Error;

/// Failures reported by a content repository session or node.
///
/// The security subscriber never handles these locally; they bubble up to
/// the persistence pipeline unchanged.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("node not found at path {0}")]
    NodeNotFound(String),

    #[error("property {name} not found on node {path}")]
    PropertyNotFound { path: String, name: String },

    #[error("invalid node path: {0}")]
    InvalidPath(String),

    #[error("invalid property name pattern {pattern}: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl RepositoryError {
    pub fn property_not_found(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self::PropertyNotFound {
            path: path.into(),
            name: name.into(),
        }
    }

    pub fn invalid_pattern(pattern: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.to_string(),
        }
    }

    pub fn backend<E>(err: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        Self::Backend(err.into())
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Reasons a permission schema is rejected at construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("permission schema must contain at least one permission")]
    Empty,

    #[error("permission name must not be empty")]
    EmptyName,

    #[error("duplicate permission name: {0}")]
    DuplicateName(String),

    #[error("permission {name} has bit {bit}, which is not a power of two")]
    NotPowerOfTwo { name: String, bit: u64 },

    #[error("permissions {first} and {second} share bit {bit}")]
    DuplicateBit {
        first: String,
        second: String,
        bit: u64,
    },
}
