//! Entity contract and domain errors
//!
//! Items are identified by string UUIDs, so ids are borrowed rather than
//! copied out of the entity.

use serde::{Deserialize, Serialize};

/// Anything stored by id in a [`Repository`](crate::repository::Repository)
pub trait Entity: Sized + Send + Sync + Clone {
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    fn id(&self) -> &Self::Id;
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure categories shared by the repositories and the commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DomainError {
    /// No entity or vocabulary name with the given key
    NotFound(String),
    /// Form validation failed
    InvalidInput(String),
    /// Duplicate id, duplicate name or a name still in use
    Conflict(String),
    /// Storage or serialization failure
    Internal(String),
}

impl DomainError {
    /// Wrap a storage or serialization error
    pub fn internal(err: impl std::fmt::Display) -> Self {
        DomainError::Internal(err.to_string())
    }

    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Conflict(msg)
            | DomainError::Internal(msg) => msg,
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DomainError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}
