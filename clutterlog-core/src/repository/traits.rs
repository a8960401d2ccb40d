//! Repository Layer - Core Traits
//!
//! Item storage is a generic CRUD repository; categories and locations share
//! one name-list interface.

use async_trait::async_trait;
use crate::domain::{Entity, DomainResult, VocabularyKind};

/// CRUD over entities keyed by id
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert at the end of the collection; an existing id is a conflict
    async fn create(&self, entity: &T) -> DomainResult<T>;

    async fn find_by_id(&self, id: &T::Id) -> DomainResult<Option<T>>;

    /// All entities in insertion order
    async fn list(&self) -> DomainResult<Vec<T>>;

    /// Update an existing entity (unknown IDs are left alone)
    async fn update(&self, entity: &T) -> DomainResult<T>;

    /// Unknown IDs are a no-op
    async fn delete(&self, id: &T::Id) -> DomainResult<()>;
}

/// Ordered set of names that items refer to by value
#[async_trait]
pub trait VocabularyOperations: Send + Sync {
    fn kind(&self) -> VocabularyKind;

    /// Names in insertion order
    async fn list(&self) -> DomainResult<Vec<String>>;

    async fn contains(&self, name: &str) -> DomainResult<bool>;

    /// Add a name; returns false when it was already present
    async fn add(&self, name: &str) -> DomainResult<bool>;

    /// Rename in place and rewrite every item using the old name.
    /// Returns the number of items rewritten.
    async fn rename(&self, old_name: &str, new_name: &str) -> DomainResult<usize>;

    /// Remove a name. Items still referring to it are not touched.
    async fn delete(&self, name: &str) -> DomainResult<()>;
}
