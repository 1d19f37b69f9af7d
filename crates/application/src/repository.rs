//! Persistence port consumed by request handlers.

use async_trait::async_trait;
use domain::Entity;

/// Identifier type of the entities stored by repository `R`.
pub type IdOf<R> = <<R as Repository>::Entity as Entity>::Id;

/// Abstract persistence for one entity type.
///
/// Implementations own transactions, batching, and retries; none of that is
/// part of this contract. All implementations must be thread-safe.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The entity type this repository stores.
    type Entity: Entity + Send + Sync;

    /// Implementation-specific failure, opaque to the kernel.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Finds an entity by its ID.
    async fn find_by_id(
        &self,
        id: &<Self::Entity as Entity>::Id,
    ) -> Result<Option<Self::Entity>, Self::Error>;

    /// Adds a new entity.
    async fn add(&self, entity: &Self::Entity) -> Result<(), Self::Error>;

    /// Persists changes to an existing entity.
    async fn update(&self, entity: &Self::Entity) -> Result<(), Self::Error>;

    /// Deletes an entity by its ID.
    async fn delete(&self, id: &<Self::Entity as Entity>::Id) -> Result<(), Self::Error>;

    /// Checks whether an entity with this ID exists.
    async fn exists(&self, id: &<Self::Entity as Entity>::Id) -> Result<bool, Self::Error>;
}
