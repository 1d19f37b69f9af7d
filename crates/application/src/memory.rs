use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use domain::Entity;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::repository::{IdOf, Repository};

/// Errors returned by [`InMemoryRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryRepositoryError {
    /// `add` was called for an ID that is already stored.
    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    /// `update` was called for an ID that is not stored.
    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// In-memory repository implementation for testing and prototyping.
///
/// Clones share the same storage, so a test can hand one clone to a handler
/// and inspect state through another.
pub struct InMemoryRepository<E: Entity> {
    entities: Arc<RwLock<HashMap<E::Id, E>>>,
}

impl<E: Entity> Clone for InMemoryRepository<E> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates a new empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored entities.
    pub async fn len(&self) -> usize {
        self.entities.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entities.read().await.is_empty()
    }

    /// Removes every stored entity.
    pub async fn clear(&self) {
        self.entities.write().await.clear();
    }
}

#[async_trait]
impl<E> Repository for InMemoryRepository<E>
where
    E: Entity + Clone + Send + Sync + 'static,
{
    type Entity = E;
    type Error = MemoryRepositoryError;

    async fn find_by_id(&self, id: &IdOf<Self>) -> Result<Option<E>, Self::Error> {
        Ok(self.entities.read().await.get(id).cloned())
    }

    async fn add(&self, entity: &E) -> Result<(), Self::Error> {
        let mut store = self.entities.write().await;
        if store.contains_key(entity.id()) {
            return Err(MemoryRepositoryError::AlreadyExists(format!(
                "{:?}",
                entity.id()
            )));
        }
        store.insert(entity.id().clone(), entity.clone());
        Ok(())
    }

    async fn update(&self, entity: &E) -> Result<(), Self::Error> {
        let mut store = self.entities.write().await;
        match store.get_mut(entity.id()) {
            Some(existing) => {
                *existing = entity.clone();
                Ok(())
            }
            None => Err(MemoryRepositoryError::NotFound(format!("{:?}", entity.id()))),
        }
    }

    async fn delete(&self, id: &IdOf<Self>) -> Result<(), Self::Error> {
        self.entities.write().await.remove(id);
        Ok(())
    }

    async fn exists(&self, id: &IdOf<Self>) -> Result<bool, Self::Error> {
        Ok(self.entities.read().await.contains_key(id))
    }
}
