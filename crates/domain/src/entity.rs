//! Entity identity and lifecycle timestamps.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identity and lifecycle timestamps embedded in every entity.
///
/// Equality and hashing look at `id` only, so two snapshots of the same entity
/// taken at different times compare equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity<Id> {
    id: Id,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl<Id> Identity<Id> {
    /// Creates the identity of a brand-new entity, stamped with the current time.
    pub fn new(id: Id) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Rebuilds an identity from stored values.
    ///
    /// Used by mappers when loading an entity from its persistence model.
    pub fn restore(id: Id, created_at: DateTime<Utc>, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Records a modification at the current time.
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

impl<Id: PartialEq> PartialEq for Identity<Id> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<Id: Eq> Eq for Identity<Id> {}

impl<Id: Hash> Hash for Identity<Id> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// An object defined by its identity rather than its attributes.
///
/// Implementors embed an [`Identity`] and expose it; everything else has a
/// default implementation. Use [`impl_entity_identity!`](crate::impl_entity_identity)
/// to derive `PartialEq`, `Eq` and `Hash` from the id.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + Hash + Debug + Send + Sync + 'static;

    fn identity(&self) -> &Identity<Self::Id>;

    fn identity_mut(&mut self) -> &mut Identity<Self::Id>;

    fn id(&self) -> &Self::Id {
        self.identity().id()
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.identity().created_at()
    }

    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.identity().updated_at()
    }

    /// Stamps `updated_at` with the current time.
    fn touch(&mut self) {
        self.identity_mut().touch();
    }
}

/// Factory for entities.
///
/// The factory owns id generation and initial validation, so it is the only
/// sanctioned way for application code to bring a new entity into existence.
pub trait Create: Entity + Sized {
    /// Everything the factory needs to build a valid entity.
    type Input;

    fn create(input: Self::Input) -> Result<Self, DomainError>;
}

/// Implements `PartialEq`, `Eq` and `Hash` for an [`Entity`] by comparing ids.
#[macro_export]
macro_rules! impl_entity_identity {
    ($ty:ty) => {
        impl ::core::cmp::PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::Entity::id(self) == $crate::Entity::id(other)
            }
        }

        impl ::core::cmp::Eq for $ty {}

        impl ::core::hash::Hash for $ty {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                ::core::hash::Hash::hash($crate::Entity::id(self), state);
            }
        }
    };
}
