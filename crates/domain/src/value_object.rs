//! Value objects: immutable, identity-less, compared by their components.

use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use common::EntityId;
use uuid::Uuid;

/// A single value taking part in a value object's equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EqualityComponent {
    None,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Text(String),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    /// A variable-length collection compared element by element.
    List(Vec<EqualityComponent>),
}

impl From<bool> for EqualityComponent {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for EqualityComponent {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for EqualityComponent {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for EqualityComponent {
    fn from(value: u32) -> Self {
        Self::UInt(value.into())
    }
}

impl From<u64> for EqualityComponent {
    fn from(value: u64) -> Self {
        Self::UInt(value)
    }
}

impl From<&str> for EqualityComponent {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for EqualityComponent {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for EqualityComponent {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<Uuid> for EqualityComponent {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<EntityId> for EqualityComponent {
    fn from(value: EntityId) -> Self {
        Self::Uuid(value.as_uuid())
    }
}

impl From<DateTime<Utc>> for EqualityComponent {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value)
    }
}

impl<T: Into<EqualityComponent>> From<Option<T>> for EqualityComponent {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// An immutable value with no identity.
///
/// Two value objects of the same type are equal when their equality components
/// are equal pairwise and there are the same number of them. Sequences of
/// different lengths are never equal, which keeps equal values hashing equally.
///
/// Use [`impl_value_object_eq!`](crate::impl_value_object_eq) to derive
/// `PartialEq`, `Eq` and `Hash` from the components.
pub trait ValueObject {
    /// The ordered components that define this value.
    fn equality_components(&self) -> Vec<EqualityComponent>;

    fn value_eq(&self, other: &Self) -> bool {
        let ours = self.equality_components();
        let theirs = other.equality_components();
        ours.len() == theirs.len() && ours.iter().zip(&theirs).all(|(a, b)| a == b)
    }

    fn value_hash<H: Hasher>(&self, state: &mut H) {
        self.equality_components().hash(state);
    }
}

/// Implements `PartialEq`, `Eq` and `Hash` for a [`ValueObject`] from its
/// equality components.
#[macro_export]
macro_rules! impl_value_object_eq {
    ($ty:ty) => {
        impl ::core::cmp::PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                $crate::ValueObject::value_eq(self, other)
            }
        }

        impl ::core::cmp::Eq for $ty {}

        impl ::core::hash::Hash for $ty {
            fn hash<H: ::core::hash::Hasher>(&self, state: &mut H) {
                $crate::ValueObject::value_hash(self, state);
            }
        }
    };
}
