//! Identity and value model shared by every service.
//!
//! This crate provides:
//! - [`Entity`] with identity-based equality and the [`Create`] factory
//! - [`AggregateRoot`] collecting [`DomainEvent`]s for post-persistence dispatch
//! - [`Auditable`] entities carrying who created and last changed them
//! - [`ValueObject`] with component-based equality

pub mod aggregate;
pub mod auditable;
pub mod entity;
pub mod error;
pub mod event;
pub mod value_object;

pub use aggregate::{AggregateRoot, DomainEvents};
pub use auditable::{AuditFields, Auditable};
pub use common::EntityId;
pub use entity::{Create, Entity, Identity};
pub use error::DomainError;
pub use event::DomainEvent;
pub use value_object::{EqualityComponent, ValueObject};
