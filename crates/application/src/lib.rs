//! Application layer of the shared kernel.
//!
//! This crate provides:
//! - [`Request`] / [`RequestHandler`] contracts and the [`Mediator`] that routes
//!   each request to the handler registered for its exact type
//! - [`HandlerContext`] bundling a handler's repository, validator, and mapper
//! - [`Repository`] and [`Validator`] ports, plus [`InMemoryRepository`]
//! - [`Mapper`] / [`MapperExt::map`] for translating between persistence,
//!   domain, and transfer representations
//! - [`KernelConfig`] and [`telemetry::init_tracing`]

pub mod config;
pub mod error;
pub mod handler;
pub mod mapper;
pub mod mediator;
pub mod memory;
pub mod repository;
pub mod request;
pub mod telemetry;
pub mod validator;

pub use config::{KernelConfig, LogFormat, RegistrationPolicy};
pub use error::{ApplicationError, BoxError, UnsupportedMapping};
pub use handler::{HandlerContext, RequestHandler};
pub use mapper::{MapSource, Mapped, Mapper, MapperExt, Representation, RepresentationKind, TargetType};
pub use mediator::Mediator;
pub use memory::{InMemoryRepository, MemoryRepositoryError};
pub use repository::Repository;
pub use request::Request;
pub use validator::{AcceptAll, Validator};

/// Type name without its module path, e.g. `CreateUser` or `Vec<alloc::string::String>`.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let head = full.split('<').next().unwrap_or(full);
    match head.rfind("::") {
        Some(index) => &full[index + 2..],
        None => full,
    }
}
