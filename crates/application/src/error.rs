//! Application error types.

use domain::DomainError;
use thiserror::Error;

/// Boxed error from a collaborator the kernel treats as opaque.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// No mapping rule covers the given source value and target type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported mapping from {source_type} to {target_type}")]
pub struct UnsupportedMapping {
    pub source_type: &'static str,
    pub target_type: &'static str,
}

/// Errors surfaced by request dispatch and handling.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A mapper was asked for a conversion none of its rules cover.
    #[error(transparent)]
    UnsupportedMapping(#[from] UnsupportedMapping),

    /// A request was sent without a handler registered for its type.
    #[error("No handler registered for {request_type}")]
    NoHandlerRegistered { request_type: &'static str },

    /// A second handler was registered while duplicates are rejected.
    #[error("Handler already registered for {request_type}")]
    HandlerAlreadyRegistered { request_type: &'static str },

    /// The request failed validation.
    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// A repository implementation failed.
    #[error("Repository error: {0}")]
    Repository(#[source] BoxError),

    /// A concrete mapper failed while converting a value.
    #[error("Mapping error: {0}")]
    Mapping(#[source] BoxError),

    /// Domain logic rejected the operation.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),
}

impl ApplicationError {
    /// Wraps a repository implementation error, keeping it as the source.
    pub fn repository(error: impl Into<BoxError>) -> Self {
        ApplicationError::Repository(error.into())
    }

    /// Wraps a concrete mapper error, keeping it as the source.
    pub fn mapping(error: impl Into<BoxError>) -> Self {
        ApplicationError::Mapping(error.into())
    }

    /// Returns the validation messages if this is a validation failure.
    pub fn validation_errors(&self) -> Option<&[String]> {
        match self {
            ApplicationError::ValidationFailed(errors) => Some(errors),
            _ => None,
        }
    }
}
