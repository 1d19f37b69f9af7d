//! Request handler contract and its injected dependencies.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ApplicationError;
use crate::request::Request;
use crate::validator::Validator;

/// Processes one request type and returns its response envelope.
///
/// Handlers may be invoked concurrently for different requests, so any state
/// beyond their injected dependencies must be synchronized by the handler.
///
/// A handler should validate before mutating state. Expected business outcomes
/// (not found, forbidden, invalid input) belong in the response envelope;
/// returning `Err` is for failures the caller cannot act on, although a handler
/// may also surface validation failures as [`ApplicationError::ValidationFailed`].
#[async_trait]
pub trait RequestHandler<C: Request>: Send + Sync {
    async fn handle(&self, request: C) -> Result<C::Response, ApplicationError>;
}

#[async_trait]
impl<C, H> RequestHandler<C> for Arc<H>
where
    C: Request,
    H: RequestHandler<C> + ?Sized,
{
    async fn handle(&self, request: C) -> Result<C::Response, ApplicationError> {
        (**self).handle(request).await
    }
}

/// The three collaborators every handler is built from.
///
/// Concrete handlers embed a `HandlerContext` and reach their repository,
/// validator, and mapper through it.
#[derive(Debug, Clone)]
pub struct HandlerContext<R, V, M> {
    repository: R,
    validator: V,
    mapper: M,
}

impl<R, V, M> HandlerContext<R, V, M> {
    pub fn new(repository: R, validator: V, mapper: M) -> Self {
        Self {
            repository,
            validator,
            mapper,
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    pub fn validator(&self) -> &V {
        &self.validator
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    /// Runs the validator and returns its error messages.
    pub fn validation_errors<C>(&self, request: &C) -> Vec<String>
    where
        V: Validator<C>,
    {
        self.validator.validate(request)
    }

    /// Runs the validator, failing with [`ApplicationError::ValidationFailed`]
    /// when it reports any errors.
    pub fn ensure_valid<C>(&self, request: &C) -> Result<(), ApplicationError>
    where
        V: Validator<C>,
    {
        let errors = self.validator.validate(request);
        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(error_count = errors.len(), "request failed validation");
            Err(ApplicationError::ValidationFailed(errors))
        }
    }
}
