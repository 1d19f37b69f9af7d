//! Registry-based dispatch of requests to their handlers.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use crate::config::{KernelConfig, RegistrationPolicy};
use crate::error::ApplicationError;
use crate::handler::RequestHandler;
use crate::request::Request;

/// A registered handler with its request type erased.
///
/// `handler` always holds an `Arc<dyn RequestHandler<C>>` for the request
/// type `C` whose `TypeId` keys the entry.
struct Registration {
    request_type: &'static str,
    handler: Box<dyn Any + Send + Sync>,
}

/// Routes each request to the single handler registered for its exact type.
///
/// Lookup is by concrete type only: there is no fallback to traits or wrapper
/// types. Register handlers during startup, then share the mediator (for
/// example behind an `Arc`) for dispatch; `register` takes `&mut self`, so it
/// cannot race with `send`.
pub struct Mediator {
    registry: HashMap<TypeId, Registration>,
    policy: RegistrationPolicy,
}

impl Mediator {
    /// Creates an empty mediator where later registrations replace earlier ones.
    pub fn new() -> Self {
        Self::with_policy(RegistrationPolicy::default())
    }

    pub fn with_policy(policy: RegistrationPolicy) -> Self {
        Self {
            registry: HashMap::new(),
            policy,
        }
    }

    pub fn with_config(config: &KernelConfig) -> Self {
        Self::with_policy(config.registration_policy)
    }

    pub fn policy(&self) -> RegistrationPolicy {
        self.policy
    }

    /// Registers `handler` for request type `C`.
    ///
    /// With [`RegistrationPolicy::Overwrite`] an existing handler is replaced;
    /// with [`RegistrationPolicy::Reject`] the call fails with
    /// [`ApplicationError::HandlerAlreadyRegistered`] and the existing handler
    /// stays in place.
    pub fn register<C, H>(&mut self, handler: H) -> Result<(), ApplicationError>
    where
        C: Request,
        H: RequestHandler<C> + 'static,
    {
        self.register_shared::<C>(Arc::new(handler))
    }

    /// Registers a handler that is already shared, e.g. one handler instance
    /// serving several mediators.
    pub fn register_shared<C: Request>(
        &mut self,
        handler: Arc<dyn RequestHandler<C>>,
    ) -> Result<(), ApplicationError> {
        let request_type = C::request_type();
        let key = TypeId::of::<C>();

        if self.registry.contains_key(&key) {
            match self.policy {
                RegistrationPolicy::Reject => {
                    return Err(ApplicationError::HandlerAlreadyRegistered { request_type });
                }
                RegistrationPolicy::Overwrite => {
                    tracing::warn!(request_type, "replacing previously registered handler");
                }
            }
        }

        self.registry.insert(
            key,
            Registration {
                request_type,
                handler: Box::new(handler),
            },
        );
        tracing::debug!(request_type, "handler registered");
        Ok(())
    }

    /// Returns whether a handler is registered for request type `C`.
    pub fn is_registered<C: Request>(&self) -> bool {
        self.registry.contains_key(&TypeId::of::<C>())
    }

    /// Names of all request types with a registered handler.
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.registry.values().map(|r| r.request_type).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Dispatches `request` to its handler and returns the handler's result unchanged.
    ///
    /// The handler runs to completion before this returns. Fails with
    /// [`ApplicationError::NoHandlerRegistered`] when no handler is registered
    /// for the request's type.
    #[tracing::instrument(skip_all, fields(request_type = C::request_type()))]
    pub async fn send<C: Request>(&self, request: C) -> Result<C::Response, ApplicationError> {
        let request_type = C::request_type();
        let handler = self.resolve::<C>().ok_or_else(|| {
            metrics::counter!("mediator_unhandled_requests_total").increment(1);
            tracing::warn!("no handler registered");
            ApplicationError::NoHandlerRegistered { request_type }
        })?;

        metrics::counter!("mediator_requests_total", "request_type" => request_type).increment(1);
        let start = Instant::now();

        let result = handler.handle(request).await;

        metrics::histogram!("mediator_dispatch_duration_seconds", "request_type" => request_type)
            .record(start.elapsed().as_secs_f64());
        match &result {
            Ok(_) => tracing::debug!("request handled"),
            Err(error) => {
                metrics::counter!("mediator_handler_failures_total", "request_type" => request_type)
                    .increment(1);
                tracing::debug!(%error, "handler returned an error");
            }
        }

        result
    }

    fn resolve<C: Request>(&self) -> Option<Arc<dyn RequestHandler<C>>> {
        self.registry
            .get(&TypeId::of::<C>())
            .and_then(|registration| {
                registration
                    .handler
                    .downcast_ref::<Arc<dyn RequestHandler<C>>>()
            })
            .cloned()
    }
}

impl Default for Mediator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Mediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mediator")
            .field("policy", &self.policy)
            .field("registered", &self.registered_types())
            .finish()
    }
}
