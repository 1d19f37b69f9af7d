//! Request validation port.

/// Checks a request before a handler acts on it.
///
/// Errors are human-readable strings in the order they were found; an empty
/// list means the request is valid.
pub trait Validator<C>: Send + Sync {
    fn validate(&self, request: &C) -> Vec<String>;

    fn is_valid(&self, request: &C) -> bool {
        self.validate(request).is_empty()
    }
}

/// Validator for requests that carry nothing to check.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<C> Validator<C> for AcceptAll {
    fn validate(&self, _request: &C) -> Vec<String> {
        Vec::new()
    }
}
