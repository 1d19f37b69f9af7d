//! Request marker for commands and queries.

/// A command or query that can be sent through the [`Mediator`](crate::Mediator).
///
/// Requests are plain data. `Response` is the envelope the handler returns,
/// typically a [`common::ApiResponse`] or [`common::PaginatedResponse`].
pub trait Request: Send + 'static {
    type Response: Send + 'static;

    /// Name used in logs, metrics, and errors.
    fn request_type() -> &'static str
    where
        Self: Sized,
    {
        crate::short_type_name::<Self>()
    }
}
