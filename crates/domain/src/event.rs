//! Domain event contract.

use std::fmt::Debug;

use chrono::{DateTime, Utc};

/// Something that happened inside an aggregate and that other parts of the
/// system may react to.
///
/// Events are immutable facts named in the past tense. Concrete event types
/// belong to each service; the kernel only needs the occurrence time and a
/// stable type name for routing and logging.
pub trait DomainEvent: Clone + Debug + Send + Sync + 'static {
    /// Returns the event type name.
    fn event_type(&self) -> &'static str;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
