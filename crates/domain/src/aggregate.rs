//! Aggregate roots and their pending domain events.

use crate::entity::Entity;
use crate::event::DomainEvent;

/// Ordered log of domain events raised by an aggregate and not yet dispatched.
///
/// Events can only be appended, read back as a copy, or removed wholesale.
/// Appending goes through [`AggregateRoot::add_domain_event`]:
///
/// ```compile_fail
/// let mut events = domain::DomainEvents::<u32>::new();
/// events.record(1);
/// ```
#[derive(Debug, Clone)]
pub struct DomainEvents<E> {
    events: Vec<E>,
}

impl<E> Default for DomainEvents<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E: Clone> DomainEvents<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event after every event recorded so far.
    pub(crate) fn record(&mut self, event: E) {
        self.events.push(event);
    }

    /// Returns a copy of the pending events in insertion order.
    pub fn snapshot(&self) -> Vec<E> {
        self.events.clone()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Removes and returns all pending events.
    pub fn drain(&mut self) -> Vec<E> {
        std::mem::take(&mut self.events)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &E> {
        self.events.iter()
    }
}

/// Entry point of an aggregate: the entity through which all changes to the
/// cluster are made.
///
/// Mutations record [`DomainEvent`]s that the infrastructure layer dispatches
/// after the unit of work commits, calling
/// [`get_domain_events`](AggregateRoot::get_domain_events) and then
/// [`clear_domain_events`](AggregateRoot::clear_domain_events).
///
/// The event log belongs to a single aggregate instance; mutating it requires
/// `&mut self`, so sharing an aggregate across threads needs external locking.
pub trait AggregateRoot: Entity {
    /// The type of events this aggregate raises.
    type Event: DomainEvent;

    fn domain_events(&self) -> &DomainEvents<Self::Event>;

    /// Storage accessor for implementors. Callers record events through
    /// [`add_domain_event`](AggregateRoot::add_domain_event).
    fn domain_events_mut(&mut self) -> &mut DomainEvents<Self::Event>;

    /// Records an event to be dispatched after persistence.
    fn add_domain_event(&mut self, event: Self::Event) {
        tracing::trace!(event_type = event.event_type(), "domain event recorded");
        self.domain_events_mut().record(event);
    }

    /// Returns a copy of the collected events; changing it does not affect the aggregate.
    fn get_domain_events(&self) -> Vec<Self::Event> {
        self.domain_events().snapshot()
    }

    fn clear_domain_events(&mut self) {
        self.domain_events_mut().clear();
    }

    /// Returns the collected events and clears them in one step.
    fn take_domain_events(&mut self) -> Vec<Self::Event> {
        self.domain_events_mut().drain()
    }
}
