//! Audit metadata for entities that track who changed them.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;

/// Who created and who last updated an entity. Purely descriptive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditFields {
    pub created_by: Option<String>,
    pub updated_by: Option<String>,
}

impl AuditFields {
    pub fn created_by(actor: impl Into<String>) -> Self {
        Self {
            created_by: Some(actor.into()),
            updated_by: None,
        }
    }
}

/// An [`Entity`] that records the actors responsible for its changes.
pub trait Auditable: Entity {
    fn audit(&self) -> &AuditFields;

    fn audit_mut(&mut self) -> &mut AuditFields;

    fn created_by(&self) -> Option<&str> {
        self.audit().created_by.as_deref()
    }

    fn updated_by(&self) -> Option<&str> {
        self.audit().updated_by.as_deref()
    }

    /// Records `actor` as the last modifier and stamps `updated_at`.
    fn mark_updated_by(&mut self, actor: impl Into<String>)
    where
        Self: Sized,
    {
        self.audit_mut().updated_by = Some(actor.into());
        self.touch();
    }
}
