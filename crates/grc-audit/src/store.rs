//! Audit persistence seam
//!
//! [`AuditStore`] is the collaborator that writes audits back to the backend.
//! Scope changes are always full replacements guarded by the revision the
//! editor started from.

use crate::audit::Audit;
use crate::editor::ScopeUpdate;
use crate::error::AuditError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Storage for audit records
#[async_trait]
pub trait AuditStore: Send + Sync {
    /// Store a new audit
    async fn create(&self, audit: Audit) -> Result<Audit, AuditError>;

    /// Fetch an audit by id
    async fn get(&self, id: &str) -> Result<Audit, AuditError>;

    /// Replace the scope selection of an audit
    ///
    /// Fails with [`AuditError::Conflict`] if the stored revision is not
    /// `expected_revision`.
    async fn replace_scope(
        &self,
        id: &str,
        update: ScopeUpdate,
        expected_revision: u64,
    ) -> Result<Audit, AuditError>;
}

/// Process-local [`AuditStore`]
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    audits: RwLock<HashMap<String, Audit>>,
}

impl InMemoryAuditStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored audits
    #[must_use]
    pub fn len(&self) -> usize {
        self.audits.read().len()
    }

    /// Check if no audit is stored
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn create(&self, audit: Audit) -> Result<Audit, AuditError> {
        let mut audits = self.audits.write();
        if audits.contains_key(&audit.id) {
            return Err(AuditError::AlreadyExists(audit.id));
        }
        tracing::info!(audit = %audit.id, name = %audit.name, "audit created");
        audits.insert(audit.id.clone(), audit.clone());
        Ok(audit)
    }

    async fn get(&self, id: &str) -> Result<Audit, AuditError> {
        self.audits
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| AuditError::NotFound(id.to_string()))
    }

    async fn replace_scope(
        &self,
        id: &str,
        update: ScopeUpdate,
        expected_revision: u64,
    ) -> Result<Audit, AuditError> {
        let mut audits = self.audits.write();
        let audit = audits
            .get_mut(id)
            .ok_or_else(|| AuditError::NotFound(id.to_string()))?;

        if audit.revision != expected_revision {
            tracing::warn!(
                audit = id,
                expected = expected_revision,
                actual = audit.revision,
                "scope update rejected, stale revision"
            );
            return Err(AuditError::Conflict {
                id: id.to_string(),
                expected: expected_revision,
                actual: audit.revision,
            });
        }

        let entities = update.scope_entities.len();
        audit.apply_scope(update);
        tracing::info!(audit = id, entities, revision = audit.revision, "audit scope replaced");

        Ok(audit.clone())
    }
}
