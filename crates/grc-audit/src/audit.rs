//! Audit record
//!
//! The audit owns its scope selection as persisted strings; the lookup
//! tables it points into are reference data owned elsewhere.

use crate::editor::ScopeUpdate;
use chrono::{DateTime, Utc};
use grc_scope::Selection;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Lifecycle stage of an audit, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStage {
    /// Objectives and calendar
    Planning,
    /// Entities under review
    Scope,
    /// Evaluation criteria
    Criteria,
    /// Risk re-evaluation (probability × impact)
    RiskReevaluation,
    /// Work program and assigned tests
    WorkProgram,
    /// Evidence gathering
    Evidence,
    /// Findings
    Findings,
    /// Observations raised with owners
    Observations,
    /// Final report
    Reporting,
    /// Follow-up of action plans
    FollowUp,
}

impl AuditStage {
    /// All stages in order
    pub const ALL: [AuditStage; 10] = [
        Self::Planning,
        Self::Scope,
        Self::Criteria,
        Self::RiskReevaluation,
        Self::WorkProgram,
        Self::Evidence,
        Self::Findings,
        Self::Observations,
        Self::Reporting,
        Self::FollowUp,
    ];

    /// Stage after this one, `None` at follow-up
    #[must_use]
    pub fn next(self) -> Option<Self> {
        let position = Self::ALL.iter().position(|stage| *stage == self)?;
        Self::ALL.get(position + 1).copied()
    }

    /// Human-readable label
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Scope => "scope",
            Self::Criteria => "criteria",
            Self::RiskReevaluation => "risk re-evaluation",
            Self::WorkProgram => "work program",
            Self::Evidence => "evidence",
            Self::Findings => "findings",
            Self::Observations => "observations",
            Self::Reporting => "reporting",
            Self::FollowUp => "follow-up",
        }
    }
}

impl Display for AuditStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Audit record as exchanged with the REST layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    /// Audit id
    pub id: String,
    /// Title
    pub name: String,
    /// Current lifecycle stage
    pub stage: AuditStage,
    /// Persisted scope selection (`"<kind>-<id>"` strings)
    #[serde(default)]
    pub scope_entities: Vec<String>,
    /// Bumped on every stored update
    #[serde(default)]
    pub revision: u64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl Audit {
    /// Create audit in planning with an empty scope
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            stage: AuditStage::Planning,
            scope_entities: Vec::new(),
            revision: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// With explicit id
    #[inline]
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Parsed scope selection; unparseable entries are dropped
    #[must_use]
    pub fn selection(&self) -> Selection {
        Selection::from_raw(&self.scope_entities)
    }

    /// Replace the whole scope selection
    pub fn apply_scope(&mut self, update: ScopeUpdate) {
        self.scope_entities = update.scope_entities;
        self.touch();
    }

    /// Move to the next lifecycle stage
    ///
    /// Returns the new stage, or `None` if the audit is already in follow-up.
    pub fn advance(&mut self) -> Option<AuditStage> {
        let next = self.stage.next()?;
        self.stage = next;
        self.touch();
        Some(next)
    }

    fn touch(&mut self) {
        self.revision += 1;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_audit_has_empty_scope() {
        let audit = Audit::new("Treasury review");

        assert!(audit.scope_entities.is_empty());
        assert!(audit.selection().is_empty());
        assert_eq!(audit.stage, AuditStage::Planning);
        assert_eq!(audit.revision, 0);
        assert!(!audit.id.is_empty());
    }

    #[test]
    fn apply_scope_replaces_and_bumps_revision() {
        let mut audit = Audit::new("Treasury review");
        audit.scope_entities = vec!["process-P9".into()];

        audit.apply_scope(ScopeUpdate {
            scope_entities: vec!["macroproceso-M1".into()],
        });

        assert_eq!(audit.scope_entities, vec!["macroproceso-M1"]);
        assert_eq!(audit.revision, 1);
    }

    #[test]
    fn stages_advance_in_order() {
        let mut audit = Audit::new("x");

        assert_eq!(audit.advance(), Some(AuditStage::Scope));
        assert_eq!(audit.advance(), Some(AuditStage::Criteria));
        assert_eq!(audit.advance(), Some(AuditStage::RiskReevaluation));

        audit.stage = AuditStage::FollowUp;
        assert_eq!(audit.advance(), None);
        assert_eq!(audit.stage, AuditStage::FollowUp);
    }

    #[test]
    fn selection_tolerates_garbage() {
        let mut audit = Audit::new("x");
        audit.scope_entities = vec!["macroproceso-M1".into(), "???".into()];

        assert_eq!(audit.selection().len(), 1);
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let audit = Audit::new("x").with_id("a-1");
        let json = serde_json::to_value(&audit).unwrap();

        assert_eq!(json["id"], "a-1");
        assert_eq!(json["scopeEntities"], serde_json::json!([]));
        assert_eq!(json["stage"], "planning");
        assert!(json.get("createdAt").is_some());
    }
}
