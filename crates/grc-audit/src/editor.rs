//! Scope editing session
//!
//! Provides [`ScopeEditor`], the state behind the scope checkbox tree: every
//! toggle goes through the sanitizer, and saving produces a full-replacement
//! [`ScopeUpdate`].

use crate::audit::Audit;
use crate::error::AuditError;
use grc_scope::{expand, sanitize, Coverage, ScopeCatalog, ScopeExpansion, ScopeId, ScopeTables, Selection};
use serde::{Deserialize, Serialize};

/// Full-document scope update sent to the audit resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeUpdate {
    /// New selection, replaces the stored one wholesale
    pub scope_entities: Vec<String>,
}

impl From<&Selection> for ScopeUpdate {
    fn from(selection: &Selection) -> Self {
        Self {
            scope_entities: selection.to_strings(),
        }
    }
}

/// Editing session over one audit's scope selection
#[derive(Debug, Clone)]
pub struct ScopeEditor<'a> {
    catalog: ScopeCatalog<'a>,
    original: Selection,
    working: Selection,
}

impl<'a> ScopeEditor<'a> {
    /// Start editing `selection`; ids missing from the catalog are dropped
    #[must_use]
    pub fn new(selection: &Selection, catalog: ScopeCatalog<'a>) -> Self {
        let original = selection.retain_known(&catalog);
        Self {
            working: original.clone(),
            original,
            catalog,
        }
    }

    /// Start editing the stored selection of `audit`
    #[must_use]
    pub fn for_audit(audit: &Audit, tables: &'a ScopeTables) -> Self {
        Self::new(&audit.selection(), tables.catalog())
    }

    /// Apply a checkbox toggle
    pub fn toggle(&mut self, id: &ScopeId, selected: bool) -> &Selection {
        self.working = sanitize(&self.working, id, selected, &self.catalog);
        &self.working
    }

    /// Apply a checkbox toggle given the persisted id form
    ///
    /// # Errors
    /// Returns [`AuditError::Scope`] if `raw` is not a valid scope id
    pub fn toggle_raw(&mut self, raw: &str, selected: bool) -> Result<&Selection, AuditError> {
        let id: ScopeId = raw.parse()?;
        Ok(self.toggle(&id, selected))
    }

    /// Current working selection
    #[inline]
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.working
    }

    /// Catalog the session edits against
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &ScopeCatalog<'a> {
        &self.catalog
    }

    /// Expanded view of the working selection
    #[must_use]
    pub fn expansion(&self) -> ScopeExpansion {
        expand(&self.working, &self.catalog)
    }

    /// Checkbox state of one entity
    #[must_use]
    pub fn coverage(&self, id: &ScopeId) -> Coverage {
        self.expansion().coverage(id)
    }

    /// Check if the working selection differs from the loaded one
    #[inline]
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.working != self.original
    }

    /// Discard pending toggles
    pub fn reset(&mut self) {
        self.working = self.original.clone();
    }

    /// Update payload for the working selection
    #[must_use]
    pub fn update(&self) -> ScopeUpdate {
        ScopeUpdate::from(&self.working)
    }

    /// Finish the session, producing the update payload
    #[must_use]
    pub fn into_update(self) -> ScopeUpdate {
        ScopeUpdate {
            scope_entities: self.working.to_strings(),
        }
    }
}
