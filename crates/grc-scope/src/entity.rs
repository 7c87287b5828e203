//! Reference data rows of the process hierarchy
//!
//! Macroprocesses, processes and subprocesses are read-only lookup tables
//! fetched independently of any audit. Field names follow the REST payload
//! (`macroprocesoId`, `procesoId`).

use crate::catalog::ScopeCatalog;
use crate::id::{EntityKind, ScopeId};
use serde::{Deserialize, Serialize};

/// Row of one of the three lookup tables
///
/// Implemented by [`Macroprocess`], [`Process`] and [`Subprocess`] so the
/// expander can build display entries generically.
pub trait ScopeEntity {
    /// Tier this row type belongs to
    const KIND: EntityKind;

    /// Row id
    fn id(&self) -> &str;

    /// Short business code
    fn code(&self) -> &str;

    /// Display name
    fn name(&self) -> &str;

    /// Id of the parent row, `None` for roots
    fn parent_id(&self) -> Option<&str>;

    /// Scope id referencing this row
    #[inline]
    fn scope_id(&self) -> ScopeId {
        ScopeId::new(Self::KIND, self.id())
    }
}

/// Top-level organizational grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Macroprocess {
    /// Row id
    pub id: String,
    /// Business code
    #[serde(default)]
    pub code: String,
    /// Display name
    pub name: String,
}

/// Mid-tier entity, child of a macroprocess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Process {
    /// Row id
    pub id: String,
    /// Business code
    #[serde(default)]
    pub code: String,
    /// Display name
    pub name: String,
    /// Owning macroprocess
    pub macroproceso_id: String,
}

/// Leaf entity, child of a process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subprocess {
    /// Row id
    pub id: String,
    /// Business code
    #[serde(default)]
    pub code: String,
    /// Display name
    pub name: String,
    /// Owning process
    pub proceso_id: String,
}

impl Macroprocess {
    /// Create macroprocess row
    #[must_use]
    pub fn new(id: impl Into<String>, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
        }
    }
}

impl Process {
    /// Create process row under `macroproceso_id`
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        macroproceso_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            macroproceso_id: macroproceso_id.into(),
        }
    }
}

impl Subprocess {
    /// Create subprocess row under `proceso_id`
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        code: impl Into<String>,
        name: impl Into<String>,
        proceso_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            name: name.into(),
            proceso_id: proceso_id.into(),
        }
    }
}

impl ScopeEntity for Macroprocess {
    const KIND: EntityKind = EntityKind::Macroprocess;

    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<&str> {
        None
    }
}

impl ScopeEntity for Process {
    const KIND: EntityKind = EntityKind::Process;

    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.macroproceso_id)
    }
}

impl ScopeEntity for Subprocess {
    const KIND: EntityKind = EntityKind::Subprocess;

    fn id(&self) -> &str {
        &self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<&str> {
        Some(&self.proceso_id)
    }
}

/// Owned copy of the three lookup tables
///
/// Deserializes from `{"macroprocesos": [..], "procesos": [..], "subprocesos": [..]}`;
/// missing tables default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeTables {
    /// Macroprocess rows
    #[serde(default)]
    pub macroprocesos: Vec<Macroprocess>,
    /// Process rows
    #[serde(default)]
    pub procesos: Vec<Process>,
    /// Subprocess rows
    #[serde(default)]
    pub subprocesos: Vec<Subprocess>,
}

impl ScopeTables {
    /// Create tables from rows
    #[must_use]
    pub fn new(
        macroprocesos: Vec<Macroprocess>,
        procesos: Vec<Process>,
        subprocesos: Vec<Subprocess>,
    ) -> Self {
        Self {
            macroprocesos,
            procesos,
            subprocesos,
        }
    }

    /// Build a lookup index borrowing these tables
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> ScopeCatalog<'_> {
        ScopeCatalog::new(&self.macroprocesos, &self.procesos, &self.subprocesos)
    }

    /// Total number of rows across the three tables
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.macroprocesos.len() + self.procesos.len() + self.subprocesos.len()
    }

    /// Check if all three tables are empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
