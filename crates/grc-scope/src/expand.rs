//! Scope expansion
//!
//! Computes which entities a selection covers, explicitly or through a
//! selected ancestor, and groups them per tier for the read-only scope view.

use crate::catalog::ScopeCatalog;
use crate::entity::{Macroprocess, Process, ScopeEntity, Subprocess};
use crate::id::{EntityKind, ScopeId};
use crate::selection::Selection;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One row of the scope view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayEntity {
    /// Scope id of the row
    pub scope_id: ScopeId,
    /// Row id in its lookup table
    pub id: String,
    /// Business code
    pub code: String,
    /// Display name
    pub name: String,
    /// Parent row id (`macroprocesoId` / `procesoId`)
    pub parent_id: Option<String>,
    /// `true` when auto-included through an ancestor rather than chosen
    pub is_child: bool,
}

impl DisplayEntity {
    fn from_entity<E: ScopeEntity>(entity: &E, is_child: bool) -> Self {
        Self {
            scope_id: entity.scope_id(),
            id: entity.id().to_string(),
            code: entity.code().to_string(),
            name: entity.name().to_string(),
            parent_id: entity.parent_id().map(str::to_string),
            is_child,
        }
    }
}

/// In-scope entities partitioned per tier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayGroups {
    /// Selected macroprocesses
    pub macroprocesos: Vec<DisplayEntity>,
    /// Processes selected or covered by their macroprocess
    pub procesos: Vec<DisplayEntity>,
    /// Subprocesses selected or covered by an ancestor
    pub subprocesos: Vec<DisplayEntity>,
}

impl DisplayGroups {
    /// Group holding entities of `kind`
    #[must_use]
    pub fn group(&self, kind: EntityKind) -> &[DisplayEntity] {
        match kind {
            EntityKind::Macroprocess => &self.macroprocesos,
            EntityKind::Process => &self.procesos,
            EntityKind::Subprocess => &self.subprocesos,
        }
    }

    /// Total rows across the three groups
    #[must_use]
    pub fn len(&self) -> usize {
        self.macroprocesos.len() + self.procesos.len() + self.subprocesos.len()
    }

    /// Check if no entity is in scope
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// How an entity relates to a selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Coverage {
    /// Listed in the selection
    Explicit,
    /// In scope through a selected ancestor only
    Implicit,
    /// Not in scope
    OutOfScope,
}

impl Coverage {
    /// Whether the entity is in scope at all (checkbox checked)
    #[inline]
    #[must_use]
    pub fn in_scope(self) -> bool {
        !matches!(self, Self::OutOfScope)
    }
}

/// Result of [`expand`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeExpansion {
    /// Every in-scope entity: macroprocesses, then processes, then
    /// subprocesses, each in lookup-table order
    pub expanded_entities: Vec<ScopeId>,
    /// Per-tier view rows
    pub display_groups: DisplayGroups,
}

impl ScopeExpansion {
    /// Coverage of `id` under the expanded selection
    #[must_use]
    pub fn coverage(&self, id: &ScopeId) -> Coverage {
        self.display_groups
            .group(id.kind())
            .iter()
            .find(|entry| &entry.scope_id == id)
            .map_or(Coverage::OutOfScope, |entry| {
                if entry.is_child {
                    Coverage::Implicit
                } else {
                    Coverage::Explicit
                }
            })
    }

    /// Check if `id` is in scope
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &ScopeId) -> bool {
        self.expanded_entities.contains(id)
    }

    /// Expanded entities as a selection (every entry explicit)
    #[must_use]
    pub fn to_selection(&self) -> Selection {
        self.expanded_entities.iter().cloned().collect()
    }
}

/// Expand a selection against the catalog
///
/// Selected macroprocesses cover their processes; selected or covered
/// processes cover their subprocesses. An entity listed in the selection is
/// reported with `is_child = false` even when an ancestor also covers it.
/// Ids with no matching row are skipped.
///
/// # Example
/// ```
/// use grc_scope::{expand, Macroprocess, Process, ScopeCatalog, ScopeId, Selection};
///
/// let macros = vec![Macroprocess::new("M1", "MP-01", "Finance")];
/// let procs = vec![Process::new("P1", "P-01", "Payables", "M1")];
/// let catalog = ScopeCatalog::new(&macros, &procs, &[]);
///
/// let expansion = expand(&Selection::from_raw(&["macroproceso-M1"]), &catalog);
///
/// assert!(expansion.contains(&ScopeId::process("P1")));
/// assert!(expansion.display_groups.procesos[0].is_child);
/// ```
#[must_use]
pub fn expand(selection: &Selection, catalog: &ScopeCatalog<'_>) -> ScopeExpansion {
    let mut expansion = ScopeExpansion::default();
    let groups = &mut expansion.display_groups;

    let mut macros_in_scope: HashSet<&str> = HashSet::new();
    for macroprocess in catalog.macroprocesses() {
        if selection.contains(&macroprocess.scope_id()) {
            macros_in_scope.insert(&macroprocess.id);
            groups
                .macroprocesos
                .push(DisplayEntity::from_entity(macroprocess, false));
        }
    }

    let mut processes_in_scope: HashSet<&str> = HashSet::new();
    for process in catalog.processes() {
        let explicit = selection.contains(&process.scope_id());
        let inherited = macros_in_scope.contains(process.macroproceso_id.as_str());
        if explicit || inherited {
            processes_in_scope.insert(&process.id);
            groups
                .procesos
                .push(DisplayEntity::from_entity(process, !explicit));
        }
    }

    for subprocess in catalog.subprocesses() {
        let explicit = selection.contains(&subprocess.scope_id());
        let inherited = processes_in_scope.contains(subprocess.proceso_id.as_str());
        if explicit || inherited {
            groups
                .subprocesos
                .push(DisplayEntity::from_entity(subprocess, !explicit));
        }
    }

    expansion.expanded_entities = expansion
        .display_groups
        .macroprocesos
        .iter()
        .chain(&expansion.display_groups.procesos)
        .chain(&expansion.display_groups.subprocesos)
        .map(|entry| entry.scope_id.clone())
        .collect();

    let explicit_hits = expansion
        .display_groups
        .macroprocesos
        .iter()
        .chain(&expansion.display_groups.procesos)
        .chain(&expansion.display_groups.subprocesos)
        .filter(|entry| !entry.is_child)
        .count();
    if explicit_hits < selection.len() {
        tracing::debug!(
            skipped = selection.len() - explicit_hits,
            "scope ids with no matching entity skipped during expansion"
        );
    }

    expansion
}

/// Expand a persisted selection against borrowed lookup tables
///
/// String-level form of [`expand`]: unparseable and dangling entries are
/// skipped.
#[must_use]
pub fn expand_scope_entities<S: AsRef<str>>(
    selection: &[S],
    macroprocesses: &[Macroprocess],
    processes: &[Process],
    subprocesses: &[Subprocess],
) -> ScopeExpansion {
    let catalog = ScopeCatalog::new(macroprocesses, processes, subprocesses);
    expand(&Selection::from_raw(selection), &catalog)
}
