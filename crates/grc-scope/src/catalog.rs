//! Lookup index over the three reference tables
//!
//! Provides [`ScopeCatalog`] for id lookup and parent/child navigation. The
//! catalog borrows the tables; building it is O(n) and it is cheap enough to
//! rebuild on every toggle.

use crate::entity::{Macroprocess, Process, ScopeEntity, Subprocess};
use crate::id::{EntityKind, ScopeId};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Read-only index over macroprocess, process and subprocess rows
///
/// Iteration follows lookup-table order, which keeps every derived result
/// deterministic for a given input. Rows repeating an id already seen are
/// ignored (first row wins).
///
/// Parent pointers that reference a missing row leave the child in the
/// catalog but without an ancestor: it can be selected directly, it is never
/// covered implicitly.
#[derive(Debug, Clone)]
pub struct ScopeCatalog<'a> {
    macroprocesses: IndexMap<&'a str, &'a Macroprocess>,
    processes: IndexMap<&'a str, &'a Process>,
    subprocesses: IndexMap<&'a str, &'a Subprocess>,

    /// macroprocess id -> processes, table order
    processes_by_macro: HashMap<&'a str, Vec<&'a Process>>,

    /// process id -> subprocesses, table order
    subprocesses_by_process: HashMap<&'a str, Vec<&'a Subprocess>>,
}

impl<'a> ScopeCatalog<'a> {
    /// Index the three tables
    #[must_use]
    pub fn new(
        macroprocesses: &'a [Macroprocess],
        processes: &'a [Process],
        subprocesses: &'a [Subprocess],
    ) -> Self {
        let macroprocesses = index_rows(macroprocesses);
        let processes = index_rows(processes);
        let subprocesses = index_rows(subprocesses);

        let mut processes_by_macro: HashMap<&'a str, Vec<&'a Process>> = HashMap::new();
        for &process in processes.values() {
            processes_by_macro
                .entry(process.macroproceso_id.as_str())
                .or_default()
                .push(process);
        }

        let mut subprocesses_by_process: HashMap<&'a str, Vec<&'a Subprocess>> = HashMap::new();
        for &subprocess in subprocesses.values() {
            subprocesses_by_process
                .entry(subprocess.proceso_id.as_str())
                .or_default()
                .push(subprocess);
        }

        Self {
            macroprocesses,
            processes,
            subprocesses,
            processes_by_macro,
            subprocesses_by_process,
        }
    }

    /// Check if a scope id references a row of this catalog
    #[must_use]
    pub fn contains(&self, id: &ScopeId) -> bool {
        let key = id.entity_id();
        match id.kind() {
            EntityKind::Macroprocess => self.macroprocesses.contains_key(key),
            EntityKind::Process => self.processes.contains_key(key),
            EntityKind::Subprocess => self.subprocesses.contains_key(key),
        }
    }

    /// Lookup macroprocess row
    #[inline]
    #[must_use]
    pub fn macroprocess(&self, id: &str) -> Option<&'a Macroprocess> {
        self.macroprocesses.get(id).copied()
    }

    /// Lookup process row
    #[inline]
    #[must_use]
    pub fn process(&self, id: &str) -> Option<&'a Process> {
        self.processes.get(id).copied()
    }

    /// Lookup subprocess row
    #[inline]
    #[must_use]
    pub fn subprocess(&self, id: &str) -> Option<&'a Subprocess> {
        self.subprocesses.get(id).copied()
    }

    /// Macroprocess rows in table order
    pub fn macroprocesses(&self) -> impl Iterator<Item = &'a Macroprocess> + '_ {
        self.macroprocesses.values().copied()
    }

    /// Process rows in table order
    pub fn processes(&self) -> impl Iterator<Item = &'a Process> + '_ {
        self.processes.values().copied()
    }

    /// Subprocess rows in table order
    pub fn subprocesses(&self) -> impl Iterator<Item = &'a Subprocess> + '_ {
        self.subprocesses.values().copied()
    }

    /// Processes whose `macroprocesoId` is `macro_id`
    #[must_use]
    pub fn processes_of(&self, macro_id: &str) -> &[&'a Process] {
        self.processes_by_macro
            .get(macro_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Subprocesses whose `procesoId` is `process_id`
    #[must_use]
    pub fn subprocesses_of(&self, process_id: &str) -> &[&'a Subprocess] {
        self.subprocesses_by_process
            .get(process_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parent of a catalog entry, if both exist
    #[must_use]
    pub fn parent(&self, id: &ScopeId) -> Option<ScopeId> {
        match id.kind() {
            EntityKind::Macroprocess => None,
            EntityKind::Process => self
                .process(id.entity_id())
                .and_then(|p| self.macroprocess(&p.macroproceso_id))
                .map(ScopeEntity::scope_id),
            EntityKind::Subprocess => self
                .subprocess(id.entity_id())
                .and_then(|s| self.process(&s.proceso_id))
                .map(ScopeEntity::scope_id),
        }
    }

    /// Ancestors of a catalog entry, nearest first
    #[must_use]
    pub fn ancestors(&self, id: &ScopeId) -> Vec<ScopeId> {
        let mut ancestors = Vec::with_capacity(2);
        let mut current = self.parent(id);
        while let Some(parent) = current {
            current = self.parent(&parent);
            ancestors.push(parent);
        }
        ancestors
    }

    /// Direct children of a catalog entry
    ///
    /// Empty for subprocesses and for ids not in the catalog.
    #[must_use]
    pub fn children(&self, id: &ScopeId) -> Vec<ScopeId> {
        if !self.contains(id) {
            return Vec::new();
        }

        match id.kind() {
            EntityKind::Macroprocess => self
                .processes_of(id.entity_id())
                .iter()
                .map(|p| p.scope_id())
                .collect(),
            EntityKind::Process => self
                .subprocesses_of(id.entity_id())
                .iter()
                .map(|s| s.scope_id())
                .collect(),
            EntityKind::Subprocess => Vec::new(),
        }
    }

    /// All entries transitively under `id`, children before grandchildren
    #[must_use]
    pub fn descendants(&self, id: &ScopeId) -> Vec<ScopeId> {
        let mut descendants = self.children(id);
        let mut next = 0;
        while next < descendants.len() {
            let grandchildren = self.children(&descendants[next]);
            descendants.extend(grandchildren);
            next += 1;
        }
        descendants
    }

    /// Check if `ancestor` sits above `id` in the hierarchy
    #[must_use]
    pub fn is_ancestor_of(&self, ancestor: &ScopeId, id: &ScopeId) -> bool {
        ancestor.kind().depth() < id.kind().depth() && self.ancestors(id).contains(ancestor)
    }

    /// Total indexed rows
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.macroprocesses.len() + self.processes.len() + self.subprocesses.len()
    }

    /// Check if no rows are indexed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn index_rows<E: ScopeEntity>(rows: &[E]) -> IndexMap<&str, &E> {
    let mut index = IndexMap::with_capacity(rows.len());
    for row in rows {
        if index.contains_key(row.id()) {
            tracing::warn!(kind = %E::KIND, id = row.id(), "duplicate lookup row ignored");
            continue;
        }
        index.insert(row.id(), row);
    }
    index
}
