//! Selection sanitization
//!
//! Applies one checkbox toggle to a selection while keeping the persisted
//! form minimal: a selected macroprocess stands for its whole subtree, and
//! excluding one covered entity rewrites the covering ancestor into explicit
//! selections of the remaining branches (demotion).

use crate::catalog::ScopeCatalog;
use crate::entity::{Macroprocess, Process, Subprocess};
use crate::id::{EntityKind, ScopeId};
use crate::selection::Selection;

/// Apply a toggle of `toggled` to `current`
///
/// # Rules
/// - select macroprocess: add it and drop explicit descendants
/// - select process/subprocess: add it, nothing else changes
/// - deselect macroprocess: remove it
/// - deselect listed process/subprocess: remove it; selected ancestors stay
/// - deselect process/subprocess covered only through an ancestor: demote
///   that ancestor
///
/// Demotion removes the outermost selected ancestor and explicitly selects
/// every sibling branch on the way down to `toggled`, so everything that was
/// in scope stays in scope except `toggled` and the entities it covered.
///
/// The result never contains duplicates or ids missing from the catalog. A
/// `toggled` id missing from the catalog leaves the (cleaned) selection as is.
///
/// # Example
/// ```
/// use grc_scope::{sanitize, Macroprocess, Process, ScopeCatalog, ScopeId, Selection};
///
/// let macros = vec![Macroprocess::new("M1", "MP-01", "Finance")];
/// let procs = vec![
///     Process::new("P1", "P-01", "Payables", "M1"),
///     Process::new("P2", "P-02", "Receivables", "M1"),
/// ];
/// let catalog = ScopeCatalog::new(&macros, &procs, &[]);
///
/// let current = Selection::from_raw(&["macroproceso-M1"]);
/// let next = sanitize(&current, &ScopeId::process("P1"), false, &catalog);
///
/// assert_eq!(next.to_strings(), vec!["process-P2"]);
/// ```
#[must_use]
pub fn sanitize(
    current: &Selection,
    toggled: &ScopeId,
    now_selected: bool,
    catalog: &ScopeCatalog<'_>,
) -> Selection {
    let mut next = current.retain_known(catalog);

    if !catalog.contains(toggled) {
        tracing::debug!(%toggled, "toggle ignored, no matching entity");
        return next;
    }

    match (now_selected, toggled.kind()) {
        (true, EntityKind::Macroprocess) => {
            let mut collapsed = 0usize;
            for descendant in catalog.descendants(toggled) {
                if next.remove(&descendant) {
                    collapsed += 1;
                }
            }
            next.insert(toggled.clone());
            tracing::debug!(%toggled, collapsed, "macroprocess selected");
        }
        (true, _) => {
            next.insert(toggled.clone());
            tracing::debug!(%toggled, "entity selected");
        }
        (false, EntityKind::Macroprocess) => {
            next.remove(toggled);
            tracing::debug!(%toggled, "macroprocess deselected");
        }
        (false, _) => {
            if next.remove(toggled) {
                tracing::debug!(%toggled, "listed entity deselected");
            } else {
                let demoted = demote(&mut next, toggled, catalog);
                tracing::debug!(%toggled, demoted, "covered entity deselected");
            }
        }
    }

    next
}

/// Rewrite the outermost selected ancestor of `excluded` so it no longer
/// covers `excluded`
///
/// Walks root-to-leaf from that ancestor: each node on the path is removed
/// and its children other than the next node on the path are selected.
/// Returns `true` if anything was demoted.
fn demote(selection: &mut Selection, excluded: &ScopeId, catalog: &ScopeCatalog<'_>) -> bool {
    let mut path = catalog.ancestors(excluded);
    path.reverse();

    let Some(start) = path.iter().position(|ancestor| selection.contains(ancestor)) else {
        return false;
    };

    path.push(excluded.clone());
    for step in path[start..].windows(2) {
        let (covering, keep_out) = (&step[0], &step[1]);
        selection.remove(covering);
        for child in catalog.children(covering) {
            if &child != keep_out {
                selection.insert(child);
            }
        }
    }

    true
}

/// Apply a toggle to a persisted selection against borrowed lookup tables
///
/// String-level form of [`sanitize`]. Unparseable entries in `current` are
/// dropped; an unparseable `toggled` id leaves the cleaned selection as is.
#[must_use]
pub fn sanitize_selections<S: AsRef<str>>(
    current: &[S],
    toggled: &str,
    now_selected: bool,
    macroprocesses: &[Macroprocess],
    processes: &[Process],
    subprocesses: &[Subprocess],
) -> Vec<String> {
    let catalog = ScopeCatalog::new(macroprocesses, processes, subprocesses);
    let current = Selection::from_raw(current);

    match toggled.parse::<ScopeId>() {
        Ok(toggled) => sanitize(&current, &toggled, now_selected, &catalog).to_strings(),
        Err(err) => {
            tracing::debug!(%err, "toggle ignored, unparseable scope id");
            current.retain_known(&catalog).to_strings()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tables() -> (Vec<Macroprocess>, Vec<Process>, Vec<Subprocess>) {
        (
            vec![
                Macroprocess::new("M1", "MP-01", "Finance"),
                Macroprocess::new("M2", "MP-02", "Operations"),
            ],
            vec![
                Process::new("P1", "P-01", "Payables", "M1"),
                Process::new("P2", "P-02", "Receivables", "M1"),
                Process::new("P3", "P-03", "Logistics", "M2"),
            ],
            vec![
                Subprocess::new("S1", "S-01", "Invoices", "P1"),
                Subprocess::new("S2", "S-02", "Payments", "P1"),
                Subprocess::new("S3", "S-03", "Collections", "P2"),
            ],
        )
    }

    fn toggle(current: &[&str], toggled: &str, on: bool) -> Vec<String> {
        let (m, p, s) = tables();
        sanitize_selections(current, toggled, on, &m, &p, &s)
    }

    #[test]
    fn selecting_macroprocess_collapses_explicit_children() {
        let next = toggle(&["process-P1", "process-P2"], "macroproceso-M1", true);
        assert_eq!(next, vec!["macroproceso-M1"]);
    }

    #[test]
    fn selecting_macroprocess_collapses_grandchildren_only_under_it() {
        let next = toggle(&["subproceso-S1", "process-P3"], "macroproceso-M1", true);
        assert_eq!(next, vec!["process-P3", "macroproceso-M1"]);
    }

    #[test]
    fn selecting_process_leaves_others_alone() {
        let next = toggle(&["macroproceso-M2"], "process-P1", true);
        assert_eq!(next, vec!["macroproceso-M2", "process-P1"]);
    }

    #[test]
    fn selecting_twice_does_not_duplicate() {
        let next = toggle(&["process-P1"], "process-P1", true);
        assert_eq!(next, vec!["process-P1"]);
    }

    #[test]
    fn deselecting_macroprocess_removes_only_it() {
        let next = toggle(&["macroproceso-M1", "process-P3"], "macroproceso-M1", false);
        assert_eq!(next, vec!["process-P3"]);
    }

    #[test]
    fn deselecting_explicit_process() {
        let next = toggle(&["process-P1", "process-P2"], "process-P1", false);
        assert_eq!(next, vec!["process-P2"]);
    }

    #[test]
    fn deselecting_covered_process_demotes_macroprocess() {
        let next = toggle(&["macroproceso-M1"], "process-P1", false);
        assert_eq!(next, vec!["process-P2"]);
    }

    #[test]
    fn deselecting_covered_subprocess_demotes_process() {
        let next = toggle(&["process-P1"], "subproceso-S1", false);
        assert_eq!(next, vec!["subproceso-S2"]);
    }

    #[test]
    fn deselecting_subprocess_demotes_two_levels() {
        let next = toggle(&["macroproceso-M1"], "subproceso-S1", false);
        assert_eq!(next, vec!["process-P2", "subproceso-S2"]);
    }

    #[test]
    fn deselecting_listed_entity_keeps_selected_parent() {
        let next = toggle(&["macroproceso-M1", "process-P2"], "process-P2", false);
        assert_eq!(next, vec!["macroproceso-M1"]);
    }

    #[test]
    fn select_then_deselect_child_under_selected_parent() {
        let selected = toggle(&["macroproceso-M1"], "process-P2", true);
        assert_eq!(selected, vec!["macroproceso-M1", "process-P2"]);

        let current: Vec<&str> = selected.iter().map(String::as_str).collect();
        let next = toggle(&current, "process-P2", false);
        assert_eq!(next, vec!["macroproceso-M1"]);
    }

    #[test]
    fn deselecting_listed_subprocess_keeps_covering_process() {
        let next = toggle(&["process-P1", "subproceso-S1"], "subproceso-S1", false);
        assert_eq!(next, vec!["process-P1"]);
    }

    #[test]
    fn deselecting_uncovered_unlisted_is_noop() {
        let next = toggle(&["process-P3"], "process-P1", false);
        assert_eq!(next, vec!["process-P3"]);
    }

    #[test]
    fn stale_entries_are_dropped() {
        let next = toggle(&["process-gone", "garbage", "process-P3"], "process-P1", true);
        assert_eq!(next, vec!["process-P3", "process-P1"]);
    }

    #[test]
    fn unknown_toggle_is_ignored() {
        assert_eq!(toggle(&["process-P3"], "process-nope", true), vec!["process-P3"]);
        assert_eq!(toggle(&["process-P3"], "nonsense", true), vec!["process-P3"]);
    }
}
