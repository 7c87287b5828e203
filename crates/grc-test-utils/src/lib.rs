//! Testing utilities for the GRC workspace
//!
//! Shared fixtures for scope catalogs and audits.

#![allow(missing_docs)]

use grc_audit::Audit;
use grc_scope::{Macroprocess, Process, ScopeId, ScopeTables, Selection, Subprocess};

/// Two macroprocesses, three processes, four subprocesses:
///
/// ```text
/// M1 Finance      P1 Payables     S1 Invoices, S2 Payments
///                 P2 Receivables  S3 Collections
/// M2 Operations   P3 Logistics    S4 Fleet
/// ```
pub fn sample_tables() -> ScopeTables {
    ScopeTables::new(
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
            Subprocess::new("S4", "S-04", "Fleet", "P3"),
        ],
    )
}

/// One macroprocess `M1` with two childless processes `P1`, `P2`
pub fn two_process_tables() -> ScopeTables {
    ScopeTables::new(
        vec![Macroprocess::new("M1", "MP-01", "Finance")],
        vec![
            Process::new("P1", "P-01", "Payables", "M1"),
            Process::new("P2", "P-02", "Receivables", "M1"),
        ],
        Vec::new(),
    )
}

/// Generated tables: `macros` macroprocesses, each with `procs` processes,
/// each with `subs` subprocesses. Ids look like `M0`, `M0P1`, `M0P1S2`.
pub fn grid_tables(macros: usize, procs: usize, subs: usize) -> ScopeTables {
    let mut tables = ScopeTables::default();
    for m in 0..macros {
        let macro_id = format!("M{m}");
        tables
            .macroprocesos
            .push(Macroprocess::new(&macro_id, format!("MP-{m}"), format!("Macro {m}")));

        for p in 0..procs {
            let process_id = format!("{macro_id}P{p}");
            tables.procesos.push(Process::new(
                &process_id,
                format!("P-{m}-{p}"),
                format!("Process {m}.{p}"),
                &macro_id,
            ));

            for s in 0..subs {
                tables.subprocesos.push(Subprocess::new(
                    format!("{process_id}S{s}"),
                    format!("S-{m}-{p}-{s}"),
                    format!("Subprocess {m}.{p}.{s}"),
                    &process_id,
                ));
            }
        }
    }
    tables
}

/// Every scope id of the tables, root tier first
pub fn all_scope_ids(tables: &ScopeTables) -> Vec<ScopeId> {
    tables
        .macroprocesos
        .iter()
        .map(|m| ScopeId::macroprocess(&m.id))
        .chain(tables.procesos.iter().map(|p| ScopeId::process(&p.id)))
        .chain(tables.subprocesos.iter().map(|s| ScopeId::subprocess(&s.id)))
        .collect()
}

pub fn selection(raw: &[&str]) -> Selection {
    Selection::from_raw(raw)
}

pub fn create_test_audit() -> Audit {
    Audit::new("Annual finance audit")
}
