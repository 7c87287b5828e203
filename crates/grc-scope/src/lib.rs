//! GRC Scope
//!
//! Audit scope selection over the macroprocess / process / subprocess
//! hierarchy.
//!
//! # Overview
//!
//! The scope crate provides:
//! - **ScopeId**: `"<kind>-<entityId>"` references persisted on an audit
//! - **ScopeCatalog**: parent/child index over the three lookup tables
//! - **expand**: effective in-scope set plus per-tier display groups
//! - **sanitize**: applies a checkbox toggle, keeping the selection minimal
//!
//! Both operations are pure functions of their inputs.
//!
//! # Example
//!
//! ```rust
//! use grc_scope::{expand, sanitize, Macroprocess, Process, ScopeCatalog, ScopeId, Selection};
//!
//! let macros = vec![Macroprocess::new("M1", "MP-01", "Finance")];
//! let procs = vec![
//!     Process::new("P1", "P-01", "Payables", "M1"),
//!     Process::new("P2", "P-02", "Receivables", "M1"),
//! ];
//! let catalog = ScopeCatalog::new(&macros, &procs, &[]);
//!
//! // Select both processes, then the macroprocess: children collapse away
//! let selection = Selection::from_raw(&["process-P1", "process-P2"]);
//! let selection = sanitize(&selection, &ScopeId::macroprocess("M1"), true, &catalog);
//! assert_eq!(selection.to_strings(), vec!["macroproceso-M1"]);
//!
//! // Both processes are still in scope, now auto-included
//! let expansion = expand(&selection, &catalog);
//! assert_eq!(expansion.expanded_entities.len(), 3);
//! assert!(expansion.display_groups.procesos.iter().all(|p| p.is_child));
//! ```

pub mod catalog;
pub mod entity;
pub mod expand;
pub mod id;
pub mod sanitize;
pub mod selection;

// Re-exports
pub use catalog::ScopeCatalog;
pub use entity::{Macroprocess, Process, ScopeEntity, ScopeTables, Subprocess};
pub use expand::{expand, expand_scope_entities, Coverage, DisplayEntity, DisplayGroups, ScopeExpansion};
pub use id::{EntityKind, ScopeId, ScopeIdError};
pub use sanitize::{sanitize, sanitize_selections};
pub use selection::Selection;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for scope operations
    pub use crate::{
        expand, sanitize, Coverage, EntityKind, Macroprocess, Process, ScopeCatalog, ScopeEntity,
        ScopeExpansion, ScopeId, ScopeTables, Selection, Subprocess,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
