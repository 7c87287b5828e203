//! GRC Audit - audit records and scope editing
//!
//! Builds on `grc-scope` with:
//! - The audit record and its lifecycle stages
//! - A scope editing session producing full-replacement updates
//! - The persistence seam (`AuditStore`) and an in-memory store
//! - Risk re-evaluation (probability × impact)
//! - Configuration and document loading
//!
//! # Example
//!
//! ```rust,ignore
//! use grc_audit::{Audit, AuditStore, InMemoryAuditStore, ScopeEditor};
//! use grc_scope::ScopeId;
//!
//! # async fn example(tables: grc_scope::ScopeTables) -> Result<(), grc_audit::AuditError> {
//! let store = InMemoryAuditStore::new();
//! let audit = store.create(Audit::new("Annual finance audit")).await?;
//!
//! let mut editor = ScopeEditor::for_audit(&audit, &tables);
//! editor.toggle(&ScopeId::macroprocess("M1"), true);
//!
//! store
//!     .replace_scope(&audit.id, editor.into_update(), audit.revision)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod config;
pub mod editor;
pub mod error;
pub mod risk;
pub mod store;

// Re-exports for convenience
pub use audit::{Audit, AuditStage};
pub use config::{load_document, load_scope_tables, GrcConfig};
pub use editor::{ScopeEditor, ScopeUpdate};
pub use error::AuditError;
pub use risk::{RiskAssessment, RiskLevel, RiskRating, RiskReevaluation, RiskThresholds};
pub use store::{AuditStore, InMemoryAuditStore};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with audits
    pub use crate::{
        Audit, AuditError, AuditStage, AuditStore, GrcConfig, InMemoryAuditStore, RiskRating,
        ScopeEditor, ScopeUpdate,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
