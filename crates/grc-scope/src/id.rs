//! Scope entity identifiers
//!
//! Provides [`ScopeId`] for the `"<kind>-<entityId>"` strings an audit
//! persists as its scope selection.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Tier of the process hierarchy a scope id points into
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// Top-level grouping (root)
    #[serde(rename = "macroproceso")]
    Macroprocess,

    /// Belongs to exactly one macroprocess
    #[serde(rename = "process")]
    Process,

    /// Belongs to exactly one process (leaf)
    #[serde(rename = "subproceso")]
    Subprocess,
}

impl EntityKind {
    /// All kinds, root first
    pub const ALL: [EntityKind; 3] = [Self::Macroprocess, Self::Process, Self::Subprocess];

    /// Prefix used in the persisted id form
    #[inline]
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Macroprocess => "macroproceso",
            Self::Process => "process",
            Self::Subprocess => "subproceso",
        }
    }

    /// Distance from the root tier
    #[inline]
    #[must_use]
    pub const fn depth(self) -> usize {
        match self {
            Self::Macroprocess => 0,
            Self::Process => 1,
            Self::Subprocess => 2,
        }
    }

    /// Kind of the parent tier, `None` for macroprocesses
    #[inline]
    #[must_use]
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::Macroprocess => None,
            Self::Process => Some(Self::Macroprocess),
            Self::Subprocess => Some(Self::Process),
        }
    }

    /// Kind of the child tier, `None` for subprocesses
    #[inline]
    #[must_use]
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Macroprocess => Some(Self::Process),
            Self::Process => Some(Self::Subprocess),
            Self::Subprocess => None,
        }
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.prefix() == prefix)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Reference to one selectable node of the hierarchy
///
/// # Format
/// `macroproceso-<id>`, `process-<id>` or `subproceso-<id>`. The entity id
/// is opaque and may itself contain dashes (UUIDs do); only the first dash
/// separates the kind.
///
/// # Example
/// ```
/// use grc_scope::{EntityKind, ScopeId};
///
/// let id: ScopeId = "process-6f1c-42".parse().unwrap();
/// assert_eq!(id.kind(), EntityKind::Process);
/// assert_eq!(id.entity_id(), "6f1c-42");
/// assert_eq!(id.to_string(), "process-6f1c-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScopeId {
    kind: EntityKind,
    entity_id: String,
}

impl ScopeId {
    /// Create scope id from kind and entity id
    #[inline]
    #[must_use]
    pub fn new(kind: EntityKind, entity_id: impl Into<String>) -> Self {
        Self {
            kind,
            entity_id: entity_id.into(),
        }
    }

    /// Scope id of a macroprocess
    #[inline]
    #[must_use]
    pub fn macroprocess(entity_id: impl Into<String>) -> Self {
        Self::new(EntityKind::Macroprocess, entity_id)
    }

    /// Scope id of a process
    #[inline]
    #[must_use]
    pub fn process(entity_id: impl Into<String>) -> Self {
        Self::new(EntityKind::Process, entity_id)
    }

    /// Scope id of a subprocess
    #[inline]
    #[must_use]
    pub fn subprocess(entity_id: impl Into<String>) -> Self {
        Self::new(EntityKind::Subprocess, entity_id)
    }

    /// Tier this id points into
    #[inline]
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Id of the referenced row in its lookup table
    #[inline]
    #[must_use]
    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.entity_id)
    }
}

impl FromStr for ScopeId {
    type Err = ScopeIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, entity_id) = s
            .split_once('-')
            .ok_or_else(|| ScopeIdError::MissingSeparator(s.to_string()))?;

        let kind = EntityKind::from_prefix(prefix).ok_or_else(|| ScopeIdError::UnknownKind {
            kind: prefix.to_string(),
            raw: s.to_string(),
        })?;

        if entity_id.is_empty() {
            return Err(ScopeIdError::EmptyEntityId(s.to_string()));
        }

        Ok(Self::new(kind, entity_id))
    }
}

impl TryFrom<String> for ScopeId {
    type Error = ScopeIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ScopeId> for String {
    fn from(id: ScopeId) -> Self {
        id.to_string()
    }
}

/// Errors parsing a persisted scope id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScopeIdError {
    /// No `-` between kind and entity id
    #[error("scope id has no kind separator: {0}")]
    MissingSeparator(String),

    /// Prefix is not one of the three known kinds
    #[error("unknown scope entity kind '{kind}' in {raw}")]
    UnknownKind {
        /// Prefix found before the first dash
        kind: String,
        /// Full input
        raw: String,
    },

    /// Nothing after the separator
    #[error("scope id has an empty entity id: {0}")]
    EmptyEntityId(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_each_kind() {
        let m: ScopeId = "macroproceso-1".parse().unwrap();
        let p: ScopeId = "process-2".parse().unwrap();
        let s: ScopeId = "subproceso-3".parse().unwrap();

        assert_eq!(m, ScopeId::macroprocess("1"));
        assert_eq!(p, ScopeId::process("2"));
        assert_eq!(s, ScopeId::subprocess("3"));
    }

    #[test]
    fn entity_id_keeps_inner_dashes() {
        let id: ScopeId = "subproceso-a1b2-c3d4-e5".parse().unwrap();
        assert_eq!(id.kind(), EntityKind::Subprocess);
        assert_eq!(id.entity_id(), "a1b2-c3d4-e5");
        assert_eq!(id.to_string(), "subproceso-a1b2-c3d4-e5");
    }

    #[test]
    fn parse_rejects_unknown_kind() {
        let err = "proceso-1".parse::<ScopeId>().unwrap_err();
        assert!(matches!(err, ScopeIdError::UnknownKind { ref kind, .. } if kind == "proceso"));
    }

    #[test]
    fn parse_rejects_missing_separator() {
        let err = "macroproceso".parse::<ScopeId>().unwrap_err();
        assert_eq!(err, ScopeIdError::MissingSeparator("macroproceso".into()));
    }

    #[test]
    fn parse_rejects_empty_entity_id() {
        let err = "process-".parse::<ScopeId>().unwrap_err();
        assert_eq!(err, ScopeIdError::EmptyEntityId("process-".into()));
    }

    #[test]
    fn kind_hierarchy() {
        assert_eq!(EntityKind::Macroprocess.parent(), None);
        assert_eq!(EntityKind::Subprocess.parent(), Some(EntityKind::Process));
        assert_eq!(EntityKind::Process.child(), Some(EntityKind::Subprocess));
        assert_eq!(EntityKind::Subprocess.child(), None);
        assert_eq!(EntityKind::Subprocess.depth(), 2);
    }

    #[test]
    fn serde_uses_string_form() {
        let id = ScopeId::macroprocess("M1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"macroproceso-M1\"");

        let back: ScopeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        assert!(serde_json::from_str::<ScopeId>("\"bogus\"").is_err());
    }
}
