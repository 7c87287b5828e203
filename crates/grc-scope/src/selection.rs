//! Scope selection stored on an audit
//!
//! Provides [`Selection`], an insertion-ordered, duplicate-free set of
//! [`ScopeId`]s.

use crate::catalog::ScopeCatalog;
use crate::id::ScopeId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Set of explicitly selected scope ids
///
/// Keeps insertion order so every derived result (and the persisted array)
/// is reproducible. Equality ignores order. Serializes as a plain array of
/// id strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    ids: IndexSet<ScopeId>,
}

impl Selection {
    /// Empty selection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a persisted selection, dropping entries that do not parse
    ///
    /// Duplicate strings collapse to a single entry.
    #[must_use]
    pub fn from_raw<S: AsRef<str>>(raw: &[S]) -> Self {
        let mut ids = IndexSet::with_capacity(raw.len());
        for entry in raw {
            match entry.as_ref().parse::<ScopeId>() {
                Ok(id) => {
                    ids.insert(id);
                }
                Err(err) => tracing::debug!(%err, "dropping unparseable scope id"),
            }
        }
        Self { ids }
    }

    /// Copy of this selection without ids the catalog does not know
    #[must_use]
    pub fn retain_known(&self, catalog: &ScopeCatalog<'_>) -> Self {
        let ids: IndexSet<ScopeId> = self
            .ids
            .iter()
            .filter(|id| catalog.contains(id))
            .cloned()
            .collect();

        let dropped = self.ids.len() - ids.len();
        if dropped > 0 {
            tracing::debug!(dropped, "dropping scope ids with no matching entity");
        }

        Self { ids }
    }

    /// Check if `id` is explicitly selected
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &ScopeId) -> bool {
        self.ids.contains(id)
    }

    /// Add `id` at the end; returns `false` if already present
    #[inline]
    pub fn insert(&mut self, id: ScopeId) -> bool {
        self.ids.insert(id)
    }

    /// Remove `id` keeping the order of the rest; returns `false` if absent
    #[inline]
    pub fn remove(&mut self, id: &ScopeId) -> bool {
        self.ids.shift_remove(id)
    }

    /// Selected ids in insertion order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &ScopeId> {
        self.ids.iter()
    }

    /// Number of selected ids
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if nothing is selected
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Persisted string form
    #[must_use]
    pub fn to_strings(&self) -> Vec<String> {
        self.ids.iter().map(ToString::to_string).collect()
    }

    /// Consume into the owned ids
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<ScopeId> {
        self.ids.into_iter().collect()
    }
}

impl FromIterator<ScopeId> for Selection {
    fn from_iter<I: IntoIterator<Item = ScopeId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Extend<ScopeId> for Selection {
    fn extend<I: IntoIterator<Item = ScopeId>>(&mut self, iter: I) {
        self.ids.extend(iter);
    }
}

impl<'s> IntoIterator for &'s Selection {
    type Item = &'s ScopeId;
    type IntoIter = indexmap::set::Iter<'s, ScopeId>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter()
    }
}
