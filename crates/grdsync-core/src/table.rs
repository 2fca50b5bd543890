use std::collections::HashMap;

use crate::{GrdSyncError, ResourcePath, Result};

/// One upstream -> downstream correspondence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PathMapping {
    pub upstream: ResourcePath,
    pub downstream: ResourcePath,
}

/// Ordered, strictly one-to-one upstream -> downstream table.
///
/// Iteration follows insertion order. Consumers rely on parts being listed
/// before the document that includes them, so the order is part of the
/// contract. Both directions are indexed and a pair that would make either
/// side ambiguous is rejected at insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<PathMapping>,
    by_upstream: HashMap<ResourcePath, usize>,
    by_downstream: HashMap<ResourcePath, usize>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pair. Returns `Ok(false)` when the exact pair is already present
    /// (it keeps its original position), `Ok(true)` when it was appended.
    pub fn insert(&mut self, upstream: ResourcePath, downstream: ResourcePath) -> Result<bool> {
        if let Some(&idx) = self.by_upstream.get(&upstream) {
            let existing = &self.entries[idx].downstream;
            if *existing == downstream {
                return Ok(false);
            }
            return Err(GrdSyncError::Invariant {
                path: upstream.into_path_buf(),
                existing: existing.as_path().to_path_buf(),
                conflicting: downstream.into_path_buf(),
            });
        }
        if let Some(&idx) = self.by_downstream.get(&downstream) {
            return Err(GrdSyncError::Invariant {
                path: downstream.into_path_buf(),
                existing: self.entries[idx].upstream.as_path().to_path_buf(),
                conflicting: upstream.into_path_buf(),
            });
        }
        let idx = self.entries.len();
        self.by_upstream.insert(upstream.clone(), idx);
        self.by_downstream.insert(downstream.clone(), idx);
        self.entries.push(PathMapping {
            upstream,
            downstream,
        });
        Ok(true)
    }

    /// Append every pair of `other`, in its order.
    pub fn merge(&mut self, other: MappingTable) -> Result<()> {
        for m in other.entries {
            self.insert(m.upstream, m.downstream)?;
        }
        Ok(())
    }

    /// Same pairs with the roles swapped, same order.
    pub fn inverse(&self) -> Result<MappingTable> {
        let mut out = MappingTable::new();
        for m in &self.entries {
            out.insert(m.downstream.clone(), m.upstream.clone())?;
        }
        Ok(out)
    }

    pub fn get(&self, upstream: &ResourcePath) -> Option<&ResourcePath> {
        self.by_upstream
            .get(upstream)
            .map(|&i| &self.entries[i].downstream)
    }

    pub fn upstream_of(&self, downstream: &ResourcePath) -> Option<&ResourcePath> {
        self.by_downstream
            .get(downstream)
            .map(|&i| &self.entries[i].upstream)
    }

    pub fn position(&self, upstream: &ResourcePath) -> Option<usize> {
        self.by_upstream.get(upstream).copied()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathMapping> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[PathMapping] {
        &self.entries
    }

    pub fn upstream_paths(&self) -> impl Iterator<Item = &ResourcePath> {
        self.entries.iter().map(|m| &m.upstream)
    }

    pub fn downstream_paths(&self) -> impl Iterator<Item = &ResourcePath> {
        self.entries.iter().map(|m| &m.downstream)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a MappingTable {
    type Item = &'a PathMapping;
    type IntoIter = std::slice::Iter<'a, PathMapping>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
