use std::collections::BTreeSet;

use crate::ResourcePath;

/// Parts a downstream document still declares although its upstream
/// counterpart no longer does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriftEntry {
    pub document: ResourcePath,
    pub orphaned: BTreeSet<String>,
}

/// Drift findings in table order. Documents without drift are absent.
///
/// `missing` lists downstream documents that were not there to compare.
/// It is only ever filled when the caller asked for missing documents to be
/// tolerated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DriftReport {
    entries: Vec<DriftEntry>,
    missing: Vec<ResourcePath>,
}

impl DriftReport {
    pub fn push(&mut self, entry: DriftEntry) {
        self.entries.push(entry);
    }

    pub fn push_missing(&mut self, document: ResourcePath) {
        self.missing.push(document);
    }

    /// No drift found. Says nothing about missing documents.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DriftEntry> {
        self.entries.iter()
    }

    pub fn get(&self, document: &ResourcePath) -> Option<&BTreeSet<String>> {
        self.entries
            .iter()
            .find(|e| &e.document == document)
            .map(|e| &e.orphaned)
    }

    pub fn missing(&self) -> &[ResourcePath] {
        &self.missing
    }
}

impl<'a> IntoIterator for &'a DriftReport {
    type Item = &'a DriftEntry;
    type IntoIter = std::slice::Iter<'a, DriftEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
