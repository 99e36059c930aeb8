use std::collections::HashMap;

use derive_new::new;

/// A (gene, term) co-occurrence count table.
///
/// Absence of an entry means the lookup failed or was never attempted, which
/// is distinct from a stored count of zero.
#[derive(Debug, Clone, Default)]
pub struct CountsTable {
    rows: HashMap<String, HashMap<String, u64>>,
}

impl CountsTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, gene: &str, term: &str, count: u64) {
        self.rows
            .entry(gene.to_string())
            .or_default()
            .insert(term.to_string(), count);
    }

    pub fn get(&self, gene: &str, term: &str) -> Option<u64> {
        self.rows.get(gene).and_then(|row| row.get(term)).copied()
    }

    /// Genes with at least one present entry.
    pub fn genes(&self) -> impl Iterator<Item = &String> {
        self.rows.keys()
    }

    /// All present counts, in no particular order.
    pub fn counts(&self) -> impl Iterator<Item = u64> + '_ {
        self.rows.values().flat_map(|row| row.values().copied())
    }

    /// Number of (gene, term) pairs present.
    pub fn n_entries(&self) -> usize {
        self.rows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A provider call that failed and was skipped.
#[derive(Debug, Clone, new)]
pub struct LookupFailure {
    /// Gene whose lookup failed.
    pub gene: String,
    /// Stringified cause, suitable for a failure report.
    pub reason: String,
}
