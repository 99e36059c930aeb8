use std::collections::HashMap;

/// Read-only access to literature co-occurrence counts.
///
/// Implementations typically wrap an external query service that is subject
/// to rate limits and per-call failures. Calls are idempotent; a failure
/// applies to that call only and callers are expected to record it and move
/// on rather than abort the batch.
pub trait LiteratureCountProvider: Send + Sync {
    /// Co-occurrence counts for one gene against each term, in term order.
    fn lookup(&self, gene: &str, terms: &[String]) -> anyhow::Result<Vec<u64>>;
}

/// Provider backed by a fixed in-memory table.
///
/// Pairs absent from the table resolve to zero, mirroring a literature index
/// with no hits. Useful for offline runs over pre-fetched counts and as a
/// test fixture.
#[derive(Debug, Default, Clone)]
pub struct TableProvider {
    counts: HashMap<(String, String), u64>,
}

impl TableProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, gene: &str, term: &str, count: u64) -> Self {
        self.counts
            .insert((gene.to_string(), term.to_string()), count);
        self
    }
}

impl LiteratureCountProvider for TableProvider {
    fn lookup(&self, gene: &str, terms: &[String]) -> anyhow::Result<Vec<u64>> {
        Ok(terms
            .iter()
            .map(|term| {
                self.counts
                    .get(&(gene.to_string(), term.to_string()))
                    .copied()
                    .unwrap_or(0)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_provider_returns_counts_in_term_order() {
        let provider = TableProvider::new()
            .with("TP53", "apoptosis", 12)
            .with("TP53", "autophagy", 3);
        let terms = vec!["autophagy".to_string(), "apoptosis".to_string()];
        let counts = provider.lookup("TP53", &terms).unwrap();
        assert_eq!(counts, vec![3, 12]);
    }

    #[test]
    fn test_table_provider_defaults_missing_pairs_to_zero() {
        let provider = TableProvider::new().with("TP53", "apoptosis", 12);
        let terms = vec!["apoptosis".to_string()];
        assert_eq!(provider.lookup("BRCA1", &terms).unwrap(), vec![0]);
    }
}
